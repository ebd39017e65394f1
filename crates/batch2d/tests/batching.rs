//! End-to-end batching behavior against the recording backend.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use approx::assert_relative_eq;
use batch2d::prelude::*;

fn batch() -> SpriteBatch<RecordingBackend> {
    SpriteBatch::new(RecordingBackend::new())
}

fn assert_point(got: Vec2, want: Vec2) {
    assert_relative_eq!(got.x, want.x, epsilon = 1e-4);
    assert_relative_eq!(got.y, want.y, epsilon = 1e-4);
}

#[test]
fn nested_transforms_match_direct_composition() {
    let a = Transform2d::from_scale_rotation_translation(Vec2::splat(2.0), FRAC_PI_2, Vec2::new(50.0, 10.0));
    let b = Transform2d::from_translation(Vec2::new(3.0, -4.0));
    let p = Vec2::new(1.0, 2.0);

    let mut batch = batch();
    batch.push_transform(a);
    batch.push_transform(b);
    batch.draw_rect_fill(Rect::new(p.x, p.y, 1.0, 1.0), Color::WHITE);

    let emitted = batch.pending_vertices()[0].position();
    assert_point(emitted, a.compose(b).transform_point(p));

    assert_eq!(batch.pop_transform().unwrap(), a.compose(b));
    assert_eq!(batch.pop_transform().unwrap(), a);
    assert_eq!(batch.current_transform(), Transform2d::IDENTITY);
    assert!(matches!(batch.pop_transform(), Err(BatchError::TransformStackUnderflow)));
}

#[test]
fn transform_is_not_applied_retroactively() {
    let mut batch = batch();
    batch.draw_line(Vec2::ZERO, Vec2::new(10.0, 0.0), Color::WHITE, 2.0);
    batch.push_transform(Transform2d::from_translation(Vec2::new(0.0, 100.0)));
    batch.draw_line(Vec2::ZERO, Vec2::new(10.0, 0.0), Color::WHITE, 2.0);
    batch.pop_transform().unwrap();

    let v = batch.pending_vertices();
    assert_point(v[0].position(), Vec2::new(0.0, -1.0));
    assert_point(v[4].position(), Vec2::new(0.0, 99.0));
}

#[test]
fn texture_change_splits_into_two_draws() {
    let t1 = Texture::new(TextureId(1), 32, 32);
    let t2 = Texture::new(TextureId(2), 64, 64);

    let mut batch = batch();
    batch.set_texture(Some(&t1));
    for i in 0..3 {
        batch.draw(t1.full_rect(), Vec2::new(i as f32 * 40.0, 0.0));
    }
    batch.set_texture(Some(&t2));
    for i in 0..5 {
        batch.draw(t2.full_rect(), Vec2::new(i as f32 * 70.0, 100.0));
    }
    batch.render();

    let draws = batch.backend().draws();
    assert_eq!(draws.len(), 2);
    assert_eq!(draws[0].index_count, 3 * 6);
    assert_eq!(draws[0].texture, Some(TextureId(1)));
    assert_eq!(draws[1].index_count, 5 * 6);
    assert_eq!(draws[1].texture, Some(TextureId(2)));
    // Each flush restarts indexing at zero.
    assert_eq!(draws[1].indices[..6], [0, 1, 2, 0, 2, 3]);
    assert_eq!(batch.stats().texture_flushes, 1);
    assert_eq!(batch.stats().draw_calls, 2);
}

#[test]
fn shapes_batch_with_the_bound_texture() {
    let tex = Texture::new(TextureId(4), 16, 16);
    let mut batch = batch();
    batch.set_texture(Some(&tex));
    batch.draw(tex.full_rect(), Vec2::ZERO);
    batch.draw_rect_fill(Rect::new(0.0, 0.0, 4.0, 4.0), Color::RED);
    batch.draw_circle_fill(Vec2::new(8.0, 8.0), 4.0, Color::BLUE, 8);
    batch.render();
    assert_eq!(batch.backend().draw_count(), 1);
}

#[test]
fn empty_render_issues_nothing() {
    let mut batch = batch();
    batch.render();
    batch.render();
    assert!(batch.backend().calls().is_empty());
    assert!(batch.pending_vertices().is_empty());
    assert_eq!(batch.current_transform(), Transform2d::IDENTITY);
    assert_eq!(batch.texture(), None);
}

#[test]
fn render_twice_only_draws_once() {
    let mut batch = batch();
    batch.draw_rect_fill(Rect::new(0.0, 0.0, 1.0, 1.0), Color::WHITE);
    batch.render();
    let stats = *batch.stats();
    batch.render();
    assert_eq!(batch.backend().draw_count(), 1);
    assert_eq!(batch.stats(), &stats);
}

#[test]
fn primitive_vertex_and_index_counts() {
    let mut batch = batch();
    batch.draw_rect_fill(Rect::new(0.0, 0.0, 10.0, 10.0), Color::WHITE);
    assert_eq!((batch.pending_vertices().len(), batch.pending_indices().len()), (4, 6));
    batch.render();

    batch.draw_triangle_fill(Vec2::ZERO, Vec2::X, Vec2::Y, Color::WHITE);
    assert_eq!((batch.pending_vertices().len(), batch.pending_indices().len()), (3, 3));
    batch.render();

    for steps in [3u32, 15, 36] {
        batch.draw_circle_fill(Vec2::new(50.0, 50.0), 20.0, Color::WHITE, steps);
        assert_eq!(batch.pending_vertices().len(), steps as usize + 1);
        assert_eq!(batch.pending_indices().len(), 3 * steps as usize);
        batch.render();
    }
}

#[test]
fn outline_counts() {
    let mut batch = batch();
    batch.draw_rect_line(Rect::new(0.0, 0.0, 10.0, 10.0), Color::WHITE, 1.0);
    assert_eq!(batch.pending_vertices().len(), 16);
    batch.render();

    batch.draw_triangle_line(Vec2::ZERO, Vec2::new(10.0, 0.0), Vec2::new(0.0, 10.0), Color::WHITE, 1.0);
    assert_eq!(batch.pending_vertices().len(), 12);
    batch.render();

    batch.draw_circle_line(Vec2::ZERO, 10.0, 1.0, Color::WHITE, 12);
    assert_eq!(batch.pending_indices().len(), 12 * 6);
    batch.render();

    batch.draw_semi_circle_line(Vec2::ZERO, 10.0, 0.0, PI, 1.0, Color::WHITE, 12);
    assert_eq!(batch.pending_indices().len(), 12 * 6);
}

#[test]
fn sub_rect_uvs() {
    let tex = Texture::new(TextureId(1), 100, 50);
    let mut batch = batch();
    batch.set_texture(Some(&tex));
    batch.draw(Rect::new(10.0, 10.0, 20.0, 10.0), Vec2::ZERO);

    let expected: [(f32, f32); 4] = [(0.10, 0.20), (0.30, 0.20), (0.30, 0.40), (0.10, 0.40)];
    for (v, (u, w)) in batch.pending_vertices().iter().zip(expected) {
        assert_relative_eq!(v.uv[0], u, epsilon = 1e-6);
        assert_relative_eq!(v.uv[1], w, epsilon = 1e-6);
    }
}

#[test]
fn untextured_sprite_has_zero_uvs() {
    let mut batch = batch();
    batch.draw(Rect::new(10.0, 10.0, 20.0, 10.0), Vec2::ZERO);
    assert!(batch.pending_vertices().iter().all(|v| v.uv == [0.0, 0.0]));
    batch.render();
    assert_eq!(batch.backend().draws()[0].texture, None);
}

#[test]
fn rect_overlap_is_half_open() {
    let a: Rect = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert!(!a.overlaps(&Rect::new(10.0, 0.0, 10.0, 10.0)));
    assert!(a.overlaps(&Rect::new(9.0, 0.0, 10.0, 10.0)));
}

#[test]
fn line_is_a_quad_offset_by_half_thickness() {
    let mut batch = batch();
    batch.draw_line(Vec2::ZERO, Vec2::new(10.0, 0.0), Color::WHITE, 2.0);

    let mut got: Vec<(f32, f32)> = batch
        .pending_vertices()
        .iter()
        .map(|v| (v.position[0], v.position[1]))
        .collect();
    got.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let want = [(0.0, -1.0), (0.0, 1.0), (10.0, -1.0), (10.0, 1.0)];
    for ((gx, gy), (wx, wy)) in got.into_iter().zip(want) {
        assert_relative_eq!(gx, wx, epsilon = 1e-5);
        assert_relative_eq!(gy, wy, epsilon = 1e-5);
    }
}

#[test]
fn every_emitted_triangle_winds_the_same_way() {
    let tex = Texture::new(TextureId(1), 64, 64);
    let mut batch = batch();
    batch.set_texture(Some(&tex));
    batch.draw_scaled(tex.full_rect(), Vec2::new(10.0, 10.0), Vec2::splat(0.5), 0.7, true);
    batch.draw_to(tex.full_rect(), Rect::new(0.0, 0.0, 30.0, 20.0), -1.2, false);
    batch.draw_rect_fill(Rect::new(0.0, 0.0, 10.0, 5.0), Color::WHITE);
    batch.draw_triangle_fill(Vec2::ZERO, Vec2::new(0.0, 10.0), Vec2::new(10.0, 0.0), Color::WHITE);
    batch.draw_line(Vec2::new(10.0, 10.0), Vec2::new(-5.0, 3.0), Color::WHITE, 2.0);
    batch.draw_circle_fill(Vec2::ZERO, 5.0, Color::WHITE, 7);
    batch.draw_semi_circle_fill(Vec2::ZERO, 5.0, PI, 0.0, Color::WHITE, 5);
    batch.draw_circle_line(Vec2::ZERO, 5.0, 1.0, Color::WHITE, 9);

    let v = batch.pending_vertices();
    for tri in batch.pending_indices().chunks(3) {
        let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| v[i as usize].position());
        assert!((b - a).perp_dot(c - a) >= -1e-4, "triangle {tri:?} winds backwards");
    }
}

#[test]
fn degenerate_inputs_emit_nothing() {
    let mut batch = batch();
    batch.draw_line(Vec2::new(3.0, 3.0), Vec2::new(3.0, 3.0), Color::WHITE, 1.0);
    batch.draw_line(Vec2::ZERO, Vec2::X, Color::WHITE, -2.0);
    batch.draw_circle_fill(Vec2::ZERO, 5.0, Color::WHITE, 0);
    batch.draw_circle_line(Vec2::ZERO, 5.0, 1.0, Color::WHITE, 0);
    batch.draw_semi_circle_line(Vec2::ZERO, 5.0, TAU, TAU, 1.0, Color::WHITE, 4);
    batch.render();

    assert!(batch.backend().calls().is_empty());
    assert_eq!(batch.stats().degenerate_primitives, 5);
}

#[test]
fn large_frames_are_not_dropped() {
    let mut batch = batch();
    for i in 0..10_000 {
        batch.draw_rect_fill(Rect::new(i as f32, 0.0, 1.0, 1.0), Color::WHITE);
    }
    assert_eq!(batch.pending_vertices().len(), 40_000);
    batch.render();
    assert_eq!(batch.backend().draws()[0].index_count, 60_000);
}

#[test]
fn backend_can_be_borrowed_mutably() {
    let mut recorder = RecordingBackend::new();
    {
        let mut batch = SpriteBatch::new(&mut recorder);
        batch.draw_rect_fill(Rect::new(0.0, 0.0, 1.0, 1.0), Color::WHITE);
        batch.render();
    }
    assert_eq!(recorder.draw_count(), 1);
}
