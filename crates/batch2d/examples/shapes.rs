//! Draws every primitive family each frame.
//!
//! ```sh
//! RUST_LOG=batch2d=debug cargo run --example shapes
//! ```
//!
//! An optional first argument names a JSON [`BatchConfig`] file.

use std::f32::consts::{PI, TAU};
use std::sync::Arc;
use std::time::Instant;

use batch2d::prelude::*;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowId};

struct Scene {
    gpu: GpuContext,
    batch: SpriteBatch<WgpuBackend>,
    checker: Texture,
    ring: Texture,
}

struct ShapesApp {
    config: BatchConfig,
    window: Option<Arc<Window>>,
    scene: Option<Scene>,
    start: Instant,
}

/// An 8x8 two-color checkerboard.
fn checkerboard(a: [u8; 4], b: [u8; 4]) -> Vec<u8> {
    (0..64)
        .flat_map(|i| if (i % 8 + i / 8) % 2 == 0 { a } else { b })
        .collect()
}

impl Scene {
    fn new(window: Arc<Window>, config: BatchConfig) -> batch2d::Result<Self> {
        let gpu = GpuContext::new(window)?;
        let mut backend = WgpuBackend::new(&gpu);
        let checker = backend.create_texture_from_rgba(
            "checker",
            8,
            8,
            &checkerboard([230, 230, 230, 255], [40, 40, 60, 255]),
        )?;
        let ring = backend.create_texture_from_rgba(
            "ring",
            8,
            8,
            &checkerboard([250, 180, 40, 255], [0, 0, 0, 0]),
        )?;
        log::info!("{} textures on the GPU (white default included)", backend.textures().len());
        Ok(Self {
            gpu,
            batch: SpriteBatch::with_config(backend, config),
            checker,
            ring,
        })
    }

    fn draw(&mut self, t: f32) {
        let batch = &mut self.batch;
        let steps = batch.circle_steps();

        // Shapes share whatever texture is bound, so these stay in one batch.
        batch.set_texture(None);
        batch.draw_rect_fill(Rect::new(40.0, 40.0, 200.0, 120.0), Color::rgb(0.2, 0.5, 0.9));
        batch.draw_rect_line(Rect::new(40.0, 40.0, 200.0, 120.0), Color::WHITE, 3.0);
        batch.draw_triangle_fill(
            Vec2::new(300.0, 160.0),
            Vec2::new(360.0, 40.0),
            Vec2::new(420.0, 160.0),
            Color::GREEN,
        );
        batch.draw_triangle_line(
            Vec2::new(300.0, 160.0),
            Vec2::new(360.0, 40.0),
            Vec2::new(420.0, 160.0),
            Color::BLACK,
            2.0,
        );
        batch.draw_circle_fill(Vec2::new(540.0, 100.0), 60.0, Color::RED, steps);
        batch.draw_circle_line(Vec2::new(540.0, 100.0), 70.0, 4.0, Color::WHITE, 48);
        batch.draw_semi_circle_fill(Vec2::new(700.0, 100.0), 60.0, 0.0, PI, Color::BLUE, steps);
        batch.draw_semi_circle_line(Vec2::new(700.0, 100.0), 60.0, PI, TAU, 3.0, Color::WHITE, steps);
        batch.draw_line(Vec2::new(40.0, 220.0), Vec2::new(760.0, 260.0 + 40.0 * t.sin()), Color::WHITE, 5.0);

        // Texture switch: flushes the shapes above.
        let checker = self.checker;
        batch.set_texture(Some(&checker));
        batch.draw(checker.full_rect(), Vec2::new(40.0, 320.0));
        batch.draw_scaled(checker.full_rect(), Vec2::new(100.0, 320.0), Vec2::splat(8.0), t, true);
        batch.draw_to(Rect::new(0.0, 0.0, 4.0, 4.0), Rect::new(220.0, 320.0, 128.0, 64.0), 0.0, false);

        // A spinning group under a pushed transform.
        batch.push_transform(Transform2d::from_scale_rotation_translation(Vec2::ONE, t * 0.5, Vec2::new(560.0, 420.0)));
        let ring = self.ring;
        batch.set_texture(Some(&ring));
        for k in 0..6 {
            let angle = k as f32 * TAU / 6.0;
            let sprite = Sprite::full(&ring)
                .at(Vec2::from_angle(angle) * 90.0 - Vec2::splat(16.0))
                .scale(Vec2::splat(4.0))
                .rotation(-t)
                .centered(true)
                .color(Color::rgba(1.0, 1.0, 1.0, 0.5 + 0.5 * (t + angle).sin()));
            batch.draw_sprite(&sprite);
        }
        batch.draw_circle_fill(Vec2::ZERO, 24.0, Color::WHITE, steps);
        if let Err(err) = batch.pop_transform() {
            log::error!("{err}");
        }

        batch.render();
    }
}

impl ApplicationHandler for ShapesApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let attrs = Window::default_attributes()
            .with_title("batch2d shapes")
            .with_inner_size(winit::dpi::LogicalSize::new(800.0, 600.0));
        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(err) => {
                log::error!("failed to create window: {err}");
                event_loop.exit();
                return;
            }
        };

        match Scene::new(window.clone(), self.config.clone()) {
            Ok(scene) => self.scene = Some(scene),
            Err(err) => {
                log::error!("failed to initialize GPU: {err}");
                event_loop.exit();
                return;
            }
        }
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Window close requested, exiting.");
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if let Some(scene) = &mut self.scene {
                    scene.gpu.resize(size.width, size.height);
                    let (w, h) = scene.gpu.surface_size();
                    scene.batch.backend_mut().resize(w, h);
                }
            }

            WindowEvent::RedrawRequested => {
                let Some(scene) = &mut self.scene else {
                    return;
                };
                scene.draw(self.start.elapsed().as_secs_f32());

                let clear = scene.batch.config().clear_color;
                match scene.batch.backend_mut().present(&scene.gpu, clear) {
                    Ok(()) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        let (w, h) = scene.gpu.surface_size();
                        scene.gpu.resize(w, h);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of GPU memory!");
                        event_loop.exit();
                    }
                    Err(e) => {
                        log::warn!("Surface error: {:?}", e);
                    }
                }

                let stats = scene.batch.stats();
                log::debug!(
                    "{} draw calls, {} vertices, {} texture flushes",
                    stats.draw_calls,
                    stats.vertices,
                    stats.texture_flushes
                );

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => BatchConfig::load(path)?,
        None => BatchConfig::default(),
    };

    let event_loop = EventLoop::new()?;
    let mut app = ShapesApp {
        config,
        window: None,
        scene: None,
        start: Instant::now(),
    };
    event_loop.run_app(&mut app)?;
    Ok(())
}
