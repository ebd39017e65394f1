//! # Pipeline — The Full GPU Configuration for Drawing
//!
//! A *render pipeline* bundles everything the GPU needs to know about how to
//! draw: which shaders to run, how vertices are laid out, how colors are
//! blended, and what kind of primitives to produce. It is created once and
//! bound before the batched draws.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │ RenderPipeline                                              │
//! │                                                             │
//! │  Shader module ─── vs_main + fs_main from shader.wgsl       │
//! │                                                             │
//! │  Vertex layout ─── Vertex { position, uv, color, mix }      │
//! │                                                             │
//! │  Bind group layouts                                         │
//! │    group 0: camera uniform (mat4x4, vertex-only)            │
//! │    group 1: texture + sampler (fragment-only)               │
//! │                                                             │
//! │  Blend state ─── ALPHA_BLENDING                             │
//! │                                                             │
//! │  Primitive ─── TriangleList, no culling                     │
//! │                                                             │
//! │  Depth/stencil ─── None (submission order is draw order)    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Camera
//!
//! Vertices arrive in pixel coordinates with the origin at the top-left and y
//! pointing down, the same space the draw calls use. The camera uniform is a
//! plain orthographic projection of the viewport:
//!
//! ```text
//!  (0,0) ───────── (w,0)          clip (-1, 1) ───── (1, 1)
//!    │               │      ──►          │              │
//!  (0,h) ───────── (w,h)          clip (-1,-1) ───── (1,-1)
//! ```

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::math::Vec2;
use crate::vertex::Vertex;

/// The camera uniform: one view-projection matrix.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub(crate) struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    /// Pixel space (y-down, origin top-left) to clip space.
    pub fn pixel_space(width: u32, height: u32) -> Self {
        let size = Vec2::new(width.max(1) as f32, height.max(1) as f32);
        let projection = glam::Mat4::orthographic_rh(0.0, size.x, size.y, 0.0, -1.0, 1.0);
        Self {
            view_proj: projection.to_cols_array_2d(),
        }
    }
}

/// GPU resources shared by every batched draw.
pub struct SpritePipeline {
    pub pipeline: wgpu::RenderPipeline,
    pub texture_bind_group_layout: wgpu::BindGroupLayout,
    pub camera_buffer: wgpu::Buffer,
    pub camera_bind_group: wgpu::BindGroup,
    pub sampler: wgpu::Sampler,
}

impl SpritePipeline {
    /// Build the pipeline for a render target of `format`.
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("batch2d shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
        });

        // Bind group layout 0: camera uniform
        let camera_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("camera bind group layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        // Bind group layout 1: texture + sampler
        let texture_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("texture bind group layout"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            multisampled: false,
                            view_dimension: wgpu::TextureViewDimension::D2,
                            sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                        count: None,
                    },
                ],
            });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("batch2d pipeline layout"),
            bind_group_layouts: &[&camera_bind_group_layout, &texture_bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("batch2d pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::LAYOUT],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                // Clockwise on a y-down screen is counter-clockwise in clip space.
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None, // mirrored sprites wind the other way
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("camera uniform buffer"),
            contents: bytemuck::cast_slice(&[CameraUniform::pixel_space(1, 1)]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("camera bind group"),
            layout: &camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        // Nearest filtering keeps pixel art crisp.
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("batch2d sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        Self {
            pipeline,
            texture_bind_group_layout,
            camera_buffer,
            camera_bind_group,
            sampler,
        }
    }

    /// Point the camera at a `width` × `height` pixel viewport.
    pub fn set_viewport(&self, queue: &wgpu::Queue, width: u32, height: u32) {
        let camera = CameraUniform::pixel_space(width, height);
        queue.write_buffer(&self.camera_buffer, 0, bytemuck::cast_slice(&[camera]));
    }

    /// A bind group sampling `view` through the shared sampler.
    pub fn texture_bind_group(&self, device: &wgpu::Device, label: &str, view: &wgpu::TextureView) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &self.texture_bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        })
    }
}
