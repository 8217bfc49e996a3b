//! Connection rendering between nearby particles.
//!
//! The CPU hands over the frame's connection set; this module packs it into
//! a segment buffer and draws each segment as a thin camera-facing quad with
//! the pre-computed falloff opacity. The buffer is fully overwritten every
//! frame, so stale segments never outlive the frame that produced them.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use wgpu::util::DeviceExt;

use super::DEPTH_FORMAT;
use crate::field::Connection;
use crate::particle::Particle;

/// Parameters for the connection render shader.
#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct LineParams {
    color: [f32; 3],
    _pad: f32,
}

/// One line segment: two endpoints as vec4s, opacity in the first `w`.
#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct SegmentGpu {
    from: [f32; 4],
    to: [f32; 4],
}

/// GPU resources for connection rendering.
pub struct ConnectionState {
    buffer: wgpu::Buffer,
    render_pipeline: wgpu::RenderPipeline,
    render_bind_group: wgpu::BindGroup,
    max_segments: u32,
    scratch: Vec<SegmentGpu>,
    // Kept alive for the bind group.
    _params_buffer: wgpu::Buffer,
}

impl ConnectionState {
    /// Create the segment buffer and render pipeline.
    ///
    /// Capacity is the exact pair bound `n * (n - 1) / 2`, so every
    /// qualifying pair of a frame fits and nothing is ever truncated.
    pub fn new(
        device: &wgpu::Device,
        uniform_buffer: &wgpu::Buffer,
        num_particles: u32,
        color: Vec3,
        blend: wgpu::BlendState,
        surface_format: wgpu::TextureFormat,
    ) -> Self {
        let n = num_particles as u64;
        let max_segments = (n * n.saturating_sub(1) / 2).max(1);

        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Connection Buffer"),
            size: max_segments * std::mem::size_of::<SegmentGpu>() as u64,
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let params = LineParams {
            color: color.to_array(),
            _pad: 0.0,
        };
        let params_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Connection Params Buffer"),
            contents: bytemuck::bytes_of(&params),
            usage: wgpu::BufferUsages::UNIFORM,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Connection Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Storage { read_only: true },
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let render_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Connection Bind Group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: params_buffer.as_entire_binding(),
                },
            ],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Connection Shader"),
            source: wgpu::ShaderSource::Wgsl(LINE_SHADER.into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Connection Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Connection Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(blend),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: false,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Self {
            buffer,
            render_pipeline,
            render_bind_group,
            max_segments: max_segments as u32,
            scratch: Vec::new(),
            _params_buffer: params_buffer,
        }
    }

    /// Pack this frame's connections into the segment buffer.
    ///
    /// Returns the number of segments to draw.
    pub fn upload(
        &mut self,
        queue: &wgpu::Queue,
        particles: &[Particle],
        connections: &[Connection],
    ) -> u32 {
        self.scratch.clear();
        self.scratch.extend(connections.iter().map(|c| {
            let a = particles[c.a].position;
            let b = particles[c.b].position;
            SegmentGpu {
                from: [a.x, a.y, a.z, c.opacity],
                to: [b.x, b.y, b.z, 0.0],
            }
        }));

        if !self.scratch.is_empty() {
            queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&self.scratch));
        }

        (self.scratch.len() as u32).min(self.max_segments)
    }

    /// Record draw commands for `segment_count` segments.
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>, segment_count: u32) {
        if segment_count == 0 {
            return;
        }
        render_pass.set_pipeline(&self.render_pipeline);
        render_pass.set_bind_group(0, &self.render_bind_group, &[]);
        render_pass.draw(0..6, 0..segment_count);
    }
}

pub(crate) const LINE_SHADER: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
    point_scale: vec2<f32>,
    time: f32,
};

struct LineParams {
    color: vec3<f32>,
};

@group(0) @binding(0) var<uniform> uniforms: Uniforms;
@group(0) @binding(1) var<storage, read> segments: array<vec4<f32>>;
@group(0) @binding(2) var<uniform> params: LineParams;

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) alpha: f32,
};

const HALF_WIDTH: f32 = 0.75;

@vertex
fn vs_main(
    @builtin(vertex_index) vertex_index: u32,
    @builtin(instance_index) instance_index: u32,
) -> VertexOutput {
    var out: VertexOutput;

    let seg_from = segments[instance_index * 2u];
    let seg_to = segments[instance_index * 2u + 1u];

    let pos_a = seg_from.xyz;
    let pos_b = seg_to.xyz;
    let alpha = seg_from.w;

    let span = pos_b - pos_a;
    if length(span) < 0.001 {
        // Coincident endpoints have no direction; park the quad off-screen.
        out.clip_position = vec4<f32>(0.0, 0.0, -1000.0, 1.0);
        out.alpha = 0.0;
        return out;
    }

    let line_dir = normalize(span);

    var perp = cross(line_dir, vec3<f32>(0.0, 1.0, 0.0));
    if length(perp) < 0.001 {
        perp = cross(line_dir, vec3<f32>(1.0, 0.0, 0.0));
    }
    perp = normalize(perp) * HALF_WIDTH;

    var pos: vec3<f32>;
    switch vertex_index {
        case 0u: { pos = pos_a - perp; }
        case 1u: { pos = pos_a + perp; }
        case 2u: { pos = pos_b - perp; }
        case 3u: { pos = pos_a + perp; }
        case 4u: { pos = pos_b - perp; }
        default: { pos = pos_b + perp; }
    }

    out.clip_position = uniforms.view_proj * vec4<f32>(pos, 1.0);
    out.alpha = alpha;

    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return vec4<f32>(params.color, in.alpha);
}
"#;
