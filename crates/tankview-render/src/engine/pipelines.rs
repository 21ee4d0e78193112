//! Pipeline creation for the render engine.

use crate::node_render::PipelineKind;

use super::{CAMERA_UNIFORM_SIZE, DEPTH_FORMAT, LIGHT_UNIFORM_SIZE, NODE_UNIFORM_SIZE};

fn uniform_entry(
    binding: u32,
    min_binding_size: Option<std::num::NonZeroU64>,
) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size,
        },
        count: None,
    }
}

fn storage_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::VERTEX,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Storage { read_only: true },
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

/// The pipeline variants used to draw scene nodes.
pub struct ScenePipelines {
    /// Bind group layout shared by every variant.
    pub bind_group_layout: wgpu::BindGroupLayout,
    cull_back: wgpu::RenderPipeline,
    cull_front: wgpu::RenderPipeline,
    cull_none: wgpu::RenderPipeline,
    lines: wgpu::RenderPipeline,
}

impl ScenePipelines {
    /// Creates all variants for the given color target format.
    #[must_use]
    pub fn new(device: &wgpu::Device, color_format: wgpu::TextureFormat) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/scene.wgsl").into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene bind group layout"),
            entries: &[
                uniform_entry(0, CAMERA_UNIFORM_SIZE),
                uniform_entry(1, LIGHT_UNIFORM_SIZE),
                uniform_entry(2, NODE_UNIFORM_SIZE),
                storage_entry(3),
                storage_entry(4),
            ],
        });

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let create = |label: &str, topology: wgpu::PrimitiveTopology, cull_mode: Option<wgpu::Face>| {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: color_format,
                        blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: DEPTH_FORMAT,
                    depth_write_enabled: true,
                    depth_compare: wgpu::CompareFunction::LessEqual,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            })
        };

        let triangles = wgpu::PrimitiveTopology::TriangleList;
        Self {
            cull_back: create("surface pipeline (front)", triangles, Some(wgpu::Face::Back)),
            cull_front: create("surface pipeline (back)", triangles, Some(wgpu::Face::Front)),
            cull_none: create("surface pipeline (double)", triangles, None),
            lines: create("line pipeline", wgpu::PrimitiveTopology::LineList, None),
            bind_group_layout,
        }
    }

    /// Returns the pipeline for a variant.
    #[must_use]
    pub fn get(&self, kind: PipelineKind) -> &wgpu::RenderPipeline {
        match kind {
            PipelineKind::CullBack => &self.cull_back,
            PipelineKind::CullFront => &self.cull_front,
            PipelineKind::CullNone => &self.cull_none,
            PipelineKind::Lines => &self.lines,
        }
    }
}
