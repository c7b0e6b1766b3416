use std::borrow::Cow;

use tracing::debug;
use wgpu::util::DeviceExt;

use crate::error::{EffectError, ShaderStage};
use crate::shader::{
    fragment_source, FRAGMENT_ENTRY, QUAD_VERTICES, VERTEX_ENTRY, VERTEX_SHADER_WGSL,
};

/// Compiles one WGSL stage, surfacing validation failures as
/// [`EffectError::Compile`] instead of the device's uncaptured-error panic.
pub(crate) fn compile_shader(
    device: &wgpu::Device,
    stage: ShaderStage,
    source: &str,
) -> Result<wgpu::ShaderModule, EffectError> {
    let label = format!("gridglow {stage}");
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(&label),
        source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(source)),
    });
    if let Some(err) = pollster::block_on(device.pop_error_scope()) {
        return Err(EffectError::Compile {
            stage,
            log: err.to_string(),
        });
    }
    Ok(module)
}

/// Every GPU object the effect keeps for the lifetime of a mount.
pub(crate) struct GridPipeline {
    pub pipeline: wgpu::RenderPipeline,
    pub bind_group: wgpu::BindGroup,
    pub vertex_buffer: wgpu::Buffer,
    pub uniform_buffer: wgpu::Buffer,
    _bind_group_layout: wgpu::BindGroupLayout,
    _vertex_module: wgpu::ShaderModule,
    _fragment_module: wgpu::ShaderModule,
}

impl GridPipeline {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        uniform_size: u64,
    ) -> Result<Self, EffectError> {
        let vertex_module = compile_shader(device, ShaderStage::Vertex, VERTEX_SHADER_WGSL)?;
        let fragment_module = compile_shader(device, ShaderStage::Fragment, &fragment_source())?;

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("trail uniform layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("trail uniform buffer"),
            size: uniform_size,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("trail uniform bind group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("fullscreen quad"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("grid pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("grid pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &vertex_module,
                entry_point: Some(VERTEX_ENTRY),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![0 => Float32x2],
                }],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            // Hard per-pixel decisions: no MSAA.
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            fragment: Some(wgpu::FragmentState {
                module: &fragment_module,
                entry_point: Some(FRAGMENT_ENTRY),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            multiview: None,
            cache: None,
        });
        if let Some(err) = pollster::block_on(device.pop_error_scope()) {
            return Err(EffectError::Link {
                log: err.to_string(),
            });
        }
        debug!(?surface_format, "grid pipeline ready");

        Ok(Self {
            pipeline,
            bind_group,
            vertex_buffer,
            uniform_buffer,
            _bind_group_layout: bind_group_layout,
            _vertex_module: vertex_module,
            _fragment_module: fragment_module,
        })
    }

    /// Frees buffer memory eagerly; remaining handles drop with `self`.
    pub fn destroy(self) {
        self.vertex_buffer.destroy();
        self.uniform_buffer.destroy();
    }
}
