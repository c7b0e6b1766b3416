use raw_window_handle::{HasDisplayHandle, HasWindowHandle};
use tracing::{debug, trace, warn};

use crate::error::EffectError;
use crate::surface::{RenderSurface, SurfaceTarget};
use crate::types::{GpuOptions, SurfaceSize};
use crate::uniforms::UniformBuffer;

use super::context::GpuContext;
use super::pipeline::GridPipeline;
use super::uniforms::GpuTrailBlock;

/// Window (or any raw-handle provider) the grid surface will be created on.
pub struct GpuTarget<W> {
    window: W,
    options: GpuOptions,
}

impl<W> GpuTarget<W> {
    pub fn new(window: W, options: GpuOptions) -> Self {
        Self { window, options }
    }
}

impl<W> SurfaceTarget for GpuTarget<W>
where
    W: HasDisplayHandle + HasWindowHandle + Send + Sync + 'static,
{
    type Surface = GpuSurface;

    fn initialize(self, size: SurfaceSize) -> Result<GpuSurface, EffectError> {
        GpuSurface::new(self.window, size, self.options)
    }
}

/// wgpu-backed [`RenderSurface`]: one pipeline, one uniform buffer, one
/// fullscreen quad.
pub struct GpuSurface {
    context: GpuContext,
    pipeline: Option<GridPipeline>,
    block: GpuTrailBlock,
}

impl GpuSurface {
    pub fn new<W>(window: W, size: SurfaceSize, options: GpuOptions) -> Result<Self, EffectError>
    where
        W: HasDisplayHandle + HasWindowHandle + Send + Sync + 'static,
    {
        let context = GpuContext::new(window, size, options)?;
        let pipeline = GridPipeline::new(
            &context.device,
            context.surface_format,
            std::mem::size_of::<GpuTrailBlock>() as u64,
        )?;
        let block = GpuTrailBlock::new(context.size);
        context
            .queue
            .write_buffer(&pipeline.uniform_buffer, 0, bytemuck::bytes_of(&block));

        Ok(Self {
            context,
            pipeline: Some(pipeline),
            block,
        })
    }

    pub fn size(&self) -> SurfaceSize {
        self.context.size
    }

    fn acquire_frame(&mut self) -> Result<Option<wgpu::SurfaceTexture>, EffectError> {
        match self.context.surface.get_current_texture() {
            Ok(frame) => Ok(Some(frame)),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                debug!("surface lost or outdated; reconfiguring");
                self.context.reconfigure();
                Ok(None)
            }
            Err(wgpu::SurfaceError::Timeout) => {
                trace!("surface timeout; skipping frame");
                Ok(None)
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                Err(EffectError::Surface("out of memory".into()))
            }
            Err(other) => {
                warn!(error = ?other, "surface error; skipping frame");
                Ok(None)
            }
        }
    }
}

impl RenderSurface for GpuSurface {
    fn resize(&mut self, size: SurfaceSize) {
        if size.is_empty() {
            return;
        }
        self.context.resize(size);
        self.block.set_resolution(self.context.size);
    }

    fn draw(&mut self, uniforms: &UniformBuffer) -> Result<(), EffectError> {
        if self.pipeline.is_none() {
            return Ok(());
        }
        let Some(frame) = self.acquire_frame()? else {
            return Ok(());
        };
        let Some(pipeline) = self.pipeline.as_ref() else {
            return Ok(());
        };

        self.block.load(uniforms);
        self.context.queue.write_buffer(
            &pipeline.uniform_buffer,
            0,
            bytemuck::bytes_of(&self.block),
        );

        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder =
            self.context
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("grid encoder"),
                });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("grid pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            render_pass.set_pipeline(&pipeline.pipeline);
            render_pass.set_bind_group(0, &pipeline.bind_group, &[]);
            render_pass.set_vertex_buffer(0, pipeline.vertex_buffer.slice(..));
            render_pass.draw(0..6, 0..1);
        }

        self.context.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }

    fn teardown(&mut self) {
        if let Some(pipeline) = self.pipeline.take() {
            pipeline.destroy();
            debug!("released grid pipeline, shader modules and buffers");
        }
    }
}
