use raw_window_handle::{HasDisplayHandle, HasWindowHandle};
use tracing::{debug, warn};

use crate::error::EffectError;
use crate::types::{GpuOptions, GpuPowerPreference, PresentMode, SurfaceSize};

pub(crate) struct GpuContext {
    _instance: wgpu::Instance,
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub size: SurfaceSize,
    pub surface_format: wgpu::TextureFormat,
    max_dimension: u32,
}

impl GpuContext {
    pub(crate) fn new<T>(
        target: T,
        initial_size: SurfaceSize,
        options: GpuOptions,
    ) -> Result<Self, EffectError>
    where
        T: HasDisplayHandle + HasWindowHandle + Send + Sync + 'static,
    {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            flags: wgpu::InstanceFlags::default(),
            memory_budget_thresholds: wgpu::MemoryBudgetThresholds::default(),
            backend_options: wgpu::BackendOptions::default(),
        });

        let surface = instance.create_surface(target).map_err(|err| {
            EffectError::Unsupported(format!("failed to create rendering surface: {err}"))
        })?;

        let power_preference = match options.power {
            GpuPowerPreference::Low => wgpu::PowerPreference::LowPower,
            GpuPowerPreference::High => wgpu::PowerPreference::HighPerformance,
        };
        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .map_err(|err| EffectError::Unsupported(format!("no suitable GPU adapter: {err}")))?;

        let info = adapter.get_info();
        let limits = adapter.limits();
        debug!(
            name = %info.name,
            backend = ?info.backend,
            device_type = ?info.device_type,
            "selected GPU adapter"
        );

        let surface_caps = surface.get_capabilities(&adapter);
        if surface_caps.formats.is_empty() || surface_caps.alpha_modes.is_empty() {
            return Err(EffectError::Unsupported(
                "surface is not compatible with the selected adapter".into(),
            ));
        }

        // Highlight colour is authored as an sRGB-encoded value; write it as-is.
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|format| !format.is_srgb())
            .unwrap_or(surface_caps.formats[0]);

        let alpha_mode = pick_alpha_mode(&surface_caps.alpha_modes);
        let present_mode = pick_present_mode(options.present_mode, &surface_caps.present_modes);

        let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
            label: Some("gridglow device"),
            required_features: wgpu::Features::empty(),
            required_limits: limits.clone(),
            memory_hints: wgpu::MemoryHints::MemoryUsage,
            trace: wgpu::Trace::default(),
        }))
        .map_err(|err| EffectError::Unsupported(format!("failed to create GPU device: {err}")))?;

        let max_dimension = limits.max_texture_dimension_2d;
        let size = clamp_size(initial_size, max_dimension);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width,
            height: size.height,
            present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        debug!(
            ?surface_format,
            ?alpha_mode,
            ?present_mode,
            width = size.width,
            height = size.height,
            "configured grid surface"
        );

        Ok(Self {
            _instance: instance,
            surface,
            device,
            queue,
            config,
            size,
            surface_format,
            max_dimension,
        })
    }

    pub(crate) fn resize(&mut self, new_size: SurfaceSize) {
        if new_size.is_empty() {
            return;
        }

        self.size = clamp_size(new_size, self.max_dimension);
        self.config.width = self.size.width;
        self.config.height = self.size.height;
        self.surface.configure(&self.device, &self.config);
    }

    /// Re-applies the current configuration after the surface was lost.
    pub(crate) fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }
}

fn clamp_size(size: SurfaceSize, max_dimension: u32) -> SurfaceSize {
    let width = size.width.clamp(1, max_dimension);
    let height = size.height.clamp(1, max_dimension);
    if width != size.width.max(1) || height != size.height.max(1) {
        warn!(
            requested_width = size.width,
            requested_height = size.height,
            max_dimension,
            "surface size exceeds GPU limits; clamping"
        );
    }
    SurfaceSize::new(width, height)
}

/// Prefers straight (non-premultiplied) alpha; the fragment stage writes
/// unpremultiplied colour.
fn pick_alpha_mode(modes: &[wgpu::CompositeAlphaMode]) -> wgpu::CompositeAlphaMode {
    let preferred = [
        wgpu::CompositeAlphaMode::PostMultiplied,
        wgpu::CompositeAlphaMode::Inherit,
    ];
    preferred
        .into_iter()
        .find(|mode| modes.contains(mode))
        .unwrap_or_else(|| {
            let fallback = modes[0];
            warn!(
                ?fallback,
                "surface does not offer non-premultiplied alpha; falling back to {:?}", fallback
            );
            fallback
        })
}

fn pick_present_mode(
    requested: PresentMode,
    supported: &[wgpu::PresentMode],
) -> wgpu::PresentMode {
    let fifo = supported
        .iter()
        .copied()
        .find(|mode| *mode == wgpu::PresentMode::Fifo)
        .unwrap_or_else(|| supported.first().copied().unwrap_or(wgpu::PresentMode::Fifo));

    let wanted = match requested {
        PresentMode::Auto | PresentMode::Fifo => return fifo,
        PresentMode::Mailbox => wgpu::PresentMode::Mailbox,
        PresentMode::Immediate => wgpu::PresentMode::Immediate,
    };

    if supported.contains(&wanted) {
        wanted
    } else {
        warn!(
            requested = ?wanted,
            fallback = ?fifo,
            "requested present mode not supported; falling back"
        );
        fifo
    }
}
