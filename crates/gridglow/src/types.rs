use std::time::Duration;

/// Maximum number of trail samples kept (and uploaded) at any time.
pub const TRAIL_MAX: usize = 50;

/// Age at which a trail sample stops contributing and is dropped.
pub const TRAIL_DURATION: Duration = Duration::from_millis(500);

/// Minimum spacing, in surface pixels, between a new sample and the most recent one.
pub const TRAIL_MIN_DIST: f32 = 8.0;

/// Grid pitch in surface pixels.
pub const GRID_SIZE: f32 = 48.0;

/// Inset between neighbouring cells.
pub const GRID_GAP: f32 = 4.0;

/// Corner radius of each rounded cell.
pub const CORNER_RADIUS: f32 = 6.0;

/// Thickness of the glowing ring drawn inside each cell boundary.
pub const BORDER_WIDTH: f32 = 4.0;

/// Distance from a trail sample at which its glow has faded to nothing.
pub const HOVER_RADIUS: f32 = 100.0;

/// Highlight colour `#8E3201`, fully opaque, as non-premultiplied RGBA.
pub const HIGHLIGHT_COLOR: [f32; 4] = [142.0 / 255.0, 50.0 / 255.0, 1.0 / 255.0, 1.0];

/// Floats per uniform slot: `x`, `y`, `influence`.
pub const SLOT_STRIDE: usize = 3;

/// Backing pixel dimensions of the render surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Bounding box of the element that hosts the effect, in the same pixel
/// space as incoming pointer positions (origin top-left, `y` downwards).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContainerRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ContainerRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Container anchored at the origin, e.g. a window's client area.
    pub fn from_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Content box rounded to whole backing pixels.
    pub fn surface_size(&self) -> SurfaceSize {
        SurfaceSize::new(
            self.width.max(0.0).round() as u32,
            self.height.max(0.0).round() as u32,
        )
    }

    /// Maps a pointer position to surface coordinates with `y` pointing up.
    pub fn to_surface(&self, client_x: f64, client_y: f64) -> (f32, f32) {
        let x = client_x - self.left;
        let y = self.height - (client_y - self.top);
        (x as f32, y as f32)
    }
}

/// Adapter selection hint forwarded to wgpu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GpuPowerPreference {
    #[default]
    Low,
    High,
}

/// Presentation pacing for the swapchain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PresentMode {
    /// Use FIFO when the surface advertises it, otherwise the first supported mode.
    #[default]
    Auto,
    Fifo,
    Mailbox,
    Immediate,
}

/// Options that shape how the GPU surface is acquired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GpuOptions {
    pub power: GpuPowerPreference,
    pub present_mode: PresentMode,
}
