//! Interactive cursor-trail glow over a grid of rounded cells.
//!
//! Pointer motion is recorded into a short, time-stamped trail. Each frame the
//! trail is aged, packed into a uniform block and handed to a single fragment
//! shader that outlines every cell near a recent pointer position:
//!
//! ```text
//!   host events (pointer, resize, frame callbacks)
//!          │
//!          ▼
//!   GridGlow ──▶ RenderLoop ──▶ Trail::expire ──▶ UniformBuffer::rebuild
//!      │              │                                    │
//!      │              └─▶ FrameScheduler::request_frame    ▼
//!      └─▶ HostBindings              RenderSurface::draw ──▶ fs_main
//! ```
//!
//! Animation is demand-driven: a frame is only requested while the trail still
//! has points to fade. [`GridGlow`] owns the mount lifecycle and releases the
//! frame request, host listeners and GPU resources in that order on detach.
//! The [`gpu`] module provides the wgpu surface and [`run_window`] hosts the
//! whole thing in a `winit` window.

mod controller;
mod error;
mod frames;
pub mod gpu;
mod render_loop;
pub mod shader;
mod surface;
mod trail;
mod types;
mod uniforms;
mod window;

#[cfg(test)]
mod testing;

pub use controller::{GridGlow, HostBindings, LifecycleState};
pub use error::{EffectError, ShaderStage};
pub use frames::{FrameHandle, FrameScheduler};
pub use render_loop::{RenderLoop, TickOutcome};
pub use surface::{RenderSurface, SurfaceTarget};
pub use trail::{Trail, TrailPoint};
pub use types::{
    ContainerRect, GpuOptions, GpuPowerPreference, PresentMode, SurfaceSize, BORDER_WIDTH,
    CORNER_RADIUS, GRID_GAP, GRID_SIZE, HIGHLIGHT_COLOR, HOVER_RADIUS, SLOT_STRIDE,
    TRAIL_DURATION, TRAIL_MAX, TRAIL_MIN_DIST,
};
pub use uniforms::{influence, UniformBuffer};
pub use window::{run_window, WindowBindings, WindowFrames, WindowGlow, WindowOptions};
