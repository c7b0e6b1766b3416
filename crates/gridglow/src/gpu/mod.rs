//! wgpu implementation of the render surface.
//!
//! - `context` owns the wgpu instance/device/surface wiring and reconfigures
//!   the swapchain when the container resizes.
//! - `pipeline` compiles the WGSL stages inside validation error scopes and
//!   links them into the single render pipeline.
//! - `uniforms` mirrors the std140 block read by the fragment stage.
//! - `state` glues everything into [`GpuSurface`], the `RenderSurface` used
//!   by the controller, and [`GpuTarget`], which creates it from a window.

mod context;
mod pipeline;
mod state;
mod uniforms;

pub use state::{GpuSurface, GpuTarget};
