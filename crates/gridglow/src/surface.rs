use crate::error::EffectError;
use crate::types::SurfaceSize;
use crate::uniforms::UniformBuffer;

/// A drawable bound to the effect's container.
///
/// Implementations own the graphics context and every persistent GPU object.
pub trait RenderSurface {
    /// Rebinds the backing store to `size` pixels. Zero-sized requests are
    /// ignored.
    fn resize(&mut self, size: SurfaceSize);

    /// Issues one fullscreen draw with the supplied trail uniforms.
    fn draw(&mut self, uniforms: &UniformBuffer) -> Result<(), EffectError>;

    /// Releases every GPU object. Called exactly once, after all pending
    /// frame callbacks have been cancelled.
    fn teardown(&mut self);
}

/// Something a [`RenderSurface`] can be created from, e.g. a window.
pub trait SurfaceTarget {
    type Surface: RenderSurface;

    /// Acquires the drawing context and compiles the effect.
    ///
    /// Returns [`EffectError::Unsupported`] when no suitable context exists,
    /// and `Compile`/`Link` errors for broken shader sources.
    fn initialize(self, size: SurfaceSize) -> Result<Self::Surface, EffectError>;
}
