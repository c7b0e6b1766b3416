use std::time::Instant;

use tracing::trace;

use crate::error::EffectError;
use crate::frames::{FrameHandle, FrameScheduler};
use crate::surface::RenderSurface;
use crate::trail::Trail;
use crate::uniforms::UniformBuffer;

/// Result of delivering a frame callback to [`RenderLoop::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Drew a frame and requested another one.
    Continued,
    /// Drew a frame with an empty trail; no further frame was requested.
    Idle,
    /// The callback did not match the outstanding request and was ignored.
    Stale,
}

/// Demand-driven animation state: the trail, its uniform image, and the one
/// outstanding frame request (if any).
#[derive(Debug, Default)]
pub struct RenderLoop {
    trail: Trail,
    uniforms: UniformBuffer,
    pending: Option<FrameHandle>,
}

impl RenderLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trail(&self) -> &Trail {
        &self.trail
    }

    pub fn uniforms(&self) -> &UniformBuffer {
        &self.uniforms
    }

    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.pending
    }

    /// Records a pointer sample and wakes the loop when it was kept.
    pub fn record<F>(&mut self, x: f32, y: f32, now: Instant, scheduler: &mut F) -> bool
    where
        F: FrameScheduler + ?Sized,
    {
        let recorded = self.trail.record(x, y, now);
        if recorded {
            self.ensure_running(scheduler);
        }
        recorded
    }

    /// Requests a frame if the trail still has something to fade and none is
    /// outstanding.
    pub fn ensure_running<F>(&mut self, scheduler: &mut F)
    where
        F: FrameScheduler + ?Sized,
    {
        if self.pending.is_none() && !self.trail.is_empty() {
            let handle = scheduler.request_frame();
            trace!(handle = handle.0, "requested frame");
            self.pending = Some(handle);
        }
    }

    /// Frame callback: expire, rebuild uniforms, draw once, then reschedule
    /// only while the trail is non-empty.
    pub fn tick<S, F>(
        &mut self,
        handle: FrameHandle,
        now: Instant,
        surface: &mut S,
        scheduler: &mut F,
    ) -> Result<TickOutcome, EffectError>
    where
        S: RenderSurface + ?Sized,
        F: FrameScheduler + ?Sized,
    {
        if self.pending != Some(handle) {
            trace!(handle = handle.0, "ignoring stale frame callback");
            return Ok(TickOutcome::Stale);
        }
        self.pending = None;

        let drawn = self.redraw(now, surface);

        let outcome = if self.trail.is_empty() {
            trace!("trail drained; animation idle");
            TickOutcome::Idle
        } else {
            self.ensure_running(scheduler);
            TickOutcome::Continued
        };

        drawn.map(|()| outcome)
    }

    /// Renders the current state once without touching the schedule.
    pub fn redraw<S>(&mut self, now: Instant, surface: &mut S) -> Result<(), EffectError>
    where
        S: RenderSurface + ?Sized,
    {
        self.trail.expire(now);
        self.uniforms.rebuild(&self.trail, now);
        surface.draw(&self.uniforms)
    }

    /// Cancels the outstanding frame request, if any.
    pub fn cancel<F>(&mut self, scheduler: &mut F)
    where
        F: FrameScheduler + ?Sized,
    {
        if let Some(handle) = self.pending.take() {
            trace!(handle = handle.0, "cancelled frame");
            scheduler.cancel_frame(handle);
        }
    }
}
