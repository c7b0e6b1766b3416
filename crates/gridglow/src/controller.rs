use std::mem;
use std::time::Instant;

use tracing::{debug, error, warn};

use crate::error::EffectError;
use crate::frames::{FrameHandle, FrameScheduler};
use crate::render_loop::{RenderLoop, TickOutcome};
use crate::surface::{RenderSurface, SurfaceTarget};
use crate::trail::Trail;
use crate::types::ContainerRect;

/// Host-side event wiring owned by the controller.
///
/// The host only forwards resize and pointer events while the matching
/// observer or listeners are attached.
pub trait HostBindings {
    fn observe_resize(&mut self);
    fn disconnect_resize(&mut self);
    fn add_pointer_listeners(&mut self);
    fn remove_pointer_listeners(&mut self);
}

/// Observable lifecycle of a [`GridGlow`] instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Uninitialized,
    Active,
    TornDown,
}

enum Lifecycle<S> {
    Uninitialized,
    Active(Active<S>),
    TornDown,
}

struct Active<S> {
    surface: S,
    container: ContainerRect,
    render: RenderLoop,
}

/// Binds the grid effect to one container for the lifetime of a mount.
///
/// `Uninitialized -> Active -> TornDown`; torn-down instances never come back,
/// a fresh mount builds a fresh controller.
pub struct GridGlow<S, F, B>
where
    S: RenderSurface,
    F: FrameScheduler,
    B: HostBindings,
{
    lifecycle: Lifecycle<S>,
    scheduler: F,
    bindings: B,
}

impl<S, F, B> GridGlow<S, F, B>
where
    S: RenderSurface,
    F: FrameScheduler,
    B: HostBindings,
{
    /// Mounts the effect.
    ///
    /// A missing target or container leaves the controller `Uninitialized`,
    /// as does an environment without a usable rendering context (logged as
    /// a warning). Shader compile and link failures are returned.
    pub fn attach<T>(
        target: Option<T>,
        container: Option<ContainerRect>,
        scheduler: F,
        bindings: B,
        now: Instant,
    ) -> Result<Self, EffectError>
    where
        T: SurfaceTarget<Surface = S>,
    {
        let mut controller = Self {
            lifecycle: Lifecycle::Uninitialized,
            scheduler,
            bindings,
        };

        let (Some(target), Some(container)) = (target, container) else {
            debug!("surface or container not ready; grid effect stays inactive");
            return Ok(controller);
        };

        let size = container.surface_size();
        let mut surface = match target.initialize(size) {
            Ok(surface) => surface,
            Err(err) if err.is_unsupported() => {
                warn!(error = %err, "grid effect disabled");
                return Ok(controller);
            }
            Err(err) => return Err(err),
        };

        controller.bindings.observe_resize();
        controller.bindings.add_pointer_listeners();

        surface.resize(size);
        let mut render = RenderLoop::new();
        if let Err(err) = render.redraw(now, &mut surface) {
            warn!(error = %err, "initial grid frame failed");
        }

        debug!(
            width = size.width,
            height = size.height,
            "grid effect active"
        );
        controller.lifecycle = Lifecycle::Active(Active {
            surface,
            container,
            render,
        });
        Ok(controller)
    }

    pub fn state(&self) -> LifecycleState {
        match self.lifecycle {
            Lifecycle::Uninitialized => LifecycleState::Uninitialized,
            Lifecycle::Active(_) => LifecycleState::Active,
            Lifecycle::TornDown => LifecycleState::TornDown,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::Active(_))
    }

    pub fn trail(&self) -> Option<&Trail> {
        match &self.lifecycle {
            Lifecycle::Active(active) => Some(active.render.trail()),
            _ => None,
        }
    }

    pub fn pending_frame(&self) -> Option<FrameHandle> {
        match &self.lifecycle {
            Lifecycle::Active(active) => active.render.pending_frame(),
            _ => None,
        }
    }

    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }

    pub fn bindings(&self) -> &B {
        &self.bindings
    }

    /// Pointer moved to `(client_x, client_y)` in container-relative client
    /// coordinates (`y` down).
    pub fn pointer_move(&mut self, client_x: f64, client_y: f64, now: Instant) {
        let Lifecycle::Active(active) = &mut self.lifecycle else {
            return;
        };
        let (x, y) = active.container.to_surface(client_x, client_y);
        active.render.record(x, y, now, &mut self.scheduler);
    }

    /// Pointer left the container. The trail is kept and left to fade.
    pub fn pointer_leave(&mut self) {
        if let Lifecycle::Active(active) = &mut self.lifecycle {
            active.render.ensure_running(&mut self.scheduler);
        }
    }

    /// Container content box changed: rebind the surface and repaint now.
    pub fn resize(&mut self, container: ContainerRect, now: Instant) {
        let Lifecycle::Active(active) = &mut self.lifecycle else {
            return;
        };
        active.container = container;
        active.surface.resize(container.surface_size());
        if let Err(err) = active.render.redraw(now, &mut active.surface) {
            report_draw_error(&err);
        }
    }

    /// Delivers a frame callback previously requested from the scheduler.
    pub fn frame(&mut self, handle: FrameHandle, now: Instant) -> Option<TickOutcome> {
        let Lifecycle::Active(active) = &mut self.lifecycle else {
            return None;
        };
        match active
            .render
            .tick(handle, now, &mut active.surface, &mut self.scheduler)
        {
            Ok(outcome) => Some(outcome),
            Err(err) => {
                report_draw_error(&err);
                None
            }
        }
    }

    /// Repaints the current state (e.g. after the host exposed the surface)
    /// without touching the animation schedule.
    pub fn redraw(&mut self, now: Instant) {
        if let Lifecycle::Active(active) = &mut self.lifecycle {
            if let Err(err) = active.render.redraw(now, &mut active.surface) {
                report_draw_error(&err);
            }
        }
    }

    /// Unmounts the effect: cancel the pending frame, disconnect the resize
    /// observer, remove pointer listeners, then release GPU resources.
    pub fn detach(&mut self) {
        // Nothing mounted (or already torn down): nothing to release.
        if !self.is_active() {
            return;
        }
        let Lifecycle::Active(mut active) = mem::replace(&mut self.lifecycle, Lifecycle::TornDown)
        else {
            return;
        };

        active.render.cancel(&mut self.scheduler);
        self.bindings.disconnect_resize();
        self.bindings.remove_pointer_listeners();
        active.surface.teardown();
        debug!("grid effect torn down");
    }
}

impl<S, F, B> Drop for GridGlow<S, F, B>
where
    S: RenderSurface,
    F: FrameScheduler,
    B: HostBindings,
{
    fn drop(&mut self) {
        self.detach();
    }
}

fn report_draw_error(err: &EffectError) {
    match err {
        EffectError::Surface(_) => error!(error = %err, "grid surface failed"),
        _ => warn!(error = %err, "failed to draw grid frame"),
    }
}
