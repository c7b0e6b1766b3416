use std::cell::Cell;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{anyhow, Context, Result};
use tracing::{debug, error, info};
use winit::dpi::PhysicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::{Window, WindowBuilder};

use crate::controller::{GridGlow, HostBindings};
use crate::frames::{FrameHandle, FrameScheduler, HandleCounter};
use crate::gpu::{GpuSurface, GpuTarget};
use crate::types::{ContainerRect, GpuOptions, SurfaceSize};

/// Settings for the native preview window that hosts the effect.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowOptions {
    pub size: SurfaceSize,
    pub title: String,
    pub transparent: bool,
    pub gpu: GpuOptions,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            size: SurfaceSize::new(1280, 720),
            title: "Hero".to_string(),
            transparent: true,
            gpu: GpuOptions::default(),
        }
    }
}

/// Frame requests waiting for the next `RedrawRequested`.
///
/// winit coalesces redraw requests, so at most one handle is due at a time.
#[derive(Debug, Default)]
pub(crate) struct RedrawQueue {
    counter: HandleCounter,
    due: Cell<Option<FrameHandle>>,
}

impl RedrawQueue {
    pub(crate) fn push(&mut self) -> FrameHandle {
        let handle = self.counter.next();
        self.due.set(Some(handle));
        handle
    }

    pub(crate) fn cancel(&mut self, handle: FrameHandle) {
        if self.due.get() == Some(handle) {
            self.due.set(None);
        }
    }

    /// Handle owed to the redraw being delivered now, if any.
    pub(crate) fn take_due(&self) -> Option<FrameHandle> {
        self.due.take()
    }
}

/// [`FrameScheduler`] backed by `Window::request_redraw`.
pub struct WindowFrames {
    window: Arc<Window>,
    queue: RedrawQueue,
}

impl WindowFrames {
    pub fn new(window: Arc<Window>) -> Self {
        Self {
            window,
            queue: RedrawQueue::default(),
        }
    }

    pub fn take_due(&self) -> Option<FrameHandle> {
        self.queue.take_due()
    }
}

impl FrameScheduler for WindowFrames {
    fn request_frame(&mut self) -> FrameHandle {
        let handle = self.queue.push();
        self.window.request_redraw();
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.queue.cancel(handle);
    }
}

/// Gates which window events the event loop forwards to the controller.
#[derive(Debug, Default)]
pub struct WindowBindings {
    observing_resize: bool,
    pointer_listeners: bool,
}

impl WindowBindings {
    pub fn observing_resize(&self) -> bool {
        self.observing_resize
    }

    pub fn pointer_listeners(&self) -> bool {
        self.pointer_listeners
    }
}

impl HostBindings for WindowBindings {
    fn observe_resize(&mut self) {
        self.observing_resize = true;
    }

    fn disconnect_resize(&mut self) {
        self.observing_resize = false;
    }

    fn add_pointer_listeners(&mut self) {
        self.pointer_listeners = true;
    }

    fn remove_pointer_listeners(&mut self) {
        self.pointer_listeners = false;
    }
}

pub type WindowGlow = GridGlow<GpuSurface, WindowFrames, WindowBindings>;

fn container_for(size: PhysicalSize<u32>) -> ContainerRect {
    ContainerRect::from_size(f64::from(size.width), f64::from(size.height))
}

/// Opens a window, mounts the grid effect on its client area and drives the
/// `winit` event loop until the window closes.
///
/// Shader failures are logged and the window stays open without the effect.
pub fn run_window(options: WindowOptions) -> Result<()> {
    let event_loop = EventLoop::new().context("failed to initialize event loop")?;
    let window = WindowBuilder::new()
        .with_title(options.title.clone())
        .with_inner_size(PhysicalSize::new(options.size.width, options.size.height))
        .with_transparent(options.transparent)
        .build(&event_loop)
        .context("failed to create hero window")?;
    let window = Arc::new(window);

    let mut glow = match WindowGlow::attach(
        Some(GpuTarget::new(window.clone(), options.gpu)),
        Some(container_for(window.inner_size())),
        WindowFrames::new(window.clone()),
        WindowBindings::default(),
        Instant::now(),
    ) {
        Ok(glow) => Some(glow),
        Err(err) => {
            error!(error = %err, "grid effect failed to start");
            None
        }
    };
    info!(
        title = %options.title,
        active = glow.as_ref().is_some_and(WindowGlow::is_active),
        "hero window ready"
    );

    event_loop
        .run(move |event, elwt| {
            elwt.set_control_flow(ControlFlow::Wait);

            match event {
                Event::WindowEvent { window_id, event } if window_id == window.id() => {
                    match event {
                        WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                            if let Some(glow) = glow.as_mut() {
                                glow.detach();
                            }
                            elwt.exit();
                        }
                        WindowEvent::CursorMoved { position, .. } => {
                            if let Some(glow) = glow.as_mut() {
                                if glow.bindings().pointer_listeners() {
                                    glow.pointer_move(position.x, position.y, Instant::now());
                                }
                            }
                        }
                        WindowEvent::CursorLeft { .. } => {
                            if let Some(glow) = glow.as_mut() {
                                if glow.bindings().pointer_listeners() {
                                    glow.pointer_leave();
                                }
                            }
                        }
                        WindowEvent::Resized(new_size) => {
                            if new_size.width == 0 || new_size.height == 0 {
                                debug!("window minimised; keeping previous surface size");
                                return;
                            }
                            if let Some(glow) = glow.as_mut() {
                                if glow.bindings().observing_resize() {
                                    glow.resize(container_for(new_size), Instant::now());
                                }
                            }
                        }
                        WindowEvent::RedrawRequested => {
                            if let Some(glow) = glow.as_mut() {
                                let now = Instant::now();
                                match glow.scheduler().take_due() {
                                    Some(handle) => {
                                        glow.frame(handle, now);
                                    }
                                    None => glow.redraw(now),
                                }
                            }
                        }
                        _ => {}
                    }
                }
                Event::LoopExiting => {
                    if let Some(glow) = glow.as_mut() {
                        glow.detach();
                    }
                }
                _ => {}
            }
        })
        .map_err(|err| anyhow!("event loop error: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_tracks_latest_request() {
        let mut queue = RedrawQueue::default();
        let first = queue.push();
        let second = queue.push();
        assert_ne!(first, second);
        assert_eq!(queue.take_due(), Some(second));
        assert_eq!(queue.take_due(), None);
    }

    #[test]
    fn cancel_only_clears_matching_handle() {
        let mut queue = RedrawQueue::default();
        let stale = queue.push();
        let live = queue.push();

        queue.cancel(stale);
        assert_eq!(queue.take_due(), Some(live));

        let pending = queue.push();
        queue.cancel(pending);
        assert_eq!(queue.take_due(), None);
    }

    #[test]
    fn bindings_follow_host_calls() {
        let mut bindings = WindowBindings::default();
        assert!(!bindings.observing_resize());
        bindings.observe_resize();
        bindings.add_pointer_listeners();
        assert!(bindings.observing_resize() && bindings.pointer_listeners());

        bindings.disconnect_resize();
        bindings.remove_pointer_listeners();
        assert!(!bindings.observing_resize());
        assert!(!bindings.pointer_listeners());
    }

    #[test]
    fn container_covers_client_area() {
        let rect = container_for(PhysicalSize::new(800, 600));
        assert_eq!(rect.surface_size(), SurfaceSize::new(800, 600));
        assert_eq!(rect.to_surface(0.0, 0.0), (0.0, 600.0));
    }
}
