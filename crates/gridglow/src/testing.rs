//! In-memory stand-ins for the platform seams, recording every call.

use std::cell::RefCell;
use std::rc::Rc;

use crate::controller::HostBindings;
use crate::error::{EffectError, ShaderStage};
use crate::frames::{FrameHandle, FrameScheduler, HandleCounter};
use crate::surface::{RenderSurface, SurfaceTarget};
use crate::types::SurfaceSize;
use crate::uniforms::UniformBuffer;

#[derive(Debug, Clone, Default)]
pub(crate) struct CallLog(Rc<RefCell<Vec<String>>>);

impl CallLog {
    pub(crate) fn push(&self, entry: impl Into<String>) {
        self.0.borrow_mut().push(entry.into());
    }

    pub(crate) fn entries(&self) -> Vec<String> {
        self.0.borrow().clone()
    }
}

pub(crate) struct FakeSurface {
    log: CallLog,
    pub(crate) size: SurfaceSize,
    pub(crate) draws: Vec<UniformBuffer>,
    pub(crate) torn_down: u32,
}

impl FakeSurface {
    pub(crate) fn new(log: CallLog) -> Self {
        Self {
            log,
            size: SurfaceSize::default(),
            draws: Vec::new(),
            torn_down: 0,
        }
    }
}

impl RenderSurface for FakeSurface {
    fn resize(&mut self, size: SurfaceSize) {
        if size.is_empty() {
            return;
        }
        self.log.push(format!("resize {}x{}", size.width, size.height));
        self.size = size;
    }

    fn draw(&mut self, uniforms: &UniformBuffer) -> Result<(), EffectError> {
        self.log.push("draw");
        self.draws.push(uniforms.clone());
        Ok(())
    }

    fn teardown(&mut self) {
        self.log.push("teardown");
        self.torn_down += 1;
    }
}

/// Shares a [`FakeSurface`] between the controller and the test body.
#[derive(Clone)]
pub(crate) struct SharedSurface(pub(crate) Rc<RefCell<FakeSurface>>);

impl RenderSurface for SharedSurface {
    fn resize(&mut self, size: SurfaceSize) {
        self.0.borrow_mut().resize(size);
    }

    fn draw(&mut self, uniforms: &UniformBuffer) -> Result<(), EffectError> {
        self.0.borrow_mut().draw(uniforms)
    }

    fn teardown(&mut self) {
        self.0.borrow_mut().teardown();
    }
}

pub(crate) enum TargetOutcome {
    Ready,
    Unsupported,
    CompileFailure,
}

pub(crate) struct FakeTarget {
    pub(crate) surface: SharedSurface,
    pub(crate) outcome: TargetOutcome,
}

impl FakeTarget {
    pub(crate) fn new(log: CallLog, outcome: TargetOutcome) -> Self {
        Self {
            surface: SharedSurface(Rc::new(RefCell::new(FakeSurface::new(log)))),
            outcome,
        }
    }
}

impl SurfaceTarget for FakeTarget {
    type Surface = SharedSurface;

    fn initialize(self, _size: SurfaceSize) -> Result<Self::Surface, EffectError> {
        match self.outcome {
            TargetOutcome::Ready => Ok(self.surface),
            TargetOutcome::Unsupported => {
                Err(EffectError::Unsupported("no adapter in test".into()))
            }
            TargetOutcome::CompileFailure => Err(EffectError::Compile {
                stage: ShaderStage::Fragment,
                log: "error: expected ';'".into(),
            }),
        }
    }
}

pub(crate) struct FakeScheduler {
    log: CallLog,
    counter: HandleCounter,
    pub(crate) requested: Vec<FrameHandle>,
    pub(crate) cancelled: Vec<FrameHandle>,
}

impl FakeScheduler {
    pub(crate) fn new(log: CallLog) -> Self {
        Self {
            log,
            counter: HandleCounter::default(),
            requested: Vec::new(),
            cancelled: Vec::new(),
        }
    }
}

impl FrameScheduler for FakeScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        let handle = self.counter.next();
        self.log.push(format!("request {}", handle.0));
        self.requested.push(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.log.push(format!("cancel {}", handle.0));
        self.cancelled.push(handle);
    }
}

pub(crate) struct FakeBindings {
    log: CallLog,
}

impl FakeBindings {
    pub(crate) fn new(log: CallLog) -> Self {
        Self { log }
    }
}

impl HostBindings for FakeBindings {
    fn observe_resize(&mut self) {
        self.log.push("observe resize");
    }

    fn disconnect_resize(&mut self) {
        self.log.push("disconnect resize");
    }

    fn add_pointer_listeners(&mut self) {
        self.log.push("add pointer listeners");
    }

    fn remove_pointer_listeners(&mut self) {
        self.log.push("remove pointer listeners");
    }
}
