/// Identifies one outstanding frame request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Platform hook for demand-driven animation.
///
/// A request asks the host to deliver exactly one frame callback later on the
/// same thread. Cancelling guarantees the callback for that handle is never
/// acted upon.
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameHandle;
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Monotonic handle source shared by scheduler implementations.
#[derive(Debug, Default)]
pub(crate) struct HandleCounter {
    next: u64,
}

impl HandleCounter {
    pub(crate) fn next(&mut self) -> FrameHandle {
        self.next = self.next.wrapping_add(1);
        FrameHandle(self.next)
    }
}
