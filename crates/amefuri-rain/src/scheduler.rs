//! Frame scheduling.

/// Identifies one requested frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

/// Delivers one callback per display refresh.
pub trait FrameScheduler {
    /// Ask for the next frame.
    fn request_frame(&mut self) -> FrameHandle;

    /// Withdraw a request. Stale handles are ignored.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// A scheduler with a single pending slot, polled by the host loop.
#[derive(Debug, Default)]
pub struct FrameQueue {
    next_id: u64,
    pending: Option<FrameHandle>,
    requests: u64,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a frame is waiting to run.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Consume the pending frame, if any.
    pub fn take_due(&mut self) -> Option<FrameHandle> {
        self.pending.take()
    }

    /// Number of frames requested so far.
    pub fn requests(&self) -> u64 {
        self.requests
    }
}

impl FrameScheduler for FrameQueue {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        self.requests += 1;
        let handle = FrameHandle(self.next_id);
        self.pending = Some(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_and_take() {
        let mut queue = FrameQueue::new();
        assert!(queue.take_due().is_none());
        let handle = queue.request_frame();
        assert!(queue.is_pending());
        assert_eq!(queue.take_due(), Some(handle));
        assert!(!queue.is_pending());
        assert_eq!(queue.requests(), 1);
    }

    #[test]
    fn test_handles_are_unique() {
        let mut queue = FrameQueue::new();
        let a = queue.request_frame();
        let b = queue.request_frame();
        assert_ne!(a, b);
        assert_eq!(queue.take_due(), Some(b));
    }

    #[test]
    fn test_cancel_ignores_stale_handle() {
        let mut queue = FrameQueue::new();
        let stale = queue.request_frame();
        let current = queue.request_frame();
        queue.cancel_frame(stale);
        assert!(queue.is_pending());
        queue.cancel_frame(current);
        assert!(!queue.is_pending());
    }
}
