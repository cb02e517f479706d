use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// One-shot event flag shared between an event source and the block callback.
///
/// Any number of `trigger` calls between two `take`s collapse into one
/// event. Both sides are lock-free, so the audio thread never waits on the
/// UI thread.
#[derive(Debug, Clone, Default)]
pub struct EventLatch {
    flag: Arc<AtomicBool>,
}

impl EventLatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger(&self) {
        self.flag.store(true, Ordering::Release);
    }

    /// Read-and-clear in one atomic step.
    pub fn take(&self) -> bool {
        self.flag.swap(false, Ordering::AcqRel)
    }
}
