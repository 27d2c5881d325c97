use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Single-slot, last-write-wins hand-off between a producer thread and the
/// thread that owns the view.
///
/// Posting over an untaken value drops it; that is the backpressure policy.
/// The count of dropped values is kept for diagnostics.
#[derive(Debug)]
pub struct FrameMailbox<T> {
    slot: Mutex<Option<T>>,
    posted: AtomicU64,
    dropped: AtomicU64,
}

impl<T> Default for FrameMailbox<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FrameMailbox<T> {
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(None),
            posted: AtomicU64::new(0),
            dropped: AtomicU64::new(0),
        }
    }

    // A panicking producer cannot leave the slot half-written.
    fn lock(&self) -> MutexGuard<'_, Option<T>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Stores `value`, replacing any pending one. Returns `true` when a
    /// pending value was dropped.
    pub fn post(&self, value: T) -> bool {
        let replaced = self.lock().replace(value).is_some();
        self.posted.fetch_add(1, Ordering::Relaxed);
        if replaced {
            self.dropped.fetch_add(1, Ordering::Relaxed);
        }
        replaced
    }

    /// Takes the pending value, leaving the slot empty.
    pub fn take(&self) -> Option<T> {
        self.lock().take()
    }

    pub fn is_pending(&self) -> bool {
        self.lock().is_some()
    }

    pub fn posted(&self) -> u64 {
        self.posted.load(Ordering::Relaxed)
    }

    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}
