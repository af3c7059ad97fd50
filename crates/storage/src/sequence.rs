//! Global commit sequence
//!
//! Every non-empty persist takes the next number from one counter shared by
//! all streams of an event source, giving commits a total order across
//! streams. Numbers start at 1; 0 means "nothing committed yet".

use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic counter handing out commit sequence numbers
#[derive(Debug, Default)]
pub struct SequenceCounter {
    last: AtomicU64,
}

impl SequenceCounter {
    /// Counter whose first allocation returns `last + 1`
    pub fn new(last: u64) -> Self {
        Self {
            last: AtomicU64::new(last),
        }
    }

    /// Last number handed out
    pub fn current(&self) -> u64 {
        self.last.load(Ordering::SeqCst)
    }

    /// Allocate the next number
    pub fn allocate(&self) -> u64 {
        self.last.fetch_add(1, Ordering::SeqCst) + 1
    }
}
