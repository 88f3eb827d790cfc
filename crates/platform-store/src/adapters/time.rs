//! # Time Adapters

use std::sync::atomic::{AtomicU64, Ordering};

use shared_types::Timestamp;

use crate::ports::TimeSource;

/// Default time source using system time.
#[derive(Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Timestamp {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}

/// Settable clock for tests.
pub struct FixedTimeSource {
    now: AtomicU64,
}

impl FixedTimeSource {
    /// Creates a clock frozen at `at`.
    pub fn at(at: Timestamp) -> Self {
        Self {
            now: AtomicU64::new(at),
        }
    }

    /// Moves the clock.
    pub fn set(&self, at: Timestamp) {
        self.now.store(at, Ordering::SeqCst);
    }
}

impl TimeSource for FixedTimeSource {
    fn now(&self) -> Timestamp {
        self.now.load(Ordering::SeqCst)
    }
}
