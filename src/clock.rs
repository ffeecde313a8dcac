//! Time sources for the stopwatch
//!
//! Production code reads the monotonic system clock. Tests drive a
//! [`ManualClock`] so that recorded instants are exact.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Source of instants
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Monotonic wall-clock time via `Instant::now()`
#[derive(Debug, Clone, Copy, Default)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    #[inline]
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to.
///
/// Clones share the same timeline, so a test can keep one handle and give
/// another to a [`Stopwatch`](crate::Stopwatch).
#[derive(Debug, Clone)]
pub struct ManualClock {
    origin: Instant,
    current: Arc<Mutex<Instant>>,
}

impl ManualClock {
    pub fn new() -> Self {
        let origin = Instant::now();
        Self {
            origin,
            current: Arc::new(Mutex::new(origin)),
        }
    }

    /// Move the clock forward
    pub fn advance(&self, by: Duration) {
        let mut current = self.current.lock();
        *current += by;
    }

    /// Time advanced since the clock was created
    pub fn offset(&self) -> Duration {
        *self.current.lock() - self.origin
    }

    /// The instant the clock started at
    pub fn origin(&self) -> Instant {
        self.origin
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.current.lock()
    }
}
