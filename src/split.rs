use chrono::TimeDelta;
use std::time::Instant;

use crate::elapsed::{elapsed, elapsed_ms};

/// A named, closed time interval
#[derive(Debug, Clone, PartialEq)]
pub struct Split {
    /// Split name, unique within a stopwatch
    pub name: String,

    /// When the measured interval began
    pub start_time: Instant,

    /// When the interval was recorded
    pub end_time: Instant,

    /// `end_time - start_time` in whole milliseconds
    pub elapsed_ms: f64,
}

impl Split {
    pub(crate) fn record(name: String, start_time: Instant, end_time: Instant) -> Self {
        Self {
            name,
            start_time,
            end_time,
            elapsed_ms: elapsed_ms(start_time, end_time),
        }
    }

    /// Full-precision duration of this split
    pub fn duration(&self) -> TimeDelta {
        elapsed(self.start_time, self.end_time)
    }
}
