//! Conversions between instants, signed durations and milliseconds

use chrono::TimeDelta;
use std::time::Instant;

const NANOS_PER_MILLI: i64 = 1_000_000;

/// Signed time from `start` to `end`. Negative when `end` precedes `start`.
pub fn elapsed(start: Instant, end: Instant) -> TimeDelta {
    if end >= start {
        TimeDelta::from_std(end - start).unwrap_or(TimeDelta::MAX)
    } else {
        TimeDelta::from_std(start - end).map_or(TimeDelta::MIN, |d| -d)
    }
}

/// Whole milliseconds from `start` to `end`
pub fn elapsed_ms(start: Instant, end: Instant) -> f64 {
    duration_to_ms(elapsed(start, end))
}

/// Integer division of nanoseconds by 1,000,000, truncating toward zero.
///
/// Durations beyond the `i64` nanosecond range (about 292 years) fall back
/// to chrono's millisecond count, which truncates the same way.
pub fn duration_to_ms(duration: TimeDelta) -> f64 {
    let millis = duration
        .num_nanoseconds()
        .map_or_else(|| duration.num_milliseconds(), |n| n / NANOS_PER_MILLI);
    millis as f64
}
