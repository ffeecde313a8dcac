//! Named-split stopwatch
//!
//! A [`Stopwatch`] is either running or paused. While running it keeps one
//! open window; `split` closes that window under a name and immediately opens
//! the next, `pause` closes it without opening another. Recorded splits can
//! be combined afterwards into virtual intervals with [`Stopwatch::elapsed`].

use chrono::TimeDelta;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::Instant;
use tracing::{debug, trace};

use crate::clock::{Clock, MonotonicClock};
use crate::config::StopwatchConfig;
use crate::elapsed::{duration_to_ms, elapsed};
use crate::error::{Result, SplitBound, StopwatchError};
use crate::split::Split;

#[derive(Debug, Default)]
struct State {
    splits: HashMap<String, Split>,

    /// Start of the open window; `None` while paused
    window_start: Option<Instant>,
}

impl State {
    fn running_since(at: Instant) -> Self {
        Self {
            splits: HashMap::new(),
            window_start: Some(at),
        }
    }

    /// Close the open window as `name`. Returns `None` while paused.
    fn close_window(&mut self, name: &str, now: Instant) -> Option<f64> {
        let start = self.window_start?;
        let split = Split::record(name.to_string(), start, now);
        let elapsed_ms = split.elapsed_ms;
        self.splits.insert(name.to_string(), split);
        Some(elapsed_ms)
    }
}

/// Lock-guarded stopwatch recording named splits
#[derive(Debug)]
pub struct Stopwatch<C: Clock = MonotonicClock> {
    clock: C,
    trace_splits: bool,
    state: Mutex<State>,
}

impl Stopwatch<MonotonicClock> {
    /// Idle stopwatch; call [`start`](Self::start) or [`resume`](Self::resume) to run it
    pub fn new() -> Self {
        Self::with_clock(MonotonicClock)
    }

    /// Stopwatch that is already running
    pub fn auto_start() -> Self {
        Self::auto_start_with_clock(MonotonicClock)
    }

    pub fn from_config(config: &StopwatchConfig) -> Self {
        let stopwatch = if config.auto_start {
            Self::auto_start()
        } else {
            Self::new()
        };
        stopwatch.with_split_tracing(config.trace_splits)
    }
}

impl Default for Stopwatch<MonotonicClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Stopwatch<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            trace_splits: true,
            state: Mutex::new(State::default()),
        }
    }

    pub fn auto_start_with_clock(clock: C) -> Self {
        let now = clock.now();
        Self {
            clock,
            trace_splits: true,
            state: Mutex::new(State::running_since(now)),
        }
    }

    /// Enable or disable `debug` events for recorded splits
    #[must_use]
    pub fn with_split_tracing(mut self, enabled: bool) -> Self {
        self.trace_splits = enabled;
        self
    }

    /// Discard all recorded splits and start running from now
    pub fn start(&self) {
        let mut state = self.state.lock();
        *state = State::running_since(self.clock.now());
        drop(state);

        debug!("stopwatch started");
    }

    /// Record the open window as `name` and open the next one at the same
    /// instant.
    ///
    /// Returns the split's elapsed milliseconds, or `0.0` if the stopwatch
    /// is paused, in which case nothing is recorded.
    pub fn split(&self, name: &str) -> f64 {
        self.try_split(name).unwrap_or_else(|_| {
            trace!(split = name, "stopwatch paused, split ignored");
            0.0
        })
    }

    /// Like [`split`](Self::split), but fails with
    /// [`StopwatchError::NotRunning`] instead of returning zero.
    pub fn try_split(&self, name: &str) -> Result<f64> {
        let mut state = self.state.lock();
        let now = self.clock.now();
        let elapsed_ms = state
            .close_window(name, now)
            .ok_or_else(|| StopwatchError::NotRunning {
                name: name.to_string(),
            })?;
        state.window_start = Some(now);
        drop(state);

        if self.trace_splits {
            debug!(split = name, elapsed_ms, "split recorded");
        }
        Ok(elapsed_ms)
    }

    /// Record the open window as `name` and stop running.
    ///
    /// Returns `0.0` and does nothing if already paused.
    pub fn pause(&self, name: &str) -> f64 {
        self.try_pause(name).unwrap_or_else(|_| {
            trace!(split = name, "stopwatch already paused");
            0.0
        })
    }

    pub fn try_pause(&self, name: &str) -> Result<f64> {
        let mut state = self.state.lock();
        let now = self.clock.now();
        let elapsed_ms = state
            .close_window(name, now)
            .ok_or_else(|| StopwatchError::NotRunning {
                name: name.to_string(),
            })?;
        state.window_start = None;
        drop(state);

        if self.trace_splits {
            debug!(split = name, elapsed_ms, "stopwatch paused");
        }
        Ok(elapsed_ms)
    }

    /// Open a new window if paused. A running stopwatch keeps its window.
    pub fn resume(&self) {
        let mut state = self.state.lock();
        if state.window_start.is_some() {
            return;
        }
        state.window_start = Some(self.clock.now());
        drop(state);

        debug!("stopwatch resumed");
    }

    /// Time from the start of `start_split` to the end of `end_split`.
    ///
    /// The two splits may be the same, need not be adjacent, and may be
    /// given in reverse order, which yields a negative duration.
    pub fn elapsed(&self, start_split: &str, end_split: &str) -> Result<TimeDelta> {
        let state = self.state.lock();
        let start = state
            .splits
            .get(start_split)
            .ok_or_else(|| StopwatchError::not_found(start_split, SplitBound::Start))?;
        let end = state
            .splits
            .get(end_split)
            .ok_or_else(|| StopwatchError::not_found(end_split, SplitBound::End))?;

        Ok(elapsed(start.start_time, end.end_time))
    }

    /// [`elapsed`](Self::elapsed) in whole milliseconds
    pub fn elapsed_ms(&self, start_split: &str, end_split: &str) -> Result<f64> {
        self.elapsed(start_split, end_split).map(duration_to_ms)
    }

    /// Snapshot of every recorded split, keyed by name
    pub fn splits(&self) -> HashMap<String, Split> {
        self.state.lock().splits.clone()
    }

    pub fn get_split(&self, name: &str) -> Option<Split> {
        self.state.lock().splits.get(name).cloned()
    }

    /// Names of the recorded splits, sorted
    pub fn split_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.state.lock().splits.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.state.lock().splits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().splits.is_empty()
    }

    pub fn is_running(&self) -> bool {
        self.state.lock().window_start.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use std::sync::Arc;
    use std::time::Duration;

    fn manual() -> (Stopwatch<ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        (Stopwatch::with_clock(clock.clone()), clock)
    }

    #[test]
    fn test_new_is_idle() {
        let sw = Stopwatch::new();
        assert!(!sw.is_running());
        assert!(sw.is_empty());
        assert_eq!(sw.split("early"), 0.0);
        assert!(sw.get_split("early").is_none());
    }

    #[test]
    fn test_auto_start_runs_from_creation() {
        let clock = ManualClock::new();
        let sw = Stopwatch::auto_start_with_clock(clock.clone());
        assert!(sw.is_running());

        clock.advance(Duration::from_millis(30));
        assert_eq!(sw.split("first"), 30.0);

        let split = sw.get_split("first").unwrap();
        assert_eq!(split.start_time, clock.origin());
    }

    #[test]
    fn test_split_measures_consecutive_windows_without_gaps() {
        let (sw, clock) = manual();
        sw.start();

        clock.advance(Duration::from_millis(10));
        assert_eq!(sw.split("a"), 10.0);

        clock.advance(Duration::from_micros(20_900));
        assert_eq!(sw.split("b"), 20.0);

        let a = sw.get_split("a").unwrap();
        let b = sw.get_split("b").unwrap();
        assert_eq!(a.end_time, b.start_time);
        assert_eq!(b.name, "b");
        assert_eq!(b.duration(), TimeDelta::microseconds(20_900));
        assert!(sw.is_running());
    }

    #[test]
    fn test_split_same_name_overwrites() {
        let (sw, clock) = manual();
        sw.start();

        clock.advance(Duration::from_millis(5));
        sw.split("lap");
        clock.advance(Duration::from_millis(7));
        sw.split("lap");

        assert_eq!(sw.len(), 1);
        assert_eq!(sw.get_split("lap").unwrap().elapsed_ms, 7.0);
    }

    #[test]
    fn test_pause_records_and_stops() {
        let (sw, clock) = manual();
        sw.start();

        clock.advance(Duration::from_millis(15));
        assert_eq!(sw.pause("work"), 15.0);
        assert!(!sw.is_running());

        clock.advance(Duration::from_millis(100));
        assert_eq!(sw.split("ignored"), 0.0);
        assert_eq!(sw.pause("ignored"), 0.0);
        assert_eq!(sw.split_names(), vec!["work".to_string()]);
    }

    #[test]
    fn test_resume_excludes_paused_time() {
        let (sw, clock) = manual();
        sw.start();

        clock.advance(Duration::from_millis(10));
        sw.pause("before");

        clock.advance(Duration::from_secs(5));
        sw.resume();
        let resumed_at = clock.now();

        clock.advance(Duration::from_millis(12));
        assert_eq!(sw.split("after"), 12.0);
        assert_eq!(sw.get_split("after").unwrap().start_time, resumed_at);
    }

    #[test]
    fn test_resume_while_running_keeps_window() {
        let (sw, clock) = manual();
        sw.start();

        clock.advance(Duration::from_millis(8));
        sw.resume();
        sw.resume();
        clock.advance(Duration::from_millis(4));

        assert_eq!(sw.split("whole"), 12.0);
    }

    #[test]
    fn test_double_pause_is_noop() {
        let (sw, clock) = manual();
        sw.start();

        clock.advance(Duration::from_millis(3));
        assert_eq!(sw.pause("p"), 3.0);
        let recorded = sw.get_split("p").unwrap();

        clock.advance(Duration::from_millis(3));
        assert_eq!(sw.pause("p"), 0.0);
        assert_eq!(sw.get_split("p").unwrap(), recorded);
    }

    #[test]
    fn test_start_clears_previous_splits() {
        let (sw, clock) = manual();
        sw.start();
        clock.advance(Duration::from_millis(1));
        sw.split("old");
        sw.pause("older");

        sw.start();
        assert!(sw.is_empty());
        assert!(sw.is_running());

        clock.advance(Duration::from_millis(2));
        assert_eq!(sw.split("new"), 2.0);
        assert_eq!(sw.split_names(), vec!["new".to_string()]);
    }

    #[test]
    fn test_try_split_reports_not_running() {
        let (sw, clock) = manual();
        assert_eq!(
            sw.try_split("x"),
            Err(StopwatchError::NotRunning {
                name: "x".to_string()
            })
        );

        sw.start();
        clock.advance(Duration::from_millis(6));
        assert_eq!(sw.try_pause("x"), Ok(6.0));
        assert!(matches!(
            sw.try_pause("y"),
            Err(StopwatchError::NotRunning { .. })
        ));
    }

    #[test]
    fn test_elapsed_spans_disjoint_splits() {
        let (sw, clock) = manual();
        sw.start();

        clock.advance(Duration::from_millis(10));
        sw.pause("x");
        clock.advance(Duration::from_millis(50));
        sw.resume();
        clock.advance(Duration::from_millis(20));
        sw.pause("y");

        let x = sw.get_split("x").unwrap();
        let y = sw.get_split("y").unwrap();

        assert_eq!(
            sw.elapsed("x", "y").unwrap(),
            elapsed(x.start_time, y.end_time)
        );
        assert_eq!(sw.elapsed("x", "y").unwrap(), TimeDelta::milliseconds(80));
        assert_eq!(sw.elapsed_ms("x", "y").unwrap(), 80.0);
        assert_eq!(sw.elapsed_ms("x", "x").unwrap(), 10.0);
    }

    #[test]
    fn test_elapsed_reversed_is_negative() {
        let (sw, clock) = manual();
        sw.start();

        clock.advance(Duration::from_millis(10));
        sw.split("first");
        clock.advance(Duration::from_millis(10));
        sw.split("second");
        clock.advance(Duration::from_millis(10));
        sw.split("third");

        // third.start (t=20) -> first.end (t=10)
        assert_eq!(
            sw.elapsed("third", "first").unwrap(),
            TimeDelta::milliseconds(-10)
        );
        assert_eq!(sw.elapsed_ms("third", "first").unwrap(), -10.0);
    }

    #[test]
    fn test_elapsed_missing_split() {
        let (sw, clock) = manual();
        sw.start();
        clock.advance(Duration::from_millis(1));
        sw.split("known");

        assert_eq!(
            sw.elapsed("missing", "known"),
            Err(StopwatchError::SplitNotFound {
                name: "missing".to_string(),
                bound: SplitBound::Start,
            })
        );
        assert_eq!(
            sw.elapsed_ms("known", "gone"),
            Err(StopwatchError::SplitNotFound {
                name: "gone".to_string(),
                bound: SplitBound::End,
            })
        );
    }

    #[test]
    fn test_from_config() {
        let running = Stopwatch::from_config(&StopwatchConfig {
            auto_start: true,
            trace_splits: false,
        });
        assert!(running.is_running());
        assert!(!running.trace_splits);

        let idle = Stopwatch::from_config(&StopwatchConfig::default());
        assert!(!idle.is_running());
        assert!(idle.trace_splits);
    }

    #[test]
    fn test_splits_snapshot_is_detached() {
        let (sw, clock) = manual();
        sw.start();
        clock.advance(Duration::from_millis(1));
        sw.split("one");

        let snapshot = sw.splits();
        sw.start();

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot["one"].elapsed_ms, 1.0);
        assert!(sw.is_empty());
    }

    #[test]
    fn test_concurrent_splits_are_not_lost() {
        let sw = Arc::new(Stopwatch::auto_start());

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let sw = Arc::clone(&sw);
                std::thread::spawn(move || {
                    for i in 0..100 {
                        sw.split(&format!("t{t}-{i}"));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(sw.len(), 800);
        for split in sw.splits().values() {
            assert!(split.end_time >= split.start_time);
            assert!(split.elapsed_ms >= 0.0);
        }
    }
}
