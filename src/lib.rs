//! Named-split stopwatch with pause/resume and retrospective interval queries.
//!
//! ```
//! use splitwatch::Stopwatch;
//!
//! let sw = Stopwatch::auto_start();
//! let load_ms = sw.split("load");
//! sw.pause("parse");
//! sw.split("ignored"); // paused, nothing recorded
//! sw.resume();
//! sw.pause("emit");
//!
//! assert!(load_ms >= 0.0);
//! assert!(sw.get_split("ignored").is_none());
//! assert!(sw.elapsed_ms("load", "emit").is_ok());
//! ```

pub mod clock;
pub mod config;
pub mod elapsed;
pub mod error;
pub mod logger;
pub mod split;
pub mod stopwatch;

pub use crate::clock::{Clock, ManualClock, MonotonicClock};
pub use crate::config::StopwatchConfig;
pub use crate::elapsed::{duration_to_ms, elapsed, elapsed_ms};
pub use crate::error::{Result, SplitBound, StopwatchError};
pub use crate::logger::init_logging;
pub use crate::split::Split;
pub use crate::stopwatch::Stopwatch;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
