use thiserror::Error;

/// Which side of a virtual interval a split name was looked up for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitBound {
    Start,
    End,
}

impl std::fmt::Display for SplitBound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Start => write!(f, "start"),
            Self::End => write!(f, "end"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StopwatchError {
    #[error("split not found: {bound} split [{name}]")]
    SplitNotFound { name: String, bound: SplitBound },

    #[error("stopwatch is paused, cannot record split [{name}]")]
    NotRunning { name: String },
}

impl StopwatchError {
    pub(crate) fn not_found(name: &str, bound: SplitBound) -> Self {
        Self::SplitNotFound {
            name: name.to_string(),
            bound,
        }
    }
}

pub type Result<T> = std::result::Result<T, StopwatchError>;
