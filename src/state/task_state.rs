//! Lifecycle states of a single crawl task

use std::fmt;

/// Represents the current state of a crawl task
///
/// ```text
/// Pending -> Fetching -> Parsed      -> Dispatching -> Done
///                     -> FetchFailed -----------------> Done
/// Pending ------------------------------------------> Done   (depth cutoff)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskState {
    // ===== Active States =====
    /// Task has been spawned but has not started fetching
    Pending,

    /// Task is waiting on the fetcher
    Fetching,

    /// Document was fetched and parsed; its result has been emitted
    Parsed,

    /// Fetch failed; an error result has been emitted
    FetchFailed,

    /// Newly claimed sub-links are being handed to child tasks
    Dispatching,

    // ===== Terminal State =====
    /// Task finished
    Done,
}

impl TaskState {
    /// Returns true if this is the terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Returns true if a task may move from this state to `next`
    pub fn can_transition_to(&self, next: TaskState) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Fetching)
                | (Self::Pending, Self::Done)
                | (Self::Fetching, Self::Parsed)
                | (Self::Fetching, Self::FetchFailed)
                | (Self::Parsed, Self::Dispatching)
                | (Self::FetchFailed, Self::Done)
                | (Self::Dispatching, Self::Done)
        )
    }

    /// Short lowercase name used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Fetching => "fetching",
            Self::Parsed => "parsed",
            Self::FetchFailed => "fetch_failed",
            Self::Dispatching => "dispatching",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
