//! State module for tracking crawl progress
//!
//! This module provides the state shared by all tasks of a crawl session and
//! the per-task state machine.
//!
//! # Components
//!
//! - `VisitedRegistry`: claim-once set of normalized URLs
//! - `CompletionCounter`: in-flight task count that drives stream closure
//! - `TaskState`: lifecycle of a single crawl task

mod counter;
mod task_state;
mod visited;

// Re-export main types
pub use counter::CompletionCounter;
pub use task_state::TaskState;
pub use visited::VisitedRegistry;
