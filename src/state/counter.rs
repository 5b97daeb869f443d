use std::sync::{Mutex, PoisonError};

/// Thread-safe count of in-flight crawl tasks
///
/// The count equals the number of tasks announced with [`increase`] minus the
/// number retired with [`decrease`]. A task must be announced by its parent
/// *before* it is spawned, never from inside the child, so that the parent's
/// own retirement can never bring the count to a false zero.
///
/// Once the count reaches zero no further increase can legally happen:
/// increases only come from tasks that are themselves still counted.
///
/// [`increase`]: CompletionCounter::increase
/// [`decrease`]: CompletionCounter::decrease
#[derive(Debug, Default)]
pub struct CompletionCounter {
    count: Mutex<usize>,
}

impl CompletionCounter {
    /// Creates a counter with no task announced
    pub fn new() -> Self {
        Self::default()
    }

    /// Announces one more live task
    pub fn increase(&self) {
        let mut count = self.count.lock().unwrap_or_else(PoisonError::into_inner);
        *count += 1;
    }

    /// Retires one task
    ///
    /// The decrement and the zero test happen in the same critical section, so
    /// only the call that retires the last task returns `true`.
    ///
    /// # Returns
    ///
    /// * `true` - This call brought the count to zero; the session is complete
    /// * `false` - Other tasks are still live
    pub fn decrease(&self) -> bool {
        let mut count = self.count.lock().unwrap_or_else(PoisonError::into_inner);
        match count.checked_sub(1) {
            Some(remaining) => {
                *count = remaining;
                remaining == 0
            }
            None => {
                tracing::error!("Completion counter decreased below zero");
                false
            }
        }
    }

    /// Returns true if no task is live
    pub fn is_complete(&self) -> bool {
        let count = self.count.lock().unwrap_or_else(PoisonError::into_inner);
        *count == 0
    }

    /// Current number of live tasks
    pub fn in_flight(&self) -> usize {
        *self.count.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
