use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// Claim-once registry of normalized URLs for one crawl session
///
/// For a given URL, at most one caller ever observes a successful claim.
/// Entries are never removed; the registry lives exactly as long as the
/// session that owns it.
#[derive(Debug, Default)]
pub struct VisitedRegistry {
    urls: Mutex<HashSet<String>>,
}

impl VisitedRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically claims `url`
    ///
    /// # Returns
    ///
    /// * `true` - The URL was absent and is now recorded; the caller owns the duty to fetch it
    /// * `false` - The URL was already claimed
    pub fn try_claim(&self, url: &str) -> bool {
        let mut urls = self.urls.lock().unwrap_or_else(PoisonError::into_inner);
        urls.insert(url.to_string())
    }

    /// Records `url` as visited without going through a claim
    ///
    /// Used for the root page, which is the single entry point of a session
    /// and is fetched before anything else can race for it.
    pub fn mark_visited(&self, url: &str) {
        let mut urls = self.urls.lock().unwrap_or_else(PoisonError::into_inner);
        urls.insert(url.to_string());
    }

    /// Returns true if `url` has been recorded
    pub fn contains(&self, url: &str) -> bool {
        let urls = self.urls.lock().unwrap_or_else(PoisonError::into_inner);
        urls.contains(url)
    }

    /// Number of recorded URLs
    pub fn len(&self) -> usize {
        let urls = self.urls.lock().unwrap_or_else(PoisonError::into_inner);
        urls.len()
    }

    /// Returns true if nothing has been recorded yet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
