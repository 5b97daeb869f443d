use crate::FetchError;
use url::Url;

/// Result of one fetch attempt
///
/// Exactly one `Page` is produced for every URL a session fetches. It is built
/// once by the task that fetched the URL and handed over to the consumer
/// through the result stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Normalized absolute URL of the page
    pub url: Url,

    /// Trimmed document title, empty on error or when the page has none
    pub title: String,

    /// Fetch failure, if any
    pub error: Option<FetchError>,

    /// Deduplicated, in-scope links found on the page; empty on error
    pub sub_links: Vec<Url>,

    /// Number of link hops from the seed
    pub depth: usize,
}

impl Page {
    /// Builds the result of a successful fetch
    pub fn success(url: Url, title: String, sub_links: Vec<Url>, depth: usize) -> Self {
        Self {
            url,
            title,
            error: None,
            sub_links,
            depth,
        }
    }

    /// Builds the result of a failed fetch
    pub fn failure(url: Url, error: FetchError, depth: usize) -> Self {
        Self {
            url,
            title: String::new(),
            error: Some(error),
            sub_links: Vec::new(),
            depth,
        }
    }

    /// Returns true if the page was fetched successfully
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}
