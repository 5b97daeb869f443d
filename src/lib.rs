//! Site-Mapper: a concurrent single-domain site mapper
//!
//! This crate discovers the reachable pages of one web domain, starting from a
//! seed URL and recursively following same-host links up to a configurable
//! depth. Every normalized URL is fetched at most once per crawl session, and
//! results are streamed to the caller as they are produced.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,
}

/// Failure of a single fetch attempt
///
/// A fetch error never aborts a crawl. It is carried inside the [`crawler::Page`]
/// produced for the URL and ends only that branch of the crawl.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("not found: {url}")]
    NotFound { url: String },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("request timeout for {url}")]
    Timeout { url: String },

    #[error("connection failed for {url}: {message}")]
    Connect { url: String, message: String },

    #[error("request failed for {url}: {message}")]
    Transport { url: String, message: String },
}

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::{Config, CrawlOptions};
pub use crawler::{crawl, Fetcher, HttpFetcher, MockFetcher, MockPage, Page};
pub use state::{CompletionCounter, TaskState, VisitedRegistry};
pub use url::{collect_sub_links, normalize_and_filter, normalize_seed};
