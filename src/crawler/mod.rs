//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - The `Fetcher` capability with HTTP and in-memory implementations
//! - HTML parsing and link extraction
//! - The result stream between crawl tasks and the consumer
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod mock;
mod page;
mod parser;
mod stream;

pub use coordinator::{crawl, crawl_all};
pub use fetcher::{build_http_client, fetch_url, Fetcher, HttpFetcher};
pub use mock::{MockFetcher, MockPage};
pub use page::Page;
pub use parser::{parse_document, ParsedDocument};
pub use stream::{PageStream, ResultStream};
