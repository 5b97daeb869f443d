//! Deterministic in-memory fetcher
//!
//! Each known URL maps to a fixed title and list of links, rendered as a
//! minimal HTML document on every fetch. Unknown URLs fail with
//! `FetchError::NotFound`. Fetch counts are recorded so callers can check
//! how often a URL was requested.

use crate::crawler::fetcher::Fetcher;
use crate::{ConfigError, FetchError};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Mutex, PoisonError};
use url::Url;

/// A page served by the [`MockFetcher`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MockPage {
    /// Content of the `<title>` element
    pub title: String,

    /// `href` values, one anchor each
    #[serde(default)]
    pub links: Vec<String>,
}

impl MockPage {
    pub fn new<I, S>(title: impl Into<String>, links: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            title: title.into(),
            links: links.into_iter().map(Into::into).collect(),
        }
    }

    /// Renders the page as the HTML document served for it
    pub fn render(&self) -> String {
        let links_chunk: String = self
            .links
            .iter()
            .map(|link| format!("<a href=\"{}\">Some link</a>\n", escape_attribute(link)))
            .collect();

        format!(
            "<html><title>{}</title>\n<body>{}</body></html>",
            escape_text(&self.title),
            links_chunk
        )
    }
}

/// Site fixture file: a list of `[[page]]` tables
#[derive(Debug, Deserialize)]
struct Fixture {
    #[serde(rename = "page", default)]
    pages: Vec<FixturePage>,
}

#[derive(Debug, Deserialize)]
struct FixturePage {
    url: String,
    #[serde(flatten)]
    page: MockPage,
}

/// Fetcher serving a fixed set of pages from memory
#[derive(Debug, Default)]
pub struct MockFetcher {
    pages: HashMap<String, MockPage>,
    fetches: Mutex<HashMap<String, usize>>,
}

impl MockFetcher {
    /// Creates a fetcher that knows no page
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a page, builder style
    pub fn with_page<I, S>(mut self, url: &str, title: &str, links: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(url, MockPage::new(title, links));
        self
    }

    /// Adds or replaces the page served for `url`
    pub fn insert(&mut self, url: &str, page: MockPage) {
        self.pages.insert(page_key(url), page);
    }

    /// Loads a site fixture from a TOML file
    ///
    /// ```toml
    /// [[page]]
    /// url = "https://domain.com/"
    /// title = "The Domain website"
    /// links = ["/a/", "/b/"]
    /// ```
    pub fn load_fixture(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_fixture_str(&content)
    }

    /// Parses a site fixture from TOML text
    pub fn from_fixture_str(content: &str) -> Result<Self, ConfigError> {
        let fixture: Fixture = toml::from_str(content)?;

        let mut fetcher = Self::new();
        for entry in fixture.pages {
            Url::parse(&entry.url).map_err(|e| {
                ConfigError::InvalidUrl(format!("Invalid fixture URL '{}': {}", entry.url, e))
            })?;
            fetcher.insert(&entry.url, entry.page);
        }

        Ok(fetcher)
    }

    /// Number of pages known to the fetcher
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Returns true if the fetcher knows no page
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// How many times `url` has been fetched, known or not
    pub fn fetch_count(&self, url: &str) -> usize {
        let fetches = self.fetches.lock().unwrap_or_else(PoisonError::into_inner);
        fetches.get(&page_key(url)).copied().unwrap_or(0)
    }

    /// Total number of fetch calls
    pub fn total_fetches(&self) -> usize {
        let fetches = self.fetches.lock().unwrap_or_else(PoisonError::into_inner);
        fetches.values().sum()
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        {
            let mut fetches = self.fetches.lock().unwrap_or_else(PoisonError::into_inner);
            *fetches.entry(url.as_str().to_string()).or_insert(0) += 1;
        }

        self.pages
            .get(url.as_str())
            .map(MockPage::render)
            .ok_or_else(|| FetchError::NotFound {
                url: url.to_string(),
            })
    }
}

/// Serializes `url` the way the crawler does, so keys match fetched URLs
fn page_key(url: &str) -> String {
    match Url::parse(url) {
        Ok(mut parsed) => {
            parsed.set_fragment(None);
            parsed.to_string()
        }
        Err(_) => url.to_string(),
    }
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attribute(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}
