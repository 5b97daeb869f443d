use crate::url::normalize_seed;
use crate::UrlResult;
use serde::Deserialize;
use url::Url;

/// Main configuration structure for Site-Mapper
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Absolute URL the crawl starts from
    #[serde(rename = "seed-url")]
    pub seed_url: String,

    /// Maximum depth to crawl from the seed URL (0 = unbounded)
    #[serde(rename = "max-depth", default)]
    pub max_depth: usize,

    /// Path prefixes that are never fetched
    #[serde(rename = "ignored-path-prefixes", default)]
    pub ignored_path_prefixes: Vec<String>,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name", default = "default_crawler_name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version", default = "default_crawler_version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url", default)]
    pub contact_url: Option<String>,
}

impl UserAgentConfig {
    /// Formats the User-Agent header value: `Name/Version` or `Name/Version (+ContactURL)`
    pub fn header_value(&self) -> String {
        match &self.contact_url {
            Some(contact) => format!(
                "{}/{} (+{})",
                self.crawler_name, self.crawler_version, contact
            ),
            None => format!("{}/{}", self.crawler_name, self.crawler_version),
        }
    }
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: default_crawler_name(),
            crawler_version: default_crawler_version(),
            contact_url: None,
        }
    }
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// Total request timeout (seconds)
    #[serde(rename = "request-timeout-secs", default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Connection establishment timeout (seconds)
    #[serde(rename = "connect-timeout-secs", default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_request_timeout(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

fn default_crawler_name() -> String {
    env!("CARGO_PKG_NAME").to_string()
}

fn default_crawler_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

impl Config {
    /// Builds a configuration for the given seed URL, with defaults everywhere else
    pub fn from_seed(seed_url: impl Into<String>) -> Self {
        Self {
            crawler: CrawlerConfig {
                seed_url: seed_url.into(),
                max_depth: 0,
                ignored_path_prefixes: Vec::new(),
            },
            user_agent: UserAgentConfig::default(),
            http: HttpConfig::default(),
        }
    }

    /// Derives the session options for a crawl from this configuration
    pub fn crawl_options(&self) -> UrlResult<CrawlOptions> {
        Ok(CrawlOptions {
            seed_url: normalize_seed(&self.crawler.seed_url)?,
            max_depth: self.crawler.max_depth,
            ignored_path_prefixes: self.crawler.ignored_path_prefixes.clone(),
        })
    }
}

/// Options consumed by a single crawl session
#[derive(Debug, Clone)]
pub struct CrawlOptions {
    /// Normalized absolute URL of the root page
    pub seed_url: Url,

    /// Depth cutoff: pages at depth `0..max_depth` are fetched, 0 disables the cutoff
    pub max_depth: usize,

    /// Ordered path prefixes excluded from the crawl
    pub ignored_path_prefixes: Vec<String>,
}

impl CrawlOptions {
    /// Creates unbounded options for a seed with no ignored prefixes
    pub fn new(seed_url: Url) -> Self {
        Self {
            seed_url,
            max_depth: 0,
            ignored_path_prefixes: Vec::new(),
        }
    }

    /// Sets the depth cutoff
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets the ignored path prefixes
    pub fn with_ignored_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored_path_prefixes = prefixes.into_iter().map(Into::into).collect();
        self
    }

    /// Returns true if a page at `depth` is beyond the depth cutoff
    pub fn exceeds_depth(&self, depth: usize) -> bool {
        self.max_depth > 0 && depth >= self.max_depth
    }
}
