//! URL handling module for Site-Mapper
//!
//! This module provides seed normalization, link resolution, same-host
//! scoping, ignored-prefix matching, and the link filter applied to every
//! candidate link found on a page.

mod matcher;
mod normalize;
mod scope;

use std::collections::HashSet;
use url::Url;

// Re-export main functions
pub use matcher::matching_prefix;
pub use normalize::{normalize_seed, resolve_link};
pub use scope::same_host;

/// Outcome of running a raw link through the link filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkClassification {
    /// In scope and not excluded - candidate for crawling
    Accepted(Url),
    /// Could not be parsed or resolved
    Malformed,
    /// Resolved to another host
    External(Url),
    /// Path starts with an ignored prefix
    Ignored { url: Url, prefix: String },
}

impl LinkClassification {
    /// Returns the accepted URL, if any
    pub fn accepted(self) -> Option<Url> {
        match self {
            Self::Accepted(url) => Some(url),
            _ => None,
        }
    }

    /// Returns true if the link should be crawled
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }
}

/// Classifies a raw link found on the page at `base`
///
/// The checks run in this order, each one a hard rejection:
/// 1. Parse and resolve against `base` (fragment stripped)
/// 2. Same-host scoping against `base`
/// 3. Ignored path prefixes (first match wins)
pub fn classify_link(raw: &str, base: &Url, ignored_prefixes: &[String]) -> LinkClassification {
    let Some(resolved) = resolve_link(raw, base) else {
        return LinkClassification::Malformed;
    };

    if !same_host(&resolved, base) {
        return LinkClassification::External(resolved);
    }

    if let Some(prefix) = matching_prefix(resolved.path(), ignored_prefixes) {
        return LinkClassification::Ignored {
            prefix: prefix.to_string(),
            url: resolved,
        };
    }

    LinkClassification::Accepted(resolved)
}

/// Resolves, scopes and filters a single raw link
///
/// # Arguments
///
/// * `raw` - The `href` value exactly as found in the markup
/// * `base` - The URL of the page the link was found on
/// * `ignored_prefixes` - The ignored path prefixes of the session
///
/// # Returns
///
/// * `Some(Url)` - The absolute, fragment-free URL to crawl
/// * `None` - The link is malformed, external or ignored
///
/// # Examples
///
/// ```
/// use url::Url;
/// use site_mapper::url::normalize_and_filter;
///
/// let base = Url::parse("https://domain.com/").unwrap();
/// let link = normalize_and_filter("/a/#top", &base, &[]).unwrap();
/// assert_eq!(link.as_str(), "https://domain.com/a/");
///
/// assert!(normalize_and_filter("https://otherdomain.com/b/", &base, &[]).is_none());
/// ```
pub fn normalize_and_filter(raw: &str, base: &Url, ignored_prefixes: &[String]) -> Option<Url> {
    classify_link(raw, base, ignored_prefixes).accepted()
}

/// Reduces the raw links of one page to its deduplicated set of sub-links
///
/// Every candidate goes through [`normalize_and_filter`] with `base` as the
/// page URL. A target linked several times from the same page is kept once,
/// in first-seen order. This set is local to the page and independent of the
/// session's visited registry.
pub fn collect_sub_links(
    raw_links: &[String],
    base: &Url,
    ignored_prefixes: &[String],
) -> Vec<Url> {
    let mut seen = HashSet::new();
    let mut sub_links = Vec::new();

    for raw in raw_links {
        match classify_link(raw, base, ignored_prefixes) {
            LinkClassification::Accepted(url) => {
                if seen.insert(url.as_str().to_string()) {
                    sub_links.push(url);
                }
            }
            LinkClassification::Malformed => {
                tracing::trace!("Dropping malformed link {:?} on {}", raw, base);
            }
            LinkClassification::External(url) => {
                tracing::trace!("Skipping external link {} on {}", url, base);
            }
            LinkClassification::Ignored { url, prefix } => {
                tracing::trace!("Skipping {} (ignored prefix {})", url, prefix);
            }
        }
    }

    sub_links
}
