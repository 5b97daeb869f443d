//! HTML parser for extracting the title and raw links of a document
//!
//! Resolution and filtering of links is not done here: every `href` of every
//! anchor is returned exactly as written.

use scraper::{Html, Selector};
use url::Url;

/// Extracted information from an HTML document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedDocument {
    /// Trimmed text of the first `<title>` element, empty if none
    pub title: String,

    /// Every anchor `href` value, unresolved and unfiltered, in document order
    pub links: Vec<String>,
}

/// Parses an HTML document
///
/// Malformed markup never produces an error: the HTML5 parser recovers and
/// whatever title and links it could build are returned.
///
/// # Arguments
///
/// * `html` - The document body
/// * `base_url` - The URL the document was fetched from (used for logging only)
///
/// # Example
///
/// ```
/// use site_mapper::crawler::parse_document;
/// use url::Url;
///
/// let html = r#"<html><head><title> Test </title></head><body><a href="/page">Link</a></body></html>"#;
/// let base_url = Url::parse("https://example.com/").unwrap();
/// let parsed = parse_document(html, &base_url);
/// assert_eq!(parsed.title, "Test");
/// assert_eq!(parsed.links, vec!["/page".to_string()]);
/// ```
pub fn parse_document(html: &str, base_url: &Url) -> ParsedDocument {
    let document = Html::parse_document(html);

    let title = extract_title(&document);
    let links = extract_links(&document);

    tracing::trace!(
        "Parsed {}: title {:?}, {} raw links",
        base_url,
        title,
        links.len()
    );

    ParsedDocument { title, links }
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> String {
    let Ok(title_selector) = Selector::parse("title") else {
        return String::new();
    };

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

/// Extracts every anchor `href` value from the HTML document
fn extract_links(document: &Html) -> Vec<String> {
    let Ok(a_selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&a_selector)
        .filter_map(|element| element.value().attr("href"))
        .map(str::to_string)
        .collect()
}
