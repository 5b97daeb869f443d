//! Console rendering of pages and of the crawl summary

use crate::crawler::Page;
use std::fmt;
use std::time::Duration;

/// Indentation for a page at `depth`: two spaces per level followed by
/// a `\_ ` marker, nothing at depth 0
pub fn depth_indent(depth: usize) -> String {
    if depth == 0 {
        return String::new();
    }
    format!("{}\\_ ", "  ".repeat(depth))
}

/// Renders one page per line:
///
/// ```text
/// https://domain.com/ [The Domain website] (with 2 sublinks)
///   \_ https://domain.com/a/ [Page A] (with 0 sublinks)
///   \_ https://domain.com/x/ /!\ Error: not found: https://domain.com/x/
/// ```
impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let indent = depth_indent(self.depth);
        match &self.error {
            Some(error) => write!(f, "{}{} /!\\ Error: {}", indent, self.url, error),
            None => write!(
                f,
                "{}{} [{}] (with {} sublinks)",
                indent,
                self.url,
                self.title,
                self.sub_links.len()
            ),
        }
    }
}

/// Summary printed once the result stream has closed
pub fn render_summary(result_count: u64, elapsed: Duration) -> String {
    format!(
        "\n** Finished **\n{} URLs found in {:?}.",
        result_count, elapsed
    )
}
