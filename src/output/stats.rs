//! Statistics gathered while a crawl's result stream is consumed

use crate::crawler::Page;
use std::collections::BTreeMap;
use std::time::Duration;

/// Crawl statistics summary
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CrawlStatistics {
    /// Total number of results received
    pub total_pages: u64,

    /// Pages fetched and parsed successfully
    pub successes: u64,

    /// Pages whose fetch failed
    pub failures: u64,

    /// Sum of the sub-link counts of all pages
    pub total_sub_links: u64,

    /// Number of pages per depth
    pub pages_by_depth: BTreeMap<usize, u64>,

    /// Wall time from session start to stream close
    pub elapsed: Duration,
}

impl CrawlStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accounts for one received page
    pub fn record(&mut self, page: &Page) {
        self.total_pages += 1;
        if page.is_success() {
            self.successes += 1;
        } else {
            self.failures += 1;
        }
        self.total_sub_links += page.sub_links.len() as u64;
        *self.pages_by_depth.entry(page.depth).or_insert(0) += 1;
    }

    /// Records the elapsed time once the stream has closed
    pub fn finish(&mut self, elapsed: Duration) {
        self.elapsed = elapsed;
    }

    /// Deepest level a page was received from
    pub fn deepest_level(&self) -> Option<usize> {
        self.pages_by_depth.keys().next_back().copied()
    }

    /// Share of successful pages, in percent
    pub fn success_rate(&self) -> f64 {
        if self.total_pages == 0 {
            return 0.0;
        }
        (self.successes as f64 / self.total_pages as f64) * 100.0
    }
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Crawl Statistics ===\n");

    println!("Overview:");
    println!("  Pages: {}", stats.total_pages);
    println!("  Sub-links found: {}", stats.total_sub_links);
    if let Some(deepest) = stats.deepest_level() {
        println!("  Deepest level: {}", deepest);
    }
    println!();

    println!("Pages by Depth:");
    for (depth, count) in &stats.pages_by_depth {
        println!("  {}: {}", depth, count);
    }
    println!();

    println!(
        "Success Rate: {:.1}% ({} / {} pages fetched, {} failed)",
        stats.success_rate(),
        stats.successes,
        stats.total_pages,
        stats.failures
    );
}
