//! Output module for rendering crawl results
//!
//! This module handles:
//! - Rendering one console line per page
//! - Recording crawl statistics while the stream is consumed
//! - The final summary once the stream has closed

mod render;
pub mod stats;

pub use render::{depth_indent, render_summary};
pub use stats::{print_statistics, CrawlStatistics};

use crate::crawler::PageStream;
use std::io::Write;
use std::time::Instant;

/// Consumes a page stream, writing one line per page as it arrives
///
/// Returns the statistics of the session once the stream has closed.
///
/// # Arguments
///
/// * `stream` - The result stream of a crawl session
/// * `out` - Where the rendered lines go
/// * `started` - When the session started, for elapsed time
pub async fn write_pages<W: Write>(
    mut stream: PageStream,
    out: &mut W,
    started: Instant,
) -> std::io::Result<CrawlStatistics> {
    let mut stats = CrawlStatistics::new();

    while let Some(page) = stream.next().await {
        writeln!(out, "{}", page)?;
        stats.record(&page);
    }

    stats.finish(started.elapsed());
    writeln!(out, "{}", render_summary(stats.total_pages, stats.elapsed))?;
    out.flush()?;

    Ok(stats)
}
