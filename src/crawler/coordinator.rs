//! Crawler coordinator - crawl session orchestration
//!
//! A session runs one task per claimed URL. Each task:
//! - Fetches its URL and records it as visited
//! - Parses the document and emits exactly one `Page`
//! - Claims the unvisited sub-links and spawns a child task for each
//!
//! Termination rests on the completion counter: every task is announced
//! before it is spawned and retired when it ends, and the task whose
//! retirement brings the count to zero closes the result stream.

use crate::config::CrawlOptions;
use crate::crawler::fetcher::Fetcher;
use crate::crawler::page::Page;
use crate::crawler::parser::parse_document;
use crate::crawler::stream::{PageStream, ResultStream};
use crate::state::{CompletionCounter, TaskState, VisitedRegistry};
use crate::url::collect_sub_links;
use std::sync::Arc;
use url::Url;

/// State shared by every task of one crawl session
///
/// Built fresh for each crawl, so independent sessions never share a
/// registry or a counter.
struct CrawlSession {
    options: CrawlOptions,
    fetcher: Arc<dyn Fetcher>,
    visited: VisitedRegistry,
    jobs: CompletionCounter,
    results: ResultStream,
}

impl CrawlSession {
    /// Claims each sub-link and spawns a child task for the newly claimed ones
    ///
    /// Nothing is claimed at the depth cutoff, so a URL stays available to a
    /// shallower parent.
    fn dispatch(self: &Arc<Self>, sub_links: &[Url], depth: usize) -> usize {
        if self.options.exceeds_depth(depth) {
            return 0;
        }

        let mut spawned = 0;

        for link in sub_links {
            if !self.visited.try_claim(link.as_str()) {
                tracing::trace!("Already claimed: {}", link);
                continue;
            }

            // Announce the child before it exists, never from inside it
            self.jobs.increase();
            spawn_task(Arc::clone(self), link.clone(), depth);
            spawned += 1;
        }

        spawned
    }
}

/// Retires a task when dropped, on every exit path
struct TaskGuard {
    session: Arc<CrawlSession>,
    url: Url,
    state: TaskState,
}

impl TaskGuard {
    fn new(session: Arc<CrawlSession>, url: Url) -> Self {
        Self {
            session,
            url,
            state: TaskState::Pending,
        }
    }

    fn transition(&mut self, next: TaskState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "invalid task transition {} -> {}",
            self.state,
            next
        );
        tracing::trace!("{}: {} -> {}", self.url, self.state, next);
        self.state = next;
    }
}

impl Drop for TaskGuard {
    fn drop(&mut self) {
        if !self.state.is_terminal() {
            tracing::warn!("Task for {} ended in state {}", self.url, self.state);
        }

        if self.session.jobs.decrease() && self.session.results.close() {
            tracing::info!(
                "Crawl complete: {} URLs visited",
                self.session.visited.len()
            );
        }
    }
}

/// Starts a crawl session and returns the stream of its results
///
/// The root task is announced and spawned immediately; pages arrive on the
/// returned stream as they are fetched, and the stream ends once every
/// reachable, in-scope, depth-permitted URL has been fetched exactly once.
/// The root page's result always arrives before any of its children's.
///
/// Must be called from within a Tokio runtime.
///
/// # Arguments
///
/// * `options` - Seed URL, depth cutoff and ignored path prefixes
/// * `fetcher` - Source of documents
///
/// # Example
///
/// ```no_run
/// use site_mapper::config::CrawlOptions;
/// use site_mapper::crawler::{crawl, MockFetcher};
/// use std::sync::Arc;
/// use url::Url;
///
/// # async fn example() {
/// let fetcher = MockFetcher::new().with_page("https://domain.com/", "Home", ["/a/"]);
/// let options = CrawlOptions::new(Url::parse("https://domain.com/").unwrap());
///
/// let mut stream = crawl(options, Arc::new(fetcher));
/// while let Some(page) = stream.next().await {
///     println!("{}", page);
/// }
/// # }
/// ```
pub fn crawl(options: CrawlOptions, fetcher: Arc<dyn Fetcher>) -> PageStream {
    let (results, stream) = ResultStream::channel();

    tracing::info!(
        "Starting crawl of {} (max depth: {}, ignored prefixes: {:?})",
        options.seed_url,
        options.max_depth,
        options.ignored_path_prefixes
    );

    let seed = options.seed_url.clone();
    let session = Arc::new(CrawlSession {
        options,
        fetcher,
        visited: VisitedRegistry::new(),
        jobs: CompletionCounter::new(),
        results,
    });

    // The root is the single entry point: it is announced here and recorded as
    // visited once fetched, without going through a claim.
    session.jobs.increase();
    spawn_task(session, seed, 0);

    stream
}

/// Runs a crawl session to completion and returns all of its pages
pub async fn crawl_all(options: CrawlOptions, fetcher: Arc<dyn Fetcher>) -> Vec<Page> {
    crawl(options, fetcher).collect().await
}

fn spawn_task(session: Arc<CrawlSession>, url: Url, depth: usize) {
    tokio::spawn(run_task(session, url, depth));
}

/// Fetches one URL, emits its page and dispatches its children
async fn run_task(session: Arc<CrawlSession>, url: Url, depth: usize) {
    let mut task = TaskGuard::new(Arc::clone(&session), url.clone());

    if session.options.exceeds_depth(depth) {
        tracing::trace!("Depth {} reached for {}, not fetching", depth, url);
        task.transition(TaskState::Done);
        return;
    }

    task.transition(TaskState::Fetching);
    let fetched = session.fetcher.fetch(&url).await;
    session.visited.mark_visited(url.as_str());

    let body = match fetched {
        Ok(body) => body,
        Err(error) => {
            tracing::warn!("Failed to fetch {}: {}", url, error);
            task.transition(TaskState::FetchFailed);
            session.results.send(Page::failure(url, error, depth));
            task.transition(TaskState::Done);
            return;
        }
    };

    let document = parse_document(&body, &url);
    drop(body);

    let sub_links = collect_sub_links(
        &document.links,
        &url,
        &session.options.ignored_path_prefixes,
    );
    tracing::debug!(
        "Fetched {} at depth {}: {} raw links, {} sub-links",
        url,
        depth,
        document.links.len(),
        sub_links.len()
    );

    task.transition(TaskState::Parsed);
    session.results.send(Page::success(
        url,
        document.title,
        sub_links.clone(),
        depth,
    ));

    task.transition(TaskState::Dispatching);
    let spawned = session.dispatch(&sub_links, depth + 1);
    tracing::trace!("Spawned {} child tasks at depth {}", spawned, depth + 1);

    task.transition(TaskState::Done);
}
