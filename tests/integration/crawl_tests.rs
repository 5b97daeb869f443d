//! Integration tests for the crawler
//!
//! These tests run full crawl sessions against the in-memory fetcher and
//! check the results received on the stream.

use site_mapper::config::CrawlOptions;
use site_mapper::crawler::{crawl, crawl_all, MockFetcher, Page};
use site_mapper::FetchError;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use url::Url;

const SEED: &str = "https://domain.com/";

fn options() -> CrawlOptions {
    CrawlOptions::new(Url::parse(SEED).expect("Failed to parse seed"))
}

/// Crawls and returns url -> title for every result
async fn crawl_titles(fetcher: MockFetcher, options: CrawlOptions) -> HashMap<String, String> {
    let pages = crawl_all(options, Arc::new(fetcher)).await;
    let titles: HashMap<String, String> = pages
        .iter()
        .map(|page| (page.url.to_string(), page.title.clone()))
        .collect();
    assert_eq!(titles.len(), pages.len(), "duplicate results: {:?}", pages);
    titles
}

fn expected(entries: &[(&str, &str)]) -> HashMap<String, String> {
    entries
        .iter()
        .map(|(url, title)| (url.to_string(), title.to_string()))
        .collect()
}

fn no_links() -> Vec<String> {
    Vec::new()
}

#[tokio::test]
async fn test_simple_links() {
    // A simple website contains one page linked to 2 others
    let fetcher = MockFetcher::new()
        .with_page("https://domain.com/", "The Domain website", ["/a/", "/b/"])
        .with_page("https://domain.com/a/", "Page A - The Domain website", no_links())
        .with_page("https://domain.com/b/", "Page B - The Domain website", no_links());

    let results = crawl_titles(fetcher, options()).await;

    assert_eq!(
        results,
        expected(&[
            ("https://domain.com/", "The Domain website"),
            ("https://domain.com/a/", "Page A - The Domain website"),
            ("https://domain.com/b/", "Page B - The Domain website"),
        ])
    );
}

#[tokio::test]
async fn test_revisited_links() {
    // Pages link back to each other and to the seed
    let fetcher = Arc::new(
        MockFetcher::new()
            .with_page("https://domain.com/", "The Domain website", ["/a/", "/b/"])
            .with_page("https://domain.com/a/", "Page A - The Domain website", ["/", "/b/"])
            .with_page("https://domain.com/b/", "Page B - The Domain website", ["/"]),
    );

    let pages = crawl_all(options(), fetcher.clone()).await;

    assert_eq!(pages.len(), 3);
    for url in ["https://domain.com/", "https://domain.com/a/", "https://domain.com/b/"] {
        assert_eq!(fetcher.fetch_count(url), 1, "{} fetched more than once", url);
    }
    assert_eq!(fetcher.total_fetches(), 3);
}

#[tokio::test]
async fn test_absolute_links() {
    // One relative link, one absolute link to the same host
    let fetcher = MockFetcher::new()
        .with_page(
            "https://domain.com/",
            "The Domain website",
            ["/a/", "https://domain.com/b/"],
        )
        .with_page("https://domain.com/a/", "Page A - The Domain website", no_links())
        .with_page("https://domain.com/b/", "Page B - The Domain website", no_links());

    let results = crawl_titles(fetcher, options()).await;

    assert_eq!(
        results,
        expected(&[
            ("https://domain.com/", "The Domain website"),
            ("https://domain.com/a/", "Page A - The Domain website"),
            ("https://domain.com/b/", "Page B - The Domain website"),
        ])
    );
}

#[tokio::test]
async fn test_external_links() {
    // One same-site link and one external link
    let fetcher = Arc::new(
        MockFetcher::new()
            .with_page(
                "https://domain.com/",
                "The Domain website",
                ["/a/", "https://otherdomain.com/b/"],
            )
            .with_page("https://domain.com/a/", "Page A - The Domain website", no_links())
            .with_page("https://otherdomain.com/b/", "External", no_links()),
    );

    let pages = crawl_all(options(), fetcher.clone()).await;

    let urls: HashSet<String> = pages.iter().map(|p| p.url.to_string()).collect();
    assert_eq!(
        urls,
        HashSet::from([
            "https://domain.com/".to_string(),
            "https://domain.com/a/".to_string()
        ])
    );
    assert_eq!(fetcher.fetch_count("https://otherdomain.com/b/"), 0);
}

#[tokio::test]
async fn test_max_depth() {
    // A chain of pages, each linked to the next one
    let fetcher = Arc::new(
        MockFetcher::new()
            .with_page("https://domain.com/", "The Domain website", ["/a/"])
            .with_page("https://domain.com/a/", "Page A - The Domain website", ["/b/"])
            .with_page("https://domain.com/b/", "Page B - The Domain website", ["/c/"])
            .with_page("https://domain.com/c/", "Page C - The Domain website", ["/d/"])
            .with_page("https://domain.com/d/", "Page D - The Domain website", no_links()),
    );

    let pages = crawl_all(options().with_max_depth(4), fetcher.clone()).await;

    let results: HashMap<String, String> = pages
        .iter()
        .map(|p| (p.url.to_string(), p.title.clone()))
        .collect();
    assert_eq!(
        results,
        expected(&[
            ("https://domain.com/", "The Domain website"),
            ("https://domain.com/a/", "Page A - The Domain website"),
            ("https://domain.com/b/", "Page B - The Domain website"),
            ("https://domain.com/c/", "Page C - The Domain website"),
        ])
    );
    assert!(pages.iter().all(|p| p.depth < 4));
    assert_eq!(fetcher.fetch_count("https://domain.com/d/"), 0);
}

#[tokio::test]
async fn test_filters() {
    // Some pages live under an ignored "/folder" path
    let fetcher = Arc::new(
        MockFetcher::new()
            .with_page(
                "https://domain.com/",
                "The Domain website",
                ["/folder/a/", "/folder/b/", "/c/"],
            )
            .with_page("https://domain.com/folder/a/", "Page A - Folder", no_links())
            .with_page("https://domain.com/folder/b/", "Page B - Folder", no_links())
            .with_page("https://domain.com/c/", "Page C - The Domain website", no_links()),
    );

    let pages = crawl_all(
        options().with_ignored_prefixes(["/folder"]),
        fetcher.clone(),
    )
    .await;

    let results: HashMap<String, String> = pages
        .iter()
        .map(|p| (p.url.to_string(), p.title.clone()))
        .collect();
    assert_eq!(
        results,
        expected(&[
            ("https://domain.com/", "The Domain website"),
            ("https://domain.com/c/", "Page C - The Domain website"),
        ])
    );
    assert_eq!(fetcher.fetch_count("https://domain.com/folder/a/"), 0);
    assert_eq!(fetcher.fetch_count("https://domain.com/folder/b/"), 0);
}

#[tokio::test]
async fn test_filtered_pages_are_not_reached_transitively() {
    // The only path to /deep/ goes through an ignored page
    let fetcher = MockFetcher::new()
        .with_page("https://domain.com/", "Home", ["/private/hub/"])
        .with_page("https://domain.com/private/hub/", "Hub", ["/deep/"])
        .with_page("https://domain.com/deep/", "Deep", no_links());

    let results = crawl_titles(fetcher, options().with_ignored_prefixes(["/private"])).await;

    assert_eq!(results, expected(&[("https://domain.com/", "Home")]));
}

#[tokio::test]
async fn test_fragments_share_one_claim() {
    let fetcher = Arc::new(
        MockFetcher::new()
            .with_page("https://domain.com/", "Home", ["/a/#frag1", "/b/"])
            .with_page("https://domain.com/a/", "A", no_links())
            .with_page("https://domain.com/b/", "B", ["/a/#frag2"]),
    );

    let pages = crawl_all(options(), fetcher.clone()).await;

    assert_eq!(pages.len(), 3);
    assert_eq!(fetcher.fetch_count("https://domain.com/a/"), 1);
}

#[tokio::test]
async fn test_sub_links_are_resolved_and_deduplicated() {
    let fetcher = MockFetcher::new()
        .with_page(
            "https://domain.com/",
            "Home",
            ["/a/", "a/", "/a/#top", "https://domain.com/a/", "mailto:me@domain.com"],
        )
        .with_page("https://domain.com/a/", "A", no_links());

    let pages = crawl_all(options(), Arc::new(fetcher)).await;
    let root = pages
        .iter()
        .find(|p| p.depth == 0)
        .expect("root page missing");

    let sub_links: Vec<&str> = root.sub_links.iter().map(Url::as_str).collect();
    assert_eq!(sub_links, vec!["https://domain.com/a/"]);
}

#[tokio::test]
async fn test_fetch_errors_are_results() {
    let fetcher = MockFetcher::new()
        .with_page("https://domain.com/", "Home", ["/missing/", "/a/"])
        .with_page("https://domain.com/a/", "A", ["/also-missing/"]);

    let pages = crawl_all(options(), Arc::new(fetcher)).await;
    assert_eq!(pages.len(), 4);

    let failures: Vec<&Page> = pages.iter().filter(|p| !p.is_success()).collect();
    assert_eq!(failures.len(), 2);
    for page in failures {
        assert!(page.title.is_empty());
        assert!(page.sub_links.is_empty());
        assert_eq!(
            page.error,
            Some(FetchError::NotFound {
                url: page.url.to_string()
            })
        );
    }
}

#[tokio::test]
async fn test_depths_are_hop_counts() {
    let fetcher = MockFetcher::new()
        .with_page("https://domain.com/", "Home", ["/a/"])
        .with_page("https://domain.com/a/", "A", ["/a/b/"])
        .with_page("https://domain.com/a/b/", "B", no_links());

    let pages = crawl_all(options(), Arc::new(fetcher)).await;
    let depths: HashMap<String, usize> = pages
        .iter()
        .map(|p| (p.url.to_string(), p.depth))
        .collect();

    assert_eq!(depths["https://domain.com/"], 0);
    assert_eq!(depths["https://domain.com/a/"], 1);
    assert_eq!(depths["https://domain.com/a/b/"], 2);
}

#[tokio::test]
async fn test_root_result_comes_first() {
    let fetcher = MockFetcher::new()
        .with_page("https://domain.com/", "Home", ["/a/", "/b/"])
        .with_page("https://domain.com/a/", "A", no_links())
        .with_page("https://domain.com/b/", "B", no_links());

    let mut stream = crawl(options(), Arc::new(fetcher));
    let first = stream.next().await.expect("stream closed early");
    assert_eq!(first.url.as_str(), SEED);
    assert_eq!(first.depth, 0);

    let rest = stream.collect().await;
    assert_eq!(rest.len(), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_large_cyclic_graph_terminates_with_one_result_per_url() {
    // 300 pages, each linking to five others and back to the seed
    let page_count = 300;
    let mut fetcher = MockFetcher::new();
    for i in 0..page_count {
        let url = if i == 0 {
            SEED.to_string()
        } else {
            format!("https://domain.com/p/{}/", i)
        };
        let links: Vec<String> = (1..=5)
            .map(|step| format!("/p/{}/", (i * 7 + step * 13) % page_count))
            .chain(std::iter::once("/".to_string()))
            .collect();
        fetcher = fetcher.with_page(&url, &format!("Page {}", i), links);
    }
    let fetcher = Arc::new(fetcher);

    let pages = crawl_all(options(), fetcher.clone()).await;

    let unique: HashSet<String> = pages.iter().map(|p| p.url.to_string()).collect();
    assert_eq!(unique.len(), pages.len(), "a URL was emitted twice");
    assert_eq!(fetcher.total_fetches(), pages.len());
    for page in &pages {
        assert_eq!(fetcher.fetch_count(page.url.as_str()), 1);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_depth_cutoff_never_hides_shallow_pages() {
    // /c/ is linked from the seed (depth 1) and from /a/ (depth 2 = cutoff)
    let fetcher = || {
        Arc::new(
            MockFetcher::new()
                .with_page("https://domain.com/", "Home", ["/a/", "/b/", "/c/"])
                .with_page("https://domain.com/a/", "A", ["/b/", "/", "/c/#x"])
                .with_page("https://domain.com/b/", "B", ["/a/", "/c/"])
                .with_page("https://domain.com/c/", "C", ["/a/", "/b/"]),
        )
    };

    for round in 0..200 {
        let fetcher = fetcher();
        let pages = crawl_all(options().with_max_depth(2), fetcher.clone()).await;

        let mut found: Vec<(String, usize)> = pages
            .iter()
            .map(|p| (p.url.to_string(), p.depth))
            .collect();
        found.sort();
        assert_eq!(
            found,
            vec![
                ("https://domain.com/".to_string(), 0),
                ("https://domain.com/a/".to_string(), 1),
                ("https://domain.com/b/".to_string(), 1),
                ("https://domain.com/c/".to_string(), 1),
            ],
            "round {}",
            round
        );
        assert_eq!(fetcher.total_fetches(), 4, "round {}", round);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_every_fetch_failing_still_terminates() {
    let fetcher = MockFetcher::new();
    let pages = crawl_all(options(), Arc::new(fetcher)).await;

    assert_eq!(pages.len(), 1);
    assert!(!pages[0].is_success());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_sessions_are_independent() {
    let build = || {
        Arc::new(
            MockFetcher::new()
                .with_page("https://domain.com/", "Home", ["/a/", "/b/"])
                .with_page("https://domain.com/a/", "A", ["/b/", "/"])
                .with_page("https://domain.com/b/", "B", ["/a/"]),
        )
    };

    let first = tokio::spawn(crawl_all(options(), build()));
    let second = tokio::spawn(crawl_all(options(), build()));

    let first = first.await.expect("first session panicked");
    let second = second.await.expect("second session panicked");

    assert_eq!(first.len(), 3);
    assert_eq!(second.len(), 3);
}
