//! Site-Mapper main entry point
//!
//! This is the command-line interface for the Site-Mapper crawler.

use anyhow::{bail, Context};
use clap::Parser;
use site_mapper::config::{load_config, validate, Config};
use site_mapper::crawler::{crawl, Fetcher, HttpFetcher, MockFetcher};
use site_mapper::output::{print_statistics, write_pages};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Site-Mapper: maps the reachable pages of a single domain
///
/// Site-Mapper starts from a seed URL and recursively follows same-host
/// links, fetching every page at most once, and prints one line per page
/// as results arrive.
#[derive(Parser, Debug)]
#[command(name = "site-mapper")]
#[command(version)]
#[command(about = "Maps the reachable pages of a single domain", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Seed URL to start from (overrides the config file)
    #[arg(long, value_name = "URL")]
    seed: Option<String>,

    /// Maximum crawl depth, 0 for unbounded (overrides the config file)
    #[arg(long, value_name = "N")]
    max_depth: Option<usize>,

    /// Path prefix to skip; repeat for several (replaces the config file list)
    #[arg(long = "ignore", value_name = "PREFIX")]
    ignore: Vec<String>,

    /// Serve pages from a TOML site fixture instead of the network
    #[arg(long, value_name = "FILE")]
    fixture: Option<PathBuf>,

    /// Print crawl statistics after the summary
    #[arg(long)]
    stats: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = resolve_config(&cli)?;
    let options = config
        .crawl_options()
        .context("Invalid seed URL")?;

    let fetcher: Arc<dyn Fetcher> = match &cli.fixture {
        Some(path) => {
            tracing::info!("Serving pages from fixture: {}", path.display());
            let fetcher = MockFetcher::load_fixture(path)
                .with_context(|| format!("Failed to load fixture {}", path.display()))?;
            Arc::new(fetcher)
        }
        None => Arc::new(HttpFetcher::new(&config).context("Failed to build HTTP client")?),
    };

    // Run the crawler, rendering pages as they arrive
    let started = Instant::now();
    let stream = crawl(options, fetcher);
    let mut stdout = std::io::stdout();
    let stats = write_pages(stream, &mut stdout, started).await?;

    if cli.stats {
        println!();
        print_statistics(&stats);
    }

    Ok(())
}

/// Builds the effective configuration from the config file and CLI overrides
fn resolve_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match (&cli.config, &cli.seed) {
        (Some(path), _) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?
        }
        (None, Some(seed)) => Config::from_seed(seed.clone()),
        (None, None) => bail!("either a CONFIG file or --seed is required"),
    };

    if let Some(seed) = &cli.seed {
        config.crawler.seed_url = seed.clone();
    }
    if let Some(max_depth) = cli.max_depth {
        config.crawler.max_depth = max_depth;
    }
    if !cli.ignore.is_empty() {
        config.crawler.ignored_path_prefixes = cli.ignore.clone();
    }

    validate(&config).context("Invalid configuration")?;

    Ok(config)
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr; stdout carries only the rendered pages.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("site_mapper=info,warn"),
            1 => EnvFilter::new("site_mapper=debug,info"),
            2 => EnvFilter::new("site_mapper=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
