//! Ripple Indexer main entry point
//!
//! This is the command-line interface for the Ripple Indexer crawler.

use clap::Parser;
use ripple_indexer::config::{load_config_with_hash, validate, Config};
use ripple_indexer::crawler::Coordinator;
use ripple_indexer::output::print_report;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Ripple Indexer: crawl outward from a seed and index every page's words
///
/// Follows hyperlinks from the seed address with a pool of concurrent
/// fetchers until the page budget is spent or no new links remain, then
/// prints the most widespread words.
#[derive(Parser, Debug)]
#[command(name = "ripple-indexer")]
#[command(version)]
#[command(about = "Concurrent link-following word indexer", long_about = None)]
struct Cli {
    /// Address to start crawling from
    #[arg(value_name = "SEED")]
    seed: String,

    /// Maximum number of distinct pages to visit
    #[arg(short = 'n', long, value_name = "N")]
    max_pages: Option<usize>,

    /// Number of concurrent fetch workers
    #[arg(short, long, value_name = "N")]
    workers: Option<usize>,

    /// Number of top-ranked words to report
    #[arg(short, long, value_name = "N")]
    top: Option<usize>,

    /// Optional TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            return Err(e);
        }
    };

    let coordinator = Coordinator::new(&config)?;

    // Ctrl-C stops admissions; pages already being fetched still finish
    let stop = coordinator.stop_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, finishing in-flight pages");
            stop.stop();
        }
    });

    match coordinator.run(&cli.seed).await {
        Ok(report) => {
            if !report.drained_cleanly {
                tracing::warn!("Some fetch tasks were aborted during shutdown");
            }
            if !cli.quiet {
                print_report(&report);
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("ripple_indexer=info,warn"),
            1 => EnvFilter::new("ripple_indexer=debug,info"),
            2 => EnvFilter::new("ripple_indexer=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the optional config file and applies command-line overrides
fn resolve_config(cli: &Cli) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    if let Some(max_pages) = cli.max_pages {
        config.crawler.max_pages = max_pages;
    }
    if let Some(workers) = cli.workers {
        config.crawler.workers = workers;
    }
    if let Some(top) = cli.top {
        config.report.top_words = top;
    }

    validate(&config)?;
    Ok(config)
}
