//! Crawler module for concurrent page fetching and indexing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching and link extraction
//! - Admission and deduplication of discovered addresses
//! - A bounded worker pool and completion detection
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod frontier;
mod parser;
mod pool;
mod quiescence;

pub use coordinator::{Coordinator, StopHandle};
pub use fetcher::{build_http_client, fetch_url, Fetch, FetchResult, FetchedPage, HttpFetcher};
pub use frontier::Frontier;
pub use parser::extract_links;
pub use pool::{ShutdownOutcome, WorkerPool};
pub use quiescence::{ActiveWork, WorkGuard};

use crate::config::Config;
use crate::output::CrawlReport;
use crate::RippleError;

/// Runs a complete crawl over HTTP
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP client from the configuration
/// 2. Admit the seed and fan out over discovered links
/// 3. Wait for all outstanding work to finish
/// 4. Return the completion report
///
/// # Returns
///
/// * `Ok(CrawlReport)` - Crawl completed
/// * `Err(RippleError)` - The crawl could not start (bad seed or client)
pub async fn crawl(config: &Config, seed: &str) -> Result<CrawlReport, RippleError> {
    Coordinator::new(config)?.run(seed).await
}
