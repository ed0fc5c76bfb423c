//! Crawler coordinator - main crawl orchestration logic
//!
//! This module drives a crawl from a single seed:
//! - Admitting the seed and every discovered link through the frontier
//! - Submitting one fetch-and-process unit per admitted address to the pool
//! - Feeding fetched bodies into the word index
//! - Waiting for quiescence, then shutting the pool down and reporting
//!
//! Work fans out recursively: a unit that fetched a page admits and submits
//! that page's links before it finishes, so the active counter only drops to
//! zero once the reachable, budget-admitted graph has been explored.

use crate::config::Config;
use crate::crawler::fetcher::{Fetch, HttpFetcher};
use crate::crawler::frontier::Frontier;
use crate::crawler::pool::WorkerPool;
use crate::crawler::quiescence::ActiveWork;
use crate::index::WordIndex;
use crate::output::CrawlReport;
use crate::url::normalize_url;
use crate::RippleError;
use chrono::Utc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use url::Url;

/// State shared by the coordinator and every unit of work
struct CrawlShared<F> {
    fetcher: F,
    frontier: Arc<Frontier>,
    index: WordIndex,
    pool: WorkerPool,
    active: Arc<ActiveWork>,
    fetch_timeout: Duration,
    pages_fetched: AtomicUsize,
    pages_failed: AtomicUsize,
}

impl<F: Fetch> CrawlShared<F> {
    /// Admits an address and, if admitted, submits a unit of work for it
    ///
    /// The active counter is raised before submission. The guard travels
    /// inside the unit, so it is released when the unit finishes or when a
    /// closed pool drops the unit unrun.
    fn schedule(self: &Arc<Self>, url: Url) -> bool {
        if !self.frontier.try_admit(&url) {
            return false;
        }

        let guard = self.active.begin();
        let shared = Arc::clone(self);

        let submitted = self.pool.submit(async move {
            shared.process(url).await;
            drop(guard);
        });

        if !submitted {
            tracing::debug!("Worker pool closed; admitted page will not be fetched");
        }

        true
    }

    /// Fetches one page, indexes it and schedules its links
    async fn process(self: &Arc<Self>, url: Url) {
        tracing::info!(
            "Crawling: {} (active tasks: {}, busy workers: {}/{})",
            url,
            self.active.current(),
            self.pool.busy(),
            self.pool.width()
        );

        match tokio::time::timeout(self.fetch_timeout, self.fetcher.fetch(&url)).await {
            Ok(Some(page)) => {
                self.pages_fetched.fetch_add(1, Ordering::Relaxed);
                self.index.record(page.url.as_str(), &page.body);

                let mut admitted = 0;
                for link in page.links {
                    if self.schedule(link) {
                        admitted += 1;
                    }
                }
                tracing::debug!("{}: admitted {} new link(s)", url, admitted);
            }
            Ok(None) => {
                self.pages_failed.fetch_add(1, Ordering::Relaxed);
            }
            Err(_) => {
                self.pages_failed.fetch_add(1, Ordering::Relaxed);
                tracing::warn!("Fetch of {} timed out after {:?}", url, self.fetch_timeout);
            }
        }
    }
}

/// Handle for stopping a running crawl from outside
///
/// Stopping halts admissions only. Fetches already in flight finish, and the
/// crawl then completes normally with whatever was indexed.
#[derive(Debug, Clone)]
pub struct StopHandle {
    frontier: Arc<Frontier>,
}

impl StopHandle {
    pub fn stop(&self) {
        self.frontier.halt();
    }
}

/// Main crawler coordinator structure
///
/// A coordinator runs a single crawl. The frontier and index stay readable
/// after [`Coordinator::run`] returns.
pub struct Coordinator<F = HttpFetcher> {
    shared: Arc<CrawlShared<F>>,
    shutdown_grace: Duration,
    top_words: usize,
    started: AtomicBool,
}

impl Coordinator<HttpFetcher> {
    /// Creates a coordinator that fetches over HTTP
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(RippleError)` - The HTTP client could not be built
    pub fn new(config: &Config) -> Result<Self, RippleError> {
        let fetcher = HttpFetcher::from_config(&config.user_agent, &config.crawler)?;
        Ok(Self::with_fetcher(config, fetcher))
    }
}

impl<F: Fetch> Coordinator<F> {
    /// Creates a coordinator around any page source
    pub fn with_fetcher(config: &Config, fetcher: F) -> Self {
        let crawler = &config.crawler;

        let shared = CrawlShared {
            fetcher,
            frontier: Arc::new(Frontier::new(crawler.max_pages)),
            index: WordIndex::new(),
            pool: WorkerPool::new(crawler.workers.max(1)),
            active: ActiveWork::new(),
            fetch_timeout: crawler.fetch_timeout(),
            pages_fetched: AtomicUsize::new(0),
            pages_failed: AtomicUsize::new(0),
        };

        Self {
            shared: Arc::new(shared),
            shutdown_grace: crawler.shutdown_grace(),
            top_words: config.report.top_words,
            started: AtomicBool::new(false),
        }
    }

    /// Runs the crawl from `seed` until quiescence
    ///
    /// 1. Normalize the seed; a malformed seed aborts before any work starts
    /// 2. Admit the seed and submit its unit of work
    /// 3. Wait until no unit of work is outstanding
    /// 4. Shut the worker pool down with a bounded grace period
    /// 5. Build the completion report from the frontier and index
    ///
    /// Per-page failures never surface here; they are logged and counted.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use ripple_indexer::config::Config;
    /// use ripple_indexer::crawler::Coordinator;
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let coordinator = Coordinator::new(&Config::default())?;
    /// let report = coordinator.run("https://example.com/").await?;
    /// println!("Visited {} pages", report.pages_visited);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn run(&self, seed: &str) -> Result<CrawlReport, RippleError> {
        if self.started.swap(true, Ordering::SeqCst) {
            return Err(RippleError::AlreadyRun);
        }

        let seed = normalize_url(seed)?;
        let started_at = Utc::now();
        let timer = Instant::now();

        tracing::info!(
            "Starting crawl at {} (budget: {} pages, workers: {})",
            seed,
            self.shared.frontier.max_pages(),
            self.shared.pool.width()
        );

        if !self.shared.schedule(seed.clone()) {
            tracing::info!("Seed was not admitted; nothing to crawl");
        }

        self.shared.active.wait_idle().await;
        tracing::debug!("Crawl reached quiescence; shutting down worker pool");

        let shutdown = self.shared.pool.shutdown(self.shutdown_grace).await;

        let report = CrawlReport {
            seed: seed.to_string(),
            pages_visited: self.shared.frontier.len(),
            pages_fetched: self.shared.pages_fetched.load(Ordering::Relaxed),
            pages_failed: self.shared.pages_failed.load(Ordering::Relaxed),
            unique_words: self.shared.index.unique_words(),
            top_words: self.shared.index.top_ranked(self.top_words),
            visited: self.shared.frontier.visited(),
            budget_exhausted: self.shared.frontier.is_exhausted(),
            halted: self.shared.frontier.is_halted(),
            drained_cleanly: shutdown.is_clean(),
            started_at,
            finished_at: Utc::now(),
            elapsed: timer.elapsed(),
        };

        tracing::info!(
            "Crawling finished. Visited {} pages in {:?}",
            report.pages_visited,
            report.elapsed
        );

        Ok(report)
    }

    /// Returns a handle that halts further admissions
    pub fn stop_handle(&self) -> StopHandle {
        StopHandle {
            frontier: Arc::clone(&self.shared.frontier),
        }
    }

    pub fn index(&self) -> &WordIndex {
        &self.shared.index
    }

    pub fn frontier(&self) -> &Frontier {
        &self.shared.frontier
    }

    /// Units of work currently outstanding
    pub fn active_tasks(&self) -> usize {
        self.shared.active.current()
    }
}
