//! Crawl completion report
//!
//! Built once the crawl has reached quiescence, from the frozen frontier and
//! word index.

use crate::index::RankedWord;
use chrono::{DateTime, Utc};
use std::fmt::Write as _;
use std::time::Duration;

/// Summary of a finished crawl
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// Normalized seed address
    pub seed: String,

    /// Distinct pages admitted for fetching (including ones that failed)
    pub pages_visited: usize,

    /// Pages fetched and indexed successfully
    pub pages_fetched: usize,

    /// Pages whose fetch failed or timed out
    pub pages_failed: usize,

    /// Distinct words in the index
    pub unique_words: usize,

    /// Most widespread words, most pages first
    pub top_words: Vec<RankedWord>,

    /// Admitted addresses in admission order
    pub visited: Vec<String>,

    /// The page budget was fully spent
    pub budget_exhausted: bool,

    /// Admissions were stopped from outside before the crawl finished
    pub halted: bool,

    /// The worker pool shut down without aborting any task
    pub drained_cleanly: bool,

    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub elapsed: Duration,
}

impl CrawlReport {
    /// Pages per second over the whole crawl
    pub fn rate(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.pages_visited as f64 / secs
        } else {
            0.0
        }
    }

    /// Renders the report as plain text
    pub fn render(&self) -> String {
        let mut out = String::new();

        // Writing to a String cannot fail
        let _ = writeln!(out, "=== Crawl Report ===\n");
        let _ = writeln!(out, "Seed: {}", self.seed);
        let _ = writeln!(
            out,
            "Started: {}",
            self.started_at.format("%Y-%m-%d %H:%M:%S UTC")
        );
        let _ = writeln!(
            out,
            "Duration: {:.2}s ({:.2} pages/sec)",
            self.elapsed.as_secs_f64(),
            self.rate()
        );
        let _ = writeln!(out);

        let _ = writeln!(out, "Pages:");
        let _ = writeln!(out, "  Visited: {}", self.pages_visited);
        let _ = writeln!(out, "  Fetched: {}", self.pages_fetched);
        let _ = writeln!(out, "  Failed: {}", self.pages_failed);
        if self.budget_exhausted {
            let _ = writeln!(out, "  (page budget reached)");
        }
        if self.halted {
            let _ = writeln!(out, "  (crawl stopped early)");
        }
        if !self.drained_cleanly {
            let _ = writeln!(out, "  (worker pool did not shut down cleanly)");
        }
        let _ = writeln!(out);

        let _ = writeln!(out, "--- Indexing Results ---");
        let _ = writeln!(out, "Total unique words indexed: {}", self.unique_words);
        for ranked in &self.top_words {
            let _ = writeln!(
                out,
                "Word: '{}' appeared on {} page{}.",
                ranked.word,
                ranked.pages,
                if ranked.pages == 1 { "" } else { "s" }
            );
        }

        out
    }
}

/// Prints the report to stdout
pub fn print_report(report: &CrawlReport) {
    print!("{}", report.render());
}
