//! Output module for crawl summaries
//!
//! The crawl keeps no persistent state; its only output is the completion
//! report printed when the crawl finishes.

mod report;

pub use report::{print_report, CrawlReport};
