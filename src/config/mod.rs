//! Configuration module for Ripple Indexer
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! All keys are optional; command-line flags override whatever the file sets.
//!
//! # Example
//!
//! ```no_run
//! use ripple_indexer::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("ripple.toml")).unwrap();
//! println!("Crawler will use {} workers", config.crawler.workers);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, ReportConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
