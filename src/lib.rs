//! Ripple Indexer: a concurrent link-following word indexer
//!
//! This crate crawls the pages reachable from a seed address, bounded by a page
//! budget, and builds an inverted index from words to the pages containing them.

pub mod config;
pub mod crawler;
pub mod index;
pub mod output;
pub mod url;

use thiserror::Error;

/// Main error type for Ripple Indexer operations
///
/// Only startup failures surface through this type. Errors inside a single
/// fetch are logged and contained within that unit of work.
#[derive(Debug, Error)]
pub enum RippleError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid seed address: {0}")]
    InvalidSeed(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Crawl has already been run by this coordinator")]
    AlreadyRun,
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Result type alias for Ripple Indexer operations
pub type Result<T> = std::result::Result<T, RippleError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use crate::url::normalize_url;
pub use config::Config;
pub use crawler::{crawl, Coordinator};
pub use index::WordIndex;
pub use output::CrawlReport;
