//! URL handling module for Ripple Indexer
//!
//! Addresses are the identity keys of a crawl. Everything that enters the
//! frontier has been through [`normalize_url`] first.

mod normalize;

pub use normalize::{is_crawlable_scheme, normalize_parsed, normalize_url};
