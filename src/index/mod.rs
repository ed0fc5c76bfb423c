//! Concurrent inverted word index
//!
//! Every fetch task records its page here directly. The map is sharded by
//! `dashmap`, so two tasks only contend when they touch the same token shard.

mod tokenizer;

pub use tokenizer::{is_stop_word, tokenize, MIN_TOKEN_LEN, STOP_WORDS};

use dashmap::DashMap;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A word and the number of distinct pages it appeared on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedWord {
    pub word: String,
    pub pages: usize,
}

/// Mapping from lower-cased token to the set of page addresses containing it
#[derive(Debug, Default)]
pub struct WordIndex {
    entries: DashMap<String, HashSet<String>>,
    pages_indexed: AtomicUsize,
}

impl WordIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records every indexable token of `body` against `address`
    ///
    /// Safe to call from any number of tasks at once. Recording the same
    /// address twice is harmless; page sets only ever grow.
    pub fn record(&self, address: &str, body: &str) {
        let words = tokenize(body);

        for word in words {
            self.entries
                .entry(word)
                .or_default()
                .insert(address.to_string());
        }

        self.pages_indexed.fetch_add(1, Ordering::Relaxed);
    }

    /// Returns the `k` words found on the most pages, most frequent first
    ///
    /// Words with equal page counts are ordered alphabetically, so the result
    /// does not depend on hash-map iteration order.
    pub fn top_ranked(&self, k: usize) -> Vec<RankedWord> {
        let mut ranked: Vec<RankedWord> = self
            .entries
            .iter()
            .map(|entry| RankedWord {
                word: entry.key().clone(),
                pages: entry.value().len(),
            })
            .collect();

        ranked.sort_by(|a, b| b.pages.cmp(&a.pages).then_with(|| a.word.cmp(&b.word)));
        ranked.truncate(k);
        ranked
    }

    /// Pages recorded for a word, sorted
    pub fn pages_for(&self, word: &str) -> Vec<String> {
        let mut pages: Vec<String> = self
            .entries
            .get(&word.to_ascii_lowercase())
            .map(|entry| entry.value().iter().cloned().collect())
            .unwrap_or_default();
        pages.sort();
        pages
    }

    /// Number of distinct words in the index
    pub fn unique_words(&self) -> usize {
        self.entries.len()
    }

    /// Number of `record` calls made so far
    pub fn pages_indexed(&self) -> usize {
        self.pages_indexed.load(Ordering::Relaxed)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
