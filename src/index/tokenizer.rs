//! Page text tokenizer
//!
//! Turns raw page markup into the distinct set of words that get indexed.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Words too common to be worth indexing
pub const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "the", "in", "is", "it", "of", "for", "on", "with", "as", "by", "to",
];

/// Shortest token length that is indexed
pub const MIN_TOKEN_LEN: usize = 3;

static TAG_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag pattern"));

/// Extracts the distinct indexable tokens from page markup
///
/// # Tokenization Rules
///
/// 1. Replace every markup tag with a space
/// 2. Split on runs of non-ASCII-alphanumeric characters
/// 3. Lower-case each piece
/// 4. Drop tokens shorter than [`MIN_TOKEN_LEN`]
/// 5. Drop stop words
///
/// # Examples
///
/// ```
/// use ripple_indexer::index::tokenize;
///
/// let words = tokenize("<p>The Quick brown fox</p>");
/// assert!(words.contains("quick"));
/// assert!(!words.contains("the"));
/// assert!(!words.contains("p"));
/// ```
pub fn tokenize(body: &str) -> HashSet<String> {
    let text = TAG_PATTERN.replace_all(body, " ");

    text.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|piece| piece.len() >= MIN_TOKEN_LEN)
        .map(str::to_ascii_lowercase)
        .filter(|word| !is_stop_word(word))
        .collect()
}

/// Returns true if the (lower-cased) word is on the stop list
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(&word)
}
