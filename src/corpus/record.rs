//! The persisted form of one crawled page.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One crawled page as written to the corpus store.
///
/// Serialized as
/// `{"url": ..., "title": ..., "description": ..., "words": {word: count}}`.
/// Word keys are lowercase, alphabetic and stopword-free.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    /// Absolute URL the page was fetched from.
    pub url: String,
    /// Whitespace-normalized page title, possibly empty.
    pub title: String,
    /// Whitespace-normalized page description, possibly empty.
    pub description: String,
    /// Occurrence count of every indexed word on the page.
    pub words: BTreeMap<String, u32>,
}

impl PageRecord {
    /// Create a record from its parts.
    pub fn new<U, T, D>(url: U, title: T, description: D, words: BTreeMap<String, u32>) -> Self
    where
        U: Into<String>,
        T: Into<String>,
        D: Into<String>,
    {
        PageRecord {
            url: url.into(),
            title: title.into(),
            description: description.into(),
            words,
        }
    }

    /// Build a record whose word counts come from a whitespace-separated list.
    ///
    /// Handy for fixtures: `PageRecord::from_text(url, "cat cat dog")`.
    pub fn from_text<U: Into<String>>(url: U, text: &str) -> Self {
        let mut words = BTreeMap::new();
        for word in text.split_whitespace() {
            *words.entry(word.to_string()).or_insert(0) += 1;
        }
        let url = url.into();
        PageRecord::new(url.clone(), url, "", words)
    }

    /// Total number of word occurrences on the page.
    pub fn total_words(&self) -> u64 {
        self.words.values().map(|&count| u64::from(count)).sum()
    }
}
