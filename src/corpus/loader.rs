//! Turning page records into a vocabulary, a page table and a count matrix.

use ahash::AHashMap;
use log::info;
use serde::{Deserialize, Serialize};

use crate::corpus::record::PageRecord;
use crate::corpus::store::CorpusStore;
use crate::error::Result;
use crate::matrix::sparse::SparseMatrix;

/// The displayable part of a page record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub url: String,
    pub title: String,
    pub description: String,
}

/// Vocabulary and page table of a loaded corpus.
///
/// Indices are dense, 0-based and assigned in first-seen order: pages in
/// record order, words in the order they are met while walking the records.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    words: Vec<String>,
    pages: Vec<PageInfo>,
    word_to_index: AHashMap<String, usize>,
    page_to_index: AHashMap<String, usize>,
}

impl Corpus {
    /// Build the corpus and its raw term-document count matrix.
    ///
    /// Rows of the matrix are words, columns are pages. Each record becomes
    /// its own column; if two records share a URL the URL maps to the later one.
    pub fn from_records(records: &[PageRecord]) -> Result<(Corpus, SparseMatrix)> {
        let mut corpus = Corpus::default();
        let mut triplets = Vec::new();

        for record in records {
            let page_index = corpus.pages.len();
            corpus.page_to_index.insert(record.url.clone(), page_index);
            corpus.pages.push(PageInfo {
                url: record.url.clone(),
                title: record.title.clone(),
                description: record.description.clone(),
            });

            for (word, &count) in &record.words {
                let word_index = corpus.intern_word(word);
                triplets.push((word_index, page_index, f64::from(count)));
            }
        }

        let counts = SparseMatrix::from_triplets(corpus.words.len(), corpus.pages.len(), triplets)?;
        Ok((corpus, counts))
    }

    /// Load every record of `store` and build the corpus from them.
    pub fn load(store: &CorpusStore) -> Result<(Corpus, SparseMatrix)> {
        let records = store.load_records()?;
        let (corpus, counts) = Self::from_records(&records)?;

        info!(
            "Loaded {} pages with {} distinct words from {}",
            corpus.pages_count(),
            corpus.words_count(),
            store.directory().display()
        );

        Ok((corpus, counts))
    }

    fn intern_word(&mut self, word: &str) -> usize {
        if let Some(&index) = self.word_to_index.get(word) {
            return index;
        }
        let index = self.words.len();
        self.words.push(word.to_string());
        self.word_to_index.insert(word.to_string(), index);
        index
    }

    /// Vocabulary in index order.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Pages in index order.
    pub fn pages(&self) -> &[PageInfo] {
        &self.pages
    }

    pub fn words_count(&self) -> usize {
        self.words.len()
    }

    pub fn pages_count(&self) -> usize {
        self.pages.len()
    }

    /// Row index of `word`, if it is in the vocabulary.
    pub fn word_index(&self, word: &str) -> Option<usize> {
        self.word_to_index.get(word).copied()
    }

    /// Column index of the page fetched from `url`.
    pub fn page_index(&self, url: &str) -> Option<usize> {
        self.page_to_index.get(url).copied()
    }

    /// Page at column `index`.
    pub fn page(&self, index: usize) -> Option<&PageInfo> {
        self.pages.get(index)
    }
}
