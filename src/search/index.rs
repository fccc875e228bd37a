//! The immutable index queried by [`SearchEngine`](super::SearchEngine).
//!
//! Building runs the whole batch once: records → vocabulary and raw counts →
//! IDF and column normalization → truncated SVD. Nothing mutates afterwards,
//! so a `SearchIndex` can be shared behind an `Arc` by any number of queries.

use std::fmt;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::config::IndexConfig;
use crate::corpus::{Corpus, CorpusStore, PageInfo, PageRecord};
use crate::error::Result;
use crate::matrix::sparse::SparseMatrix;
use crate::matrix::weighting;
use crate::matrix::LowRankApproximation;

/// Size summary of an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    pub words_count: usize,
    pub pages_count: usize,
    pub svd_rank: usize,
}

/// Corpus, weighted term-document matrix and its low-rank reconstruction.
#[derive(Debug)]
pub struct SearchIndex {
    corpus: Corpus,
    raw_counts: SparseMatrix,
    weighted: SparseMatrix,
    low_rank: LowRankApproximation,
    use_idf: bool,
}

impl SearchIndex {
    /// Build an index from in-memory records.
    pub fn build(records: &[PageRecord], config: &IndexConfig) -> Result<Self> {
        let (corpus, counts) = Corpus::from_records(records)?;
        Self::from_corpus(corpus, counts, config)
    }

    /// Load every record under `data_dir` and build an index from them.
    pub fn open<P: AsRef<Path>>(data_dir: P, config: &IndexConfig) -> Result<Self> {
        let store = CorpusStore::open(data_dir)?;
        let (corpus, counts) = Corpus::load(&store)?;
        Self::from_corpus(corpus, counts, config)
    }

    /// Weight and decompose an already loaded corpus.
    ///
    /// The rank is checked against the matrix shape before any numerical work.
    pub fn from_corpus(corpus: Corpus, counts: SparseMatrix, config: &IndexConfig) -> Result<Self> {
        LowRankApproximation::validate_rank(counts.shape(), config.svd_rank)?;

        let weighted = weighting::weight(&counts, config.use_idf)?;
        let low_rank = LowRankApproximation::compute(&weighted, config.svd_rank)?;

        let index = SearchIndex {
            corpus,
            raw_counts: counts,
            weighted,
            low_rank,
            use_idf: config.use_idf,
        };
        info!("Built {index}");

        Ok(index)
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// Vocabulary in row order.
    pub fn words(&self) -> &[String] {
        self.corpus.words()
    }

    /// Pages in column order.
    pub fn pages(&self) -> &[PageInfo] {
        self.corpus.pages()
    }

    pub fn word_index(&self, word: &str) -> Option<usize> {
        self.corpus.word_index(word)
    }

    pub fn page_index(&self, url: &str) -> Option<usize> {
        self.corpus.page_index(url)
    }

    /// Raw occurrence counts, words × pages.
    pub fn raw_counts(&self) -> &SparseMatrix {
        &self.raw_counts
    }

    /// IDF-weighted (when enabled), column-normalized matrix.
    pub fn weighted(&self) -> &SparseMatrix {
        &self.weighted
    }

    pub fn low_rank(&self) -> &LowRankApproximation {
        &self.low_rank
    }

    pub fn svd_rank(&self) -> usize {
        self.low_rank.rank()
    }

    pub fn uses_idf(&self) -> bool {
        self.use_idf
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            words_count: self.corpus.words_count(),
            pages_count: self.corpus.pages_count(),
            svd_rank: self.svd_rank(),
        }
    }
}

impl fmt::Display for SearchIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = self.stats();
        write!(
            f,
            "SearchIndex(words_count={}, pages_count={}, svd_rank={})",
            stats.words_count, stats.pages_count, stats.svd_rank
        )
    }
}
