//! Query scoring and ranking.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use semcrawl::config::IndexConfig;
//! use semcrawl::corpus::PageRecord;
//! use semcrawl::search::{SearchEngine, SearchIndex};
//!
//! let records = vec![
//!     PageRecord::from_text("https://a.test/", "cat cat dog"),
//!     PageRecord::from_text("https://b.test/", "dog dog dog"),
//! ];
//! let config = IndexConfig { svd_rank: 1, use_idf: true };
//! let engine = SearchEngine::new(Arc::new(SearchIndex::build(&records, &config).unwrap()));
//!
//! let results = engine.search("cat", 2, false).unwrap();
//! assert_eq!(results[0].url, "https://a.test/");
//! ```

use std::sync::Arc;

use ahash::AHashMap;
use log::debug;

use crate::analysis::analyzer::QueryAnalyzer;
use crate::error::Result;
use crate::matrix::sparse::SparseVector;
use crate::search::index::SearchIndex;
use crate::search::result::ScoredResult;

/// Read-only query engine over a shared [`SearchIndex`].
#[derive(Debug, Clone)]
pub struct SearchEngine {
    index: Arc<SearchIndex>,
    analyzer: Arc<QueryAnalyzer>,
}

impl SearchEngine {
    pub fn new(index: Arc<SearchIndex>) -> Self {
        SearchEngine {
            index,
            analyzer: Arc::new(QueryAnalyzer::new()),
        }
    }

    pub fn index(&self) -> &SearchIndex {
        &self.index
    }

    /// Rank pages against `query`.
    ///
    /// With `noise_filter` the low-rank reconstruction is scored instead of
    /// the weighted matrix. A non-positive `results_count` yields no results.
    pub fn search(
        &self,
        query: &str,
        results_count: i64,
        noise_filter: bool,
    ) -> Result<Vec<ScoredResult>> {
        let query_vector = self.query_vector(query)?;
        let scores = self.match_scores(&query_vector, noise_filter)?;
        let results = self.top_results(&scores, results_count);

        debug!(
            "Query {query:?} matched {} of {} vocabulary terms, returning {} results",
            query_vector.nnz(),
            self.index.words().len(),
            results.len()
        );

        Ok(results)
    }

    /// Unit-length vector of query term counts over the vocabulary.
    ///
    /// Terms outside the vocabulary are dropped; if none remain the vector
    /// is all-zero.
    pub fn query_vector(&self, query: &str) -> Result<SparseVector> {
        let mut counts: AHashMap<usize, f64> = AHashMap::new();
        for term in self.analyzer.terms(query)? {
            if let Some(index) = self.index.word_index(&term) {
                *counts.entry(index).or_insert(0.0) += 1.0;
            }
        }

        let mut vector = SparseVector::from_entries(self.index.words().len(), counts)?;
        vector.normalize();
        Ok(vector)
    }

    /// `|qᵗ·M|` per page, scaled to unit length unless it is all-zero.
    pub fn match_scores(&self, query_vector: &SparseVector, noise_filter: bool) -> Result<Vec<f64>> {
        let matrix = if noise_filter {
            self.index.low_rank().reconstruction()
        } else {
            self.index.weighted()
        };

        let mut scores: Vec<f64> = matrix
            .transpose_dot(query_vector)?
            .into_iter()
            .map(f64::abs)
            .collect();

        let norm = scores.iter().map(|s| s * s).sum::<f64>().sqrt();
        if norm > 0.0 {
            for score in &mut scores {
                *score /= norm;
            }
        }

        Ok(scores)
    }

    /// The `results_count` best pages, highest score first.
    ///
    /// Equal scores keep corpus order.
    pub fn top_results(&self, scores: &[f64], results_count: i64) -> Vec<ScoredResult> {
        if results_count <= 0 {
            return Vec::new();
        }
        let wanted = usize::try_from(results_count).unwrap_or(usize::MAX);

        let mut order: Vec<usize> = (0..scores.len()).collect();
        order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));

        order
            .into_iter()
            .take(wanted)
            .filter_map(|index| {
                self.index
                    .corpus()
                    .page(index)
                    .map(|page| ScoredResult::new(page, scores[index]))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IndexConfig;
    use crate::corpus::PageRecord;

    fn engine() -> SearchEngine {
        let records = vec![
            PageRecord::from_text("https://a.test/", "cat cat dog"),
            PageRecord::from_text("https://b.test/", "dog dog dog bird"),
            PageRecord::from_text("https://c.test/", "bird fish"),
        ];
        let config = IndexConfig {
            svd_rank: 2,
            use_idf: false,
        };
        SearchEngine::new(Arc::new(SearchIndex::build(&records, &config).unwrap()))
    }

    #[test]
    fn test_query_vector_counts_and_normalizes() {
        let engine = engine();
        let vector = engine.query_vector("Cat CAT dog unknown").unwrap();
        let dense = vector.to_dense();

        let cat = engine.index().word_index("cat").unwrap();
        let dog = engine.index().word_index("dog").unwrap();
        assert!((dense[cat] - 2.0 / 5f64.sqrt()).abs() < 1e-12);
        assert!((dense[dog] - 1.0 / 5f64.sqrt()).abs() < 1e-12);
        assert!((vector.norm() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_query_punctuation_is_not_stripped() {
        let engine = engine();
        assert!(engine.query_vector("cat,").unwrap().is_zero());
    }

    #[test]
    fn test_zero_query_scores_are_zero() {
        let engine = engine();
        let vector = engine.query_vector("").unwrap();
        for noise_filter in [false, true] {
            let scores = engine.match_scores(&vector, noise_filter).unwrap();
            assert_eq!(scores, vec![0.0; 3]);
        }
    }

    #[test]
    fn test_scores_are_unit_length() {
        let engine = engine();
        let vector = engine.query_vector("bird").unwrap();
        let scores = engine.match_scores(&vector, false).unwrap();

        let norm = scores.iter().map(|s| s * s).sum::<f64>().sqrt();
        assert!((norm - 1.0).abs() < 1e-12);
        assert_eq!(scores[0], 0.0);
    }

    #[test]
    fn test_top_results_ordering_and_ties() {
        let engine = engine();
        let results = engine.top_results(&[0.2, 0.9, 0.2], 3);

        let urls: Vec<&str> = results.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(urls, vec!["https://b.test/", "https://a.test/", "https://c.test/"]);
        assert_eq!(results[0].score, 0.9);
    }

    #[test]
    fn test_results_count_bounds() {
        let engine = engine();
        assert!(engine.search("cat", 0, false).unwrap().is_empty());
        assert!(engine.search("cat", -5, true).unwrap().is_empty());
        assert_eq!(engine.search("cat", 1, false).unwrap().len(), 1);
        assert_eq!(engine.search("cat", 100, true).unwrap().len(), 3);
    }

    #[test]
    fn test_scores_are_rounded() {
        let engine = engine();
        for result in engine.search("dog bird", 3, true).unwrap() {
            assert_eq!(result.score, (result.score * 100.0).round() / 100.0);
            assert!((0.0..=1.0).contains(&result.score));
        }
    }
}
