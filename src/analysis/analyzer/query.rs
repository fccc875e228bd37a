//! Analyzer used to split query strings.
//!
//! Queries are only lowercased and split on whitespace. Punctuation and stop
//! words are kept, so `"cat,"` never matches the indexed word `cat`. This is
//! deliberately looser than [`PageAnalyzer`](super::PageAnalyzer).

use std::sync::Arc;

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::tokenizer::whitespace::WhitespaceTokenizer;
use crate::error::Result;

/// Whitespace + lowercase analyzer for free-text queries.
pub struct QueryAnalyzer {
    inner: PipelineAnalyzer,
}

impl QueryAnalyzer {
    /// Create a new query analyzer.
    pub fn new() -> Self {
        let analyzer = PipelineAnalyzer::new(Arc::new(WhitespaceTokenizer::new()))
            .add_filter(Arc::new(LowercaseFilter::new()))
            .with_name("query");

        QueryAnalyzer { inner: analyzer }
    }

    /// Split a query into its lowercased terms.
    pub fn terms(&self, query: &str) -> Result<Vec<String>> {
        Ok(self.analyze(query)?.map(|token| token.text).collect())
    }
}

impl Default for QueryAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer for QueryAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.inner.analyze(text)
    }

    fn name(&self) -> &'static str {
        "query"
    }
}

impl std::fmt::Debug for QueryAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryAnalyzer")
            .field("inner", &self.inner)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_terms() {
        let analyzer = QueryAnalyzer::new();
        let terms = analyzer.terms("  Cat the DOG, cat ").unwrap();

        assert_eq!(terms, vec!["cat", "the", "dog,", "cat"]);
    }

    #[test]
    fn test_empty_query() {
        assert!(QueryAnalyzer::new().terms("   ").unwrap().is_empty());
    }
}
