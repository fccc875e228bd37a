//! Analyzer used to turn page text into indexable words.
//!
//! # Pipeline
//!
//! 1. RegexTokenizer (word runs, kept whole across `-` and `.`)
//! 2. LowercaseFilter
//! 3. AlphabeticFilter (ASCII letters only)
//! 4. StopFilter (NLTK English stop words)
//!
//! # Examples
//!
//! ```
//! use semcrawl::analysis::analyzer::PageAnalyzer;
//!
//! let analyzer = PageAnalyzer::new().unwrap();
//! let counts = analyzer.word_counts("The cat, the CAT and 3 dogs").unwrap();
//!
//! assert_eq!(counts.get("cat"), Some(&2));
//! assert_eq!(counts.get("dogs"), Some(&1));
//! assert!(!counts.contains_key("the"));
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::alphabetic::AlphabeticFilter;
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::token_filter::stop::StopFilter;
use crate::analysis::tokenizer::regex::RegexTokenizer;
use crate::error::Result;

/// Analyzer producing the normalized word keys stored in page records.
pub struct PageAnalyzer {
    inner: PipelineAnalyzer,
}

impl PageAnalyzer {
    /// Create a page analyzer with the default English stop words.
    pub fn new() -> Result<Self> {
        let tokenizer = Arc::new(RegexTokenizer::new()?);
        let analyzer = PipelineAnalyzer::new(tokenizer)
            .add_filter(Arc::new(LowercaseFilter::new()))
            .add_filter(Arc::new(AlphabeticFilter::new()))
            .add_filter(Arc::new(StopFilter::new()))
            .with_name("page");

        Ok(PageAnalyzer { inner: analyzer })
    }

    /// Count occurrences of every surviving word in `text`.
    pub fn word_counts(&self, text: &str) -> Result<BTreeMap<String, u32>> {
        let mut counts = BTreeMap::new();
        for token in self.analyze(text)? {
            *counts.entry(token.text).or_insert(0) += 1;
        }
        Ok(counts)
    }

    /// Get the inner pipeline analyzer.
    pub fn inner(&self) -> &PipelineAnalyzer {
        &self.inner
    }
}

impl Analyzer for PageAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.inner.analyze(text)
    }

    fn name(&self) -> &'static str {
        "page"
    }
}

impl std::fmt::Debug for PageAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageAnalyzer")
            .field("inner", &self.inner)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;

    #[test]
    fn test_page_analyzer() {
        let analyzer = PageAnalyzer::new().unwrap();

        let tokens: Vec<Token> = analyzer
            .analyze("Hello the World, and test42 test")
            .unwrap()
            .collect();

        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].text, "hello");
        assert_eq!(tokens[1].text, "world");
        assert_eq!(tokens[2].text, "test");
    }

    #[test]
    fn test_word_counts() {
        let analyzer = PageAnalyzer::new().unwrap();
        let counts = analyzer.word_counts("cat cat dog").unwrap();

        assert_eq!(counts.len(), 2);
        assert_eq!(counts["cat"], 2);
        assert_eq!(counts["dog"], 1);
    }

    #[test]
    fn test_joined_words_are_dropped_whole() {
        let analyzer = PageAnalyzer::new().unwrap();
        let counts = analyzer
            .word_counts("state-of-the-art well-known e.g. cat_dog")
            .unwrap();
        assert!(counts.is_empty(), "unexpected words: {counts:?}");

        let counts = analyzer.word_counts("Cats purr. Dogs bark - loudly.").unwrap();
        assert_eq!(
            counts.keys().collect::<Vec<_>>(),
            vec!["bark", "cats", "dogs", "loudly", "purr"]
        );
    }
}
