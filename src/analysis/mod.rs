//! Text analysis for crawled pages and queries.
//!
//! Provides tokenizers, token filters and the analyzers that chain them,
//! plus the whitespace normalization applied to every extracted text value.

pub mod analyzer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

pub use analyzer::*;
pub use token::*;

/// Collapse every run of whitespace to a single space and trim both ends.
///
/// # Examples
///
/// ```
/// use semcrawl::analysis::normalize_text;
///
/// assert_eq!(normalize_text("  Hello \n\t world  "), "Hello world");
/// ```
pub fn normalize_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text("a  b\n\nc"), "a b c");
        assert_eq!(normalize_text(" \t "), "");
        assert_eq!(normalize_text("single"), "single");
    }
}
