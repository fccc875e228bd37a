//! Analyzer implementations that combine tokenizers and filters.

mod analyzer;
mod page;
mod pipeline;
mod query;

pub use analyzer::Analyzer;
pub use page::PageAnalyzer;
pub use pipeline::PipelineAnalyzer;
pub use query::QueryAnalyzer;
