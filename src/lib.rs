//! # semcrawl
//!
//! Crawl a bounded web neighborhood, index it with latent semantic indexing,
//! and answer free-text queries with ranked pages.
//!
//! ## Features
//!
//! - Concurrent, depth-bounded, same-origin crawler with a deduplicating frontier
//! - One JSON record per page, keyed by a hash of its URL
//! - Term-document matrix with optional IDF weighting
//! - Truncated SVD denoising of the term-document space
//! - Cosine-style ranking against either matrix
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use semcrawl::config::IndexConfig;
//! use semcrawl::corpus::PageRecord;
//! use semcrawl::search::{SearchEngine, SearchIndex};
//!
//! let records = vec![
//!     PageRecord::from_text("https://a.test/", "rust borrow checker"),
//!     PageRecord::from_text("https://b.test/", "python garbage collector"),
//!     PageRecord::from_text("https://c.test/", "rust compiler"),
//! ];
//! let config = IndexConfig { svd_rank: 2, use_idf: true };
//! let index = Arc::new(SearchIndex::build(&records, &config).unwrap());
//!
//! let results = SearchEngine::new(index).search("rust", 2, true).unwrap();
//! assert_eq!(results.len(), 2);
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod corpus;
pub mod crawl;
pub mod error;
pub mod matrix;
pub mod search;

pub mod prelude {
    pub use crate::config::{CrawlConfig, EngineConfig, IndexConfig};
    pub use crate::corpus::{Corpus, CorpusStore, PageRecord};
    pub use crate::crawl::{CrawlReport, Crawler, Fetcher};
    pub use crate::error::{Result, SemcrawlError};
    pub use crate::search::{ScoredResult, SearchEngine, SearchIndex};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
