//! Building the searchable index and answering queries against it.

pub mod engine;
pub mod index;
pub mod result;

pub use engine::SearchEngine;
pub use index::{IndexStats, SearchIndex};
pub use result::ScoredResult;
