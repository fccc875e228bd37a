//! Page records, their on-disk store, and the corpus built from them.

pub mod loader;
pub mod record;
pub mod store;

pub use loader::{Corpus, PageInfo};
pub use record::PageRecord;
pub use store::CorpusStore;
