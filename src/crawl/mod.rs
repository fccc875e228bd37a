//! Concurrent, depth-bounded, same-origin web crawling.
//!
//! A [`Crawler`] runs a fixed pool of workers over one shared [`Frontier`].
//! Each worker fetches a page through a [`Fetcher`], turns it into a
//! [`PageRecord`](crate::corpus::PageRecord) with the [`Extractor`], persists
//! it, and feeds newly discovered links back into the frontier.

pub mod crawler;
pub mod extract;
pub mod fetcher;
pub mod frontier;

pub use crawler::{CrawlReport, Crawler, ScrapeBudget};
pub use extract::{ExtractedPage, Extractor, is_same_origin};
pub use fetcher::{Fetcher, HttpFetcher};
pub use frontier::{Frontier, FrontierEntry, SeenSet};
