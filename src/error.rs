//! Error types for the semcrawl library.
//!
//! All fallible operations return [`SemcrawlError`] through the [`Result`]
//! alias. Per-URL fetch failures during a crawl are modelled separately by
//! [`FetchError`], because the crawler swallows them instead of propagating.
//!
//! # Examples
//!
//! ```
//! use semcrawl::error::{Result, SemcrawlError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(SemcrawlError::invalid_argument("Invalid input"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for semcrawl operations.
#[derive(Error, Debug)]
pub enum SemcrawlError {
    /// I/O errors (file operations, directory listing, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP client construction errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Crawl-related errors
    #[error("Crawl error: {0}")]
    Crawl(String),

    /// Corpus storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Index construction errors
    #[error("Index error: {0}")]
    Index(String),

    /// Analysis-related errors (tokenization, filtering, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Query-related errors
    #[error("Query error: {0}")]
    Query(String),

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Rejected arguments, such as an out-of-range SVD rank
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type alias for operations that may fail with SemcrawlError.
pub type Result<T> = std::result::Result<T, SemcrawlError>;

impl SemcrawlError {
    /// Create a new crawl error.
    pub fn crawl<S: Into<String>>(msg: S) -> Self {
        SemcrawlError::Crawl(msg.into())
    }

    /// Create a new storage error.
    pub fn storage<S: Into<String>>(msg: S) -> Self {
        SemcrawlError::Storage(msg.into())
    }

    /// Create a new index error.
    pub fn index<S: Into<String>>(msg: S) -> Self {
        SemcrawlError::Index(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        SemcrawlError::Analysis(msg.into())
    }

    /// Create a new query error.
    pub fn query<S: Into<String>>(msg: S) -> Self {
        SemcrawlError::Query(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        SemcrawlError::Config(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        SemcrawlError::InvalidArgument(msg.into())
    }
}

/// Why a single URL could not be fetched.
///
/// The crawler logs these and moves on; they never abort a crawl.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The request did not complete within the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// The connection could not be established or was reset.
    #[error("connection failed: {0}")]
    Connection(String),

    /// The response body could not be read as text.
    #[error("failed to read body: {0}")]
    Body(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = SemcrawlError::index("Test index error");
        assert_eq!(error.to_string(), "Index error: Test index error");

        let error = SemcrawlError::invalid_argument("rank too large");
        assert_eq!(error.to_string(), "Invalid argument: rank too large");

        let error = SemcrawlError::invalid_config("no seeds");
        assert_eq!(error.to_string(), "Invalid configuration: no seeds");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let semcrawl_error = SemcrawlError::from(io_error);

        match semcrawl_error {
            SemcrawlError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }

    #[test]
    fn test_parse_error_conversions() {
        let error = SemcrawlError::from(url::Url::parse("not a url").unwrap_err());
        assert!(matches!(error, SemcrawlError::Url(_)));

        let error = SemcrawlError::from(serde_json::from_str::<u32>("{").unwrap_err());
        assert!(matches!(error, SemcrawlError::Json(_)));
    }

    #[test]
    fn test_fetch_error_display() {
        assert_eq!(FetchError::Timeout.to_string(), "request timed out");
        assert_eq!(
            FetchError::Connection("refused".into()).to_string(),
            "connection failed: refused"
        );
    }
}
