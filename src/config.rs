//! Engine configuration.
//!
//! Configuration is read from an optional JSON file and then overridden by
//! command line flags. Every field has a default, so a partial file such as
//! `{"crawl": {"seed_urls": ["https://example.com/"]}}` is valid.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Result, SemcrawlError};

/// Default number of concurrent crawl workers.
pub const DEFAULT_WORKERS: usize = 8;
/// Default maximum link depth followed from a seed.
pub const DEFAULT_MAX_DEPTH: u32 = 1;
/// Default number of successfully fetched pages after which the crawl stops.
pub const DEFAULT_SCRAPED_URLS_LIMIT: usize = 1000;
/// Default rank of the truncated SVD.
pub const DEFAULT_SVD_RANK: usize = 100;

/// Top-level configuration for crawling and indexing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Directory the crawler writes page records to and the index reads from.
    pub data_dir: PathBuf,
    /// Crawl settings.
    pub crawl: CrawlConfig,
    /// Index settings.
    pub index: IndexConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            crawl: CrawlConfig::default(),
            index: IndexConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Load a configuration from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            SemcrawlError::invalid_config(format!("cannot open {}: {e}", path.display()))
        })?;
        let config: EngineConfig = serde_json::from_reader(BufReader::new(file))?;
        Ok(config)
    }

    /// Load from `path` when given, otherwise start from defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }
}

/// Settings consumed by the crawler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrawlConfig {
    /// URLs the crawl starts from, all at depth 0.
    pub seed_urls: Vec<String>,

    /// Pages discovered at this depth do not enqueue their links.
    pub max_depth: u32,

    /// Number of successful fetches after which workers stop.
    pub scraped_urls_limit: usize,

    /// Number of concurrent workers.
    pub workers: usize,

    /// How long an idle worker waits for new work before exiting.
    #[serde(with = "duration_secs")]
    pub dequeue_timeout: Duration,

    /// Per-request timeout.
    #[serde(with = "duration_secs")]
    pub request_timeout: Duration,

    /// User agent sent with every request.
    pub user_agent: String,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            seed_urls: Vec::new(),
            max_depth: DEFAULT_MAX_DEPTH,
            scraped_urls_limit: DEFAULT_SCRAPED_URLS_LIMIT,
            workers: DEFAULT_WORKERS,
            dequeue_timeout: Duration::from_secs(3),
            request_timeout: Duration::from_secs(5),
            user_agent: format!("semcrawl/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl CrawlConfig {
    /// Check that the settings describe a runnable crawl.
    pub fn validate(&self) -> Result<()> {
        if self.seed_urls.is_empty() {
            return Err(SemcrawlError::invalid_config("at least one seed URL is required"));
        }
        if self.workers == 0 {
            return Err(SemcrawlError::invalid_config("workers must be at least 1"));
        }
        for seed in &self.seed_urls {
            let url = Url::parse(seed)
                .map_err(|e| SemcrawlError::invalid_config(format!("bad seed URL {seed}: {e}")))?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(SemcrawlError::invalid_config(format!(
                    "seed URL {seed} must use http or https"
                )));
            }
        }
        Ok(())
    }
}

/// Settings consumed by the index builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Rank of the truncated SVD; must be below both matrix dimensions.
    pub svd_rank: usize,

    /// Whether to re-weight term rows by inverse document frequency.
    pub use_idf: bool,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            svd_rank: DEFAULT_SVD_RANK,
            use_idf: true,
        }
    }
}

impl IndexConfig {
    /// Check the settings that can be validated before the corpus is loaded.
    pub fn validate(&self) -> Result<()> {
        if self.svd_rank == 0 {
            return Err(SemcrawlError::invalid_config("svd_rank must be at least 1"));
        }
        Ok(())
    }
}

mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs)
            .map_err(|e| serde::de::Error::custom(format!("invalid duration {secs}: {e}")))
    }
}
