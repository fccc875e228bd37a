//! Command line argument parsing for the semcrawl CLI using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;

/// semcrawl - crawl a site, index it with LSI, and search it
#[derive(Parser, Debug, Clone)]
#[command(name = "semcrawl")]
#[command(about = "Crawl a web neighborhood and search it with latent semantic indexing")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct SemcrawlArgs {
    /// Verbosity level (repeat for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// JSON configuration file; flags override its values
    #[arg(short, long, value_name = "FILE", env = "SEMCRAWL_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl SemcrawlArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1,
                n => n + 1,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Crawl from seed URLs and store page records
    Crawl(CrawlArgs),

    /// Build the index and run a query against it
    Search(SearchArgs),

    /// Build the index and show its size
    Stats(StatsArgs),
}

/// Arguments for crawling
#[derive(Args, Debug, Clone)]
pub struct CrawlArgs {
    /// Seed URLs (added to those in the configuration file)
    #[arg(value_name = "SEED")]
    pub seeds: Vec<String>,

    /// Maximum link depth followed from a seed
    #[arg(short = 'd', long)]
    pub max_depth: Option<u32>,

    /// Stop after this many successfully fetched pages
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Number of concurrent workers
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Directory page records are written to
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,
}

impl CrawlArgs {
    /// Overlay these flags on `config`.
    pub fn apply(&self, config: &mut EngineConfig) {
        config.crawl.seed_urls.extend(self.seeds.iter().cloned());
        if let Some(max_depth) = self.max_depth {
            config.crawl.max_depth = max_depth;
        }
        if let Some(limit) = self.limit {
            config.crawl.scraped_urls_limit = limit;
        }
        if let Some(workers) = self.workers {
            config.crawl.workers = workers;
        }
        if let Some(data_dir) = &self.data_dir {
            config.data_dir = data_dir.clone();
        }
    }
}

/// Index options shared by `search` and `stats`
#[derive(Args, Debug, Clone)]
pub struct IndexArgs {
    /// Directory holding the page records
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Rank of the truncated SVD
    #[arg(short, long)]
    pub rank: Option<usize>,

    /// Disable inverse document frequency weighting
    #[arg(long)]
    pub no_idf: bool,
}

impl IndexArgs {
    /// Overlay these flags on `config`.
    pub fn apply(&self, config: &mut EngineConfig) {
        if let Some(data_dir) = &self.data_dir {
            config.data_dir = data_dir.clone();
        }
        if let Some(rank) = self.rank {
            config.index.svd_rank = rank;
        }
        if self.no_idf {
            config.index.use_idf = false;
        }
    }
}

/// Arguments for searching
#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    /// Query string
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Maximum number of results to return
    #[arg(short = 'n', long, default_value = "10", allow_negative_numbers = true)]
    pub results: i64,

    /// Score against the low-rank reconstruction instead of the weighted matrix
    #[arg(long)]
    pub noise_filter: bool,

    #[command(flatten)]
    pub index: IndexArgs,
}

/// Arguments for index statistics
#[derive(Args, Debug, Clone)]
pub struct StatsArgs {
    #[command(flatten)]
    pub index: IndexArgs,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
