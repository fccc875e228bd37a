//! Command implementations for the semcrawl CLI.

use std::sync::Arc;
use std::time::Instant;

use log::info;

use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::EngineConfig;
use crate::corpus::CorpusStore;
use crate::crawl::Crawler;
use crate::error::Result;
use crate::search::{SearchEngine, SearchIndex};

/// Execute a CLI command.
pub fn execute_command(args: SemcrawlArgs) -> Result<()> {
    let mut config = EngineConfig::load(args.config.as_deref())?;

    match &args.command {
        Command::Crawl(crawl_args) => {
            crawl_args.apply(&mut config);
            run_crawl(config, &args)
        }
        Command::Search(search_args) => {
            search_args.index.apply(&mut config);
            run_search(search_args, config, &args)
        }
        Command::Stats(stats_args) => {
            stats_args.index.apply(&mut config);
            show_stats(config, &args)
        }
    }
}

/// Crawl from the configured seeds into the data directory.
fn run_crawl(config: EngineConfig, cli_args: &SemcrawlArgs) -> Result<()> {
    let store = CorpusStore::new(&config.data_dir)?;
    let crawler = Crawler::new(config.crawl, store)?;

    let runtime = tokio::runtime::Runtime::new()?;
    let report = runtime.block_on(crawler.run())?;

    output_result("Crawl finished", &report, cli_args)
}

/// Build the index once and run a single query.
fn run_search(args: &SearchArgs, config: EngineConfig, cli_args: &SemcrawlArgs) -> Result<()> {
    let index = build_index(&config)?;
    let engine = SearchEngine::new(Arc::new(index));

    let start_time = Instant::now();
    let results = engine.search(&args.query, args.results, args.noise_filter)?;
    let duration_ms = start_time.elapsed().as_millis() as u64;

    output_result(
        "Search completed",
        &SearchResults {
            query: args.query.clone(),
            noise_filter: args.noise_filter,
            results,
            duration_ms,
        },
        cli_args,
    )
}

/// Build the index and report its size.
fn show_stats(config: EngineConfig, cli_args: &SemcrawlArgs) -> Result<()> {
    let index = build_index(&config)?;
    output_result("Index statistics", &index.stats(), cli_args)
}

fn build_index(config: &EngineConfig) -> Result<SearchIndex> {
    config.index.validate()?;

    let start_time = Instant::now();
    let index = SearchIndex::open(&config.data_dir, &config.index)?;
    info!("Index built in {}ms", start_time.elapsed().as_millis());

    Ok(index)
}
