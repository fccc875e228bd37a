//! The crawl worker pool.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use tokio::task::JoinSet;
use url::Url;

use crate::config::CrawlConfig;
use crate::corpus::CorpusStore;
use crate::crawl::extract::{Extractor, is_same_origin};
use crate::crawl::fetcher::{Fetcher, HttpFetcher};
use crate::crawl::frontier::{Frontier, FrontierEntry};
use crate::error::{Result, SemcrawlError};

/// Shared cap on successful fetches.
///
/// A worker reserves a slot before taking work and then either commits it
/// (the fetch succeeded) or releases it. Reservations never exceed the limit,
/// so concurrent workers cannot overshoot it.
#[derive(Debug)]
pub struct ScrapeBudget {
    limit: usize,
    claimed: AtomicUsize,
    scraped: AtomicUsize,
}

impl ScrapeBudget {
    pub fn new(limit: usize) -> Self {
        ScrapeBudget {
            limit,
            claimed: AtomicUsize::new(0),
            scraped: AtomicUsize::new(0),
        }
    }

    /// Claim a slot; `false` when every slot is committed or in flight.
    pub fn try_reserve(&self) -> bool {
        self.claimed
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |claimed| {
                (claimed < self.limit).then_some(claimed + 1)
            })
            .is_ok()
    }

    /// Give back a slot whose fetch did not happen or failed.
    pub fn release(&self) {
        self.claimed.fetch_sub(1, Ordering::AcqRel);
    }

    /// Turn a reserved slot into a counted scrape.
    pub fn commit(&self) {
        self.scraped.fetch_add(1, Ordering::AcqRel);
    }

    /// Number of committed scrapes.
    pub fn scraped(&self) -> usize {
        self.scraped.load(Ordering::Acquire)
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn is_exhausted(&self) -> bool {
        self.scraped() >= self.limit
    }
}

/// Summary of a finished crawl.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CrawlReport {
    /// Pages fetched successfully and persisted.
    pub scraped: usize,
    /// Fetches abandoned after a connection error or timeout.
    pub failed: usize,
    /// Distinct URLs admitted to the frontier, seeds included.
    pub enqueued: usize,
}

struct CrawlState {
    config: CrawlConfig,
    frontier: Frontier,
    budget: ScrapeBudget,
    failed: AtomicUsize,
    fetcher: Arc<dyn Fetcher>,
    extractor: Extractor,
    store: CorpusStore,
}

/// Breadth-first, same-origin crawler writing page records to a store.
pub struct Crawler {
    state: Arc<CrawlState>,
}

impl Crawler {
    /// Create a crawler that fetches over HTTP.
    pub fn new(config: CrawlConfig, store: CorpusStore) -> Result<Self> {
        let fetcher = HttpFetcher::new(&config)?;
        Self::with_fetcher(config, store, Arc::new(fetcher))
    }

    /// Create a crawler with a custom page source.
    pub fn with_fetcher(
        config: CrawlConfig,
        store: CorpusStore,
        fetcher: Arc<dyn Fetcher>,
    ) -> Result<Self> {
        config.validate()?;

        let state = CrawlState {
            frontier: Frontier::new(),
            budget: ScrapeBudget::new(config.scraped_urls_limit),
            failed: AtomicUsize::new(0),
            fetcher,
            extractor: Extractor::new()?,
            store,
            config,
        };

        Ok(Crawler {
            state: Arc::new(state),
        })
    }

    /// The frontier shared by the workers.
    pub fn frontier(&self) -> &Frontier {
        &self.state.frontier
    }

    /// Seed the frontier and run the workers until the budget is spent or
    /// the frontier stays empty for a full dequeue timeout.
    pub async fn run(&self) -> Result<CrawlReport> {
        let state = &self.state;

        // Seeds take the same serialized form as joined links.
        for seed in &state.config.seed_urls {
            let seed = Url::parse(seed)?;
            state.frontier.enqueue(seed.as_str(), 0);
        }

        info!(
            "Crawling from {} seed(s) with {} workers (max depth {}, limit {})",
            state.config.seed_urls.len(),
            state.config.workers,
            state.config.max_depth,
            state.config.scraped_urls_limit
        );

        let mut workers = JoinSet::new();
        for id in 0..state.config.workers {
            workers.spawn(run_worker(id, Arc::clone(state)));
        }

        while let Some(joined) = workers.join_next().await {
            joined.map_err(|e| SemcrawlError::crawl(format!("Crawl worker failed: {e}")))?;
        }

        let report = CrawlReport {
            scraped: state.budget.scraped(),
            failed: state.failed.load(Ordering::Acquire),
            enqueued: state.frontier.seen_count(),
        };

        info!(
            "Scraped {} urls ({} failed, {} enqueued)",
            report.scraped, report.failed, report.enqueued
        );

        Ok(report)
    }
}

async fn run_worker(id: usize, state: Arc<CrawlState>) {
    loop {
        if !state.budget.try_reserve() {
            debug!("worker {id}: scrape budget spent");
            break;
        }

        let Some(entry) = state.frontier.dequeue(state.config.dequeue_timeout).await else {
            state.budget.release();
            debug!("worker {id}: frontier idle");
            break;
        };

        match state.fetcher.fetch(&entry.url).await {
            Ok(html) => {
                state.budget.commit();
                if let Err(e) = process_page(&state, &entry, &html).await {
                    warn!("worker {id}: failed to process {}: {e}", entry.url);
                }
            }
            Err(e) => {
                state.budget.release();
                state.failed.fetch_add(1, Ordering::AcqRel);
                warn!("worker {id}: skipping {}: {e}", entry.url);
            }
        }
    }
}

/// Persist the page and enqueue its same-origin links.
async fn process_page(state: &CrawlState, entry: &FrontierEntry, html: &str) -> Result<()> {
    let page_url = Url::parse(&entry.url)?;
    let page = state.extractor.extract(&page_url, html)?;
    let links = page.links.clone();

    let path = state.store.persist(&page.into_record(entry.url.as_str())).await?;
    debug!("Saved {} (depth {}) to {}", entry.url, entry.depth, path.display());

    if entry.depth >= state.config.max_depth {
        return Ok(());
    }

    for link in links {
        if is_same_origin(&page_url, &link) {
            state.frontier.enqueue(link.as_str(), entry.depth + 1);
        }
    }

    Ok(())
}
