use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use semcrawl::config::{CrawlConfig, IndexConfig};
use semcrawl::corpus::CorpusStore;
use semcrawl::crawl::{Crawler, Fetcher};
use semcrawl::error::{FetchError, Result};
use semcrawl::search::{SearchEngine, SearchIndex};

/// In-memory site: URL → HTML. Unknown URLs fail like a refused connection.
struct SiteFetcher {
    pages: HashMap<String, String>,
    fetches: Mutex<HashMap<String, usize>>,
    latency: Duration,
}

impl SiteFetcher {
    fn new(pages: Vec<(&str, String)>) -> Self {
        SiteFetcher {
            pages: pages
                .into_iter()
                .map(|(url, html)| (url.to_string(), html))
                .collect(),
            fetches: Mutex::new(HashMap::new()),
            latency: Duration::ZERO,
        }
    }

    fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    fn fetch_count(&self, url: &str) -> usize {
        self.fetches.lock().get(url).copied().unwrap_or(0)
    }

    fn fetched_urls(&self) -> Vec<String> {
        let mut urls: Vec<String> = self.fetches.lock().keys().cloned().collect();
        urls.sort();
        urls
    }
}

#[async_trait]
impl Fetcher for SiteFetcher {
    async fn fetch(&self, url: &str) -> std::result::Result<String, FetchError> {
        *self.fetches.lock().entry(url.to_string()).or_insert(0) += 1;
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::Connection(format!("no route to {url}")))
    }
}

fn html(title: &str, body: &str, links: &[&str]) -> String {
    let anchors: String = links
        .iter()
        .map(|href| format!(r#"<a href="{href}">link</a>"#))
        .collect();
    format!("<html><head><title>{title}</title></head><body><p>{body}</p>{anchors}</body></html>")
}

fn crawl_config(seeds: &[&str], max_depth: u32, limit: usize) -> CrawlConfig {
    CrawlConfig {
        seed_urls: seeds.iter().map(|s| s.to_string()).collect(),
        max_depth,
        scraped_urls_limit: limit,
        dequeue_timeout: Duration::from_millis(100),
        ..CrawlConfig::default()
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn crawl_fetches_each_url_once_across_cycles() -> Result<()> {
    let site = Arc::new(SiteFetcher::new(vec![
        (
            "https://site.test/",
            html("Home", "cats", &["/a", "/b", "https://site.test/a"]),
        ),
        ("https://site.test/a", html("A", "dogs", &["/", "/b"])),
        ("https://site.test/b", html("B", "birds", &["/a", "/"])),
    ]));

    let dir = tempfile::tempdir()?;
    let crawler = Crawler::with_fetcher(
        crawl_config(&["https://site.test/"], 10, 100),
        CorpusStore::new(dir.path())?,
        site.clone(),
    )?;
    let report = crawler.run().await?;

    assert_eq!(report.scraped, 3);
    assert_eq!(report.failed, 0);
    assert_eq!(report.enqueued, 3);
    for url in ["https://site.test/", "https://site.test/a", "https://site.test/b"] {
        assert_eq!(site.fetch_count(url), 1, "{url} fetched more than once");
    }
    Ok(())
}

#[tokio::test]
async fn seed_without_trailing_slash_is_fetched_once() -> Result<()> {
    let site = Arc::new(SiteFetcher::new(vec![
        ("https://site.test", html("Bare", "bare", &["/"])),
        ("https://site.test/", html("Home", "home", &["/", "/about"])),
        ("https://site.test/about", html("About", "about", &["/"])),
    ]));

    let dir = tempfile::tempdir()?;
    let store = CorpusStore::new(dir.path())?;
    let crawler = Crawler::with_fetcher(
        crawl_config(&["https://site.test"], 2, 100),
        store.clone(),
        site.clone(),
    )?;
    let report = crawler.run().await?;

    assert_eq!(
        site.fetched_urls(),
        vec!["https://site.test/", "https://site.test/about"]
    );
    assert_eq!(site.fetch_count("https://site.test/"), 1);
    assert_eq!(report.scraped, 2);
    assert_eq!(store.load_records()?.len(), 2);
    Ok(())
}

#[tokio::test]
async fn crawl_never_leaves_the_seed_origin() -> Result<()> {
    let site = Arc::new(SiteFetcher::new(vec![
        (
            "https://site.test/",
            html(
                "Home",
                "home",
                &[
                    "/inside",
                    "http://site.test/insecure",
                    "https://other.test/",
                    "https://site.test:8443/port",
                    "mailto:owner@site.test",
                ],
            ),
        ),
        ("https://site.test/inside", html("Inside", "inside", &[])),
        ("http://site.test/insecure", html("Insecure", "insecure", &[])),
        ("https://other.test/", html("Other", "other", &[])),
    ]));

    let dir = tempfile::tempdir()?;
    let store = CorpusStore::new(dir.path())?;
    let crawler = Crawler::with_fetcher(
        crawl_config(&["https://site.test/"], 3, 100),
        store.clone(),
        site.clone(),
    )?;
    let report = crawler.run().await?;

    assert_eq!(
        site.fetched_urls(),
        vec!["https://site.test/", "https://site.test/inside"]
    );
    assert_eq!(report.scraped, 2);
    assert!(!crawler.frontier().has_seen("https://other.test/"));
    assert_eq!(store.load_records()?.len(), 2);
    Ok(())
}

#[tokio::test]
async fn crawl_stops_following_links_at_max_depth() -> Result<()> {
    let site = Arc::new(SiteFetcher::new(vec![
        ("https://site.test/", html("Root", "root", &["/one"])),
        ("https://site.test/one", html("One", "one", &["/two"])),
        ("https://site.test/two", html("Two", "two", &["/three"])),
        ("https://site.test/three", html("Three", "three", &[])),
    ]));

    let dir = tempfile::tempdir()?;
    let crawler = Crawler::with_fetcher(
        crawl_config(&["https://site.test/"], 1, 100),
        CorpusStore::new(dir.path())?,
        site.clone(),
    )?;
    let report = crawler.run().await?;

    assert_eq!(report.scraped, 2);
    assert_eq!(site.fetch_count("https://site.test/one"), 1);
    assert_eq!(site.fetch_count("https://site.test/two"), 0);
    assert!(!crawler.frontier().has_seen("https://site.test/two"));
    Ok(())
}

#[tokio::test]
async fn crawl_with_zero_depth_fetches_only_seeds() -> Result<()> {
    let site = Arc::new(SiteFetcher::new(vec![
        ("https://site.test/", html("Root", "root", &["/one"])),
        ("https://site.test/one", html("One", "one", &[])),
    ]));

    let dir = tempfile::tempdir()?;
    let crawler = Crawler::with_fetcher(
        crawl_config(&["https://site.test/"], 0, 100),
        CorpusStore::new(dir.path())?,
        site.clone(),
    )?;

    assert_eq!(crawler.run().await?.scraped, 1);
    assert_eq!(site.fetched_urls(), vec!["https://site.test/"]);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn crawl_never_exceeds_the_scrape_limit() -> Result<()> {
    let children: Vec<String> = (0..40).map(|i| format!("/page/{i}")).collect();
    let child_refs: Vec<&str> = children.iter().map(String::as_str).collect();

    let child_urls: Vec<String> = (0..40).map(|i| format!("https://site.test/page/{i}")).collect();
    let mut pages = vec![("https://site.test/", html("Root", "root", &child_refs))];
    for url in &child_urls {
        pages.push((url.as_str(), html("Child", "child", &[])));
    }
    let site = Arc::new(SiteFetcher::new(pages).with_latency(Duration::from_millis(5)));

    let dir = tempfile::tempdir()?;
    let store = CorpusStore::new(dir.path())?;
    let crawler = Crawler::with_fetcher(
        crawl_config(&["https://site.test/"], 1, 5),
        store.clone(),
        site.clone(),
    )?;
    let report = crawler.run().await?;

    assert_eq!(report.scraped, 5);
    assert_eq!(store.load_records()?.len(), 5);
    assert_eq!(site.fetched_urls().len(), 5);
    Ok(())
}

#[tokio::test]
async fn crawl_skips_failed_fetches_and_continues() -> Result<()> {
    let site = Arc::new(SiteFetcher::new(vec![
        (
            "https://site.test/",
            html("Root", "root", &["/missing", "/present"]),
        ),
        ("https://site.test/present", html("Present", "present", &[])),
    ]));

    let dir = tempfile::tempdir()?;
    let crawler = Crawler::with_fetcher(
        crawl_config(&["https://site.test/"], 1, 100),
        CorpusStore::new(dir.path())?,
        site.clone(),
    )?;
    let report = crawler.run().await?;

    assert_eq!(report.scraped, 2);
    assert_eq!(report.failed, 1);
    assert_eq!(report.enqueued, 3);
    assert_eq!(site.fetch_count("https://site.test/missing"), 1);
    Ok(())
}

#[tokio::test]
async fn crawled_pages_are_searchable() -> Result<()> {
    let site = Arc::new(SiteFetcher::new(vec![
        (
            "https://site.test/",
            html("Pets", "cats and dogs living together", &["/cats", "/birds"]),
        ),
        (
            "https://site.test/cats",
            html("Cats", "cats purr; cats sleep; cats hunt mice", &[]),
        ),
        (
            "https://site.test/birds",
            html("Birds", "birds sing and birds fly south", &[]),
        ),
    ]));

    let dir = tempfile::tempdir()?;
    let crawler = Crawler::with_fetcher(
        crawl_config(&["https://site.test/"], 1, 100),
        CorpusStore::new(dir.path())?,
        site,
    )?;
    crawler.run().await?;

    let config = IndexConfig {
        svd_rank: 2,
        use_idf: true,
    };
    let engine = SearchEngine::new(Arc::new(SearchIndex::open(dir.path(), &config)?));
    let results = engine.search("cats", 3, false)?;

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].url, "https://site.test/cats");
    assert_eq!(results[0].title, "Cats");
    Ok(())
}
