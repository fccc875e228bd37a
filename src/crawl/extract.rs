//! Turning fetched HTML into page records and outbound links.

use std::collections::BTreeMap;

use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::analysis::analyzer::PageAnalyzer;
use crate::analysis::normalize_text;
use crate::corpus::PageRecord;
use crate::error::{Result, SemcrawlError};

/// Everything the crawler needs from one page.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedPage {
    pub title: String,
    pub description: String,
    pub words: BTreeMap<String, u32>,
    /// Absolute URLs of every `a[href]`, in document order.
    pub links: Vec<Url>,
}

impl ExtractedPage {
    /// Drop the links and attach the page URL.
    pub fn into_record<S: Into<String>>(self, url: S) -> PageRecord {
        PageRecord::new(url, self.title, self.description, self.words)
    }
}

/// Where a title or description candidate takes its text from.
#[derive(Debug, Clone)]
enum Candidate {
    /// Text content of the first matching element.
    Text(Selector),
    /// `content` attribute of the first matching element.
    Content(Selector),
}

impl Candidate {
    fn text(css: &str) -> Result<Self> {
        Ok(Candidate::Text(parse_selector(css)?))
    }

    fn content(css: &str) -> Result<Self> {
        Ok(Candidate::Content(parse_selector(css)?))
    }

    /// `None` when no element matches; an element without content yields `""`.
    fn resolve(&self, document: &Html) -> Option<String> {
        match self {
            Candidate::Text(selector) => document
                .select(selector)
                .next()
                .map(|element| element.text().collect::<String>()),
            Candidate::Content(selector) => document
                .select(selector)
                .next()
                .map(|element| element.value().attr("content").unwrap_or_default().to_string()),
        }
    }
}

/// Value of the first candidate present in `document`, whitespace-normalized.
///
/// A present candidate wins even when its text is empty. With no candidate
/// present the result is the empty string.
fn first_present(document: &Html, candidates: &[Candidate]) -> String {
    candidates
        .iter()
        .find_map(|candidate| candidate.resolve(document))
        .map(|text| normalize_text(&text))
        .unwrap_or_default()
}

fn parse_selector(css: &str) -> Result<Selector> {
    Selector::parse(css)
        .map_err(|e| SemcrawlError::analysis(format!("Invalid CSS selector {css}: {e}")))
}

/// HTML to [`ExtractedPage`] converter.
#[derive(Debug)]
pub struct Extractor {
    analyzer: PageAnalyzer,
    title: Vec<Candidate>,
    description: Vec<Candidate>,
    links: Selector,
}

impl Extractor {
    pub fn new() -> Result<Self> {
        Self::with_analyzer(PageAnalyzer::new()?)
    }

    /// Use a custom analyzer for the word counts.
    pub fn with_analyzer(analyzer: PageAnalyzer) -> Result<Self> {
        Ok(Extractor {
            analyzer,
            title: vec![
                Candidate::text("title")?,
                Candidate::content(r#"meta[property="og:title"]"#)?,
                Candidate::content(r#"meta[name="twitter:title"]"#)?,
            ],
            description: vec![
                Candidate::content(r#"meta[name="description"]"#)?,
                Candidate::content(r#"meta[property="og:description"]"#)?,
                Candidate::content(r#"meta[name="twitter:description"]"#)?,
            ],
            links: parse_selector("a[href]")?,
        })
    }

    /// Extract title, description, word counts and links from `html`.
    ///
    /// Relative links are resolved against `page_url`; hrefs that do not
    /// resolve are dropped.
    pub fn extract(&self, page_url: &Url, html: &str) -> Result<ExtractedPage> {
        let document = Html::parse_document(html);

        let title = first_present(&document, &self.title);
        let description = first_present(&document, &self.description);

        let text = document.root_element().text().collect::<Vec<_>>().join(" ");
        let words = self.analyzer.word_counts(&normalize_text(&text))?;

        let links = document
            .select(&self.links)
            .filter_map(|anchor: ElementRef<'_>| anchor.value().attr("href"))
            .filter_map(|href| page_url.join(href.trim()).ok())
            .collect();

        Ok(ExtractedPage {
            title,
            description,
            words,
            links,
        })
    }
}

/// Whether `a` and `b` share scheme and network location (user, host, port).
pub fn is_same_origin(a: &Url, b: &Url) -> bool {
    a.scheme() == b.scheme()
        && a.username() == b.username()
        && a.password() == b.password()
        && a.host_str() == b.host_str()
        && a.port() == b.port()
}
