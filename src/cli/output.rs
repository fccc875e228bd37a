//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, SemcrawlArgs};
use crate::crawl::CrawlReport;
use crate::error::Result;
use crate::search::{IndexStats, ScoredResult};

/// Result structure for search operations.
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResults {
    pub query: String,
    pub noise_filter: bool,
    pub results: Vec<ScoredResult>,
    pub duration_ms: u64,
}

/// Human-readable rendering of a command result.
pub trait HumanOutput {
    fn render_human(&self) -> String;
}

impl HumanOutput for SearchResults {
    fn render_human(&self) -> String {
        let mut out = String::new();
        out.push_str("Search Results:\n");
        out.push_str("═══════════════\n");

        for (i, result) in self.results.iter().enumerate() {
            out.push('\n');
            out.push_str(&format!("Result {}: (Score: {:.2})\n", i + 1, result.score));
            out.push_str("─────────────\n");
            out.push_str(&format!("url: {}\n", result.url));
            if !result.title.is_empty() {
                out.push_str(&format!("title: {}\n", result.title));
            }
            if !result.description.is_empty() {
                out.push_str(&format!("description: {}\n", result.description));
            }
        }

        out.push('\n');
        out.push_str(&format!("Total results: {}\n", self.results.len()));
        out.push_str(&format!("Search time: {}ms", self.duration_ms));
        out
    }
}

impl HumanOutput for IndexStats {
    fn render_human(&self) -> String {
        format!(
            "Index Statistics:\n\
             ════════════════\n\
             Words: {}\n\
             Pages: {}\n\
             SVD rank: {}",
            self.words_count, self.pages_count, self.svd_rank
        )
    }
}

impl HumanOutput for CrawlReport {
    fn render_human(&self) -> String {
        format!(
            "Scraped {} urls!\n\
             Failed fetches: {}\n\
             URLs enqueued: {}",
            self.scraped, self.failed, self.enqueued
        )
    }
}

/// Output a result in the specified format.
pub fn output_result<T>(message: &str, result: &T, args: &SemcrawlArgs) -> Result<()>
where
    T: Serialize + HumanOutput,
{
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 1 {
                println!("{message}");
                println!();
            }
            println!("{}", result.render_human());
        }
        OutputFormat::Json => output_json(result, args)?,
    }
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &SemcrawlArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_results_human() {
        let results = SearchResults {
            query: "cat".to_string(),
            noise_filter: false,
            results: vec![ScoredResult {
                url: "https://a.test/".to_string(),
                title: "Cats".to_string(),
                description: String::new(),
                score: 0.5,
            }],
            duration_ms: 3,
        };

        let text = results.render_human();
        assert!(text.contains("Result 1: (Score: 0.50)"));
        assert!(text.contains("title: Cats"));
        assert!(!text.contains("description:"));
        assert!(text.ends_with("Search time: 3ms"));
    }

    #[test]
    fn test_stats_human() {
        let stats = IndexStats {
            words_count: 10,
            pages_count: 4,
            svd_rank: 2,
        };
        assert!(stats.render_human().contains("SVD rank: 2"));
    }

    #[test]
    fn test_crawl_report_json_fields() {
        let report = CrawlReport {
            scraped: 3,
            failed: 1,
            enqueued: 7,
        };
        let value = serde_json::to_value(report).unwrap();
        assert_eq!(value["scraped"], 3);
        assert_eq!(value["enqueued"], 7);
        assert!(report.render_human().starts_with("Scraped 3 urls!"));
    }
}
