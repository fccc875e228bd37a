//! Ranked search hits.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::corpus::PageInfo;

/// One ranked page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredResult {
    pub url: String,
    pub title: String,
    pub description: String,
    /// Normalized match score in `[0, 1]`, rounded to two decimals.
    pub score: f64,
}

impl ScoredResult {
    /// Build a result for `page`, rounding `score` to two decimals.
    pub fn new(page: &PageInfo, score: f64) -> Self {
        ScoredResult {
            url: page.url.clone(),
            title: page.title.clone(),
            description: page.description.clone(),
            score: round_score(score),
        }
    }
}

impl fmt::Display for ScoredResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}  {}", self.score, self.url)?;
        if !self.title.is_empty() {
            write!(f, "  {}", self.title)?;
        }
        Ok(())
    }
}

/// Round to two decimal places.
pub fn round_score(score: f64) -> f64 {
    (score * 100.0).round() / 100.0
}
