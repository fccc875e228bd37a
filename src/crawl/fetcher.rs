//! Fetching page bodies over HTTP.

use std::result::Result as StdResult;

use async_trait::async_trait;
use log::debug;

use crate::config::CrawlConfig;
use crate::error::{FetchError, Result};

/// Source of page bodies for the crawler.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch `url` and return its body as text.
    async fn fetch(&self, url: &str) -> StdResult<String, FetchError>;
}

/// [`Fetcher`] backed by a shared `reqwest` client.
///
/// Response status codes are not inspected: any readable body is a page.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Build a client with the request timeout and user agent of `config`.
    pub fn new(config: &CrawlConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.request_timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;

        Ok(HttpFetcher { client })
    }

    fn classify(error: reqwest::Error) -> FetchError {
        if error.is_timeout() {
            FetchError::Timeout
        } else {
            FetchError::Connection(error.to_string())
        }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> StdResult<String, FetchError> {
        let response = self.client.get(url).send().await.map_err(Self::classify)?;
        debug!("{url} answered {}", response.status());

        let body = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout
            } else {
                FetchError::Body(e.to_string())
            }
        })?;

        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}
