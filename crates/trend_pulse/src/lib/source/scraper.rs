use std::{ops::Deref, time::Duration};

use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE};

use crate::{error::Error, parser::TrendingHtmlDocument, source::PageFetcher};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Fetches the trending page over HTTP with a single, timed GET.
pub struct PageScraper {
    client: reqwest::Client,
    timeout: Duration,
}

impl Deref for PageScraper {
    type Target = reqwest::Client;

    fn deref(&self) -> &Self::Target {
        &self.client
    }
}

impl PageScraper {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(Error::Client)?;

        Ok(Self { client, timeout })
    }

    pub fn with_defaults() -> Result<Self, Error> {
        Self::new(DEFAULT_TIMEOUT, DEFAULT_USER_AGENT)
    }
}

impl PageFetcher for PageScraper {
    type Error = Error;

    #[tracing::instrument(skip(self))]
    async fn fetch_page(&self, url: &str) -> Result<TrendingHtmlDocument, Self::Error> {
        let response = self
            .get(url)
            .header(ACCEPT, "text/html,application/xhtml+xml")
            .header(ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .send()
            .await
            .map_err(|e| Error::from_request(url, self.timeout, e))
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(%status, "Trending page responded with a non-success status");
            return Err(Error::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::from_request(url, self.timeout, e))?;
        tracing::debug!(%status, bytes = body.len(), "Fetched trending page");

        Ok(body.into())
    }
}
