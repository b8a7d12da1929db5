use std::path::PathBuf;

use crate::{error::Error, parser::TrendingHtmlDocument, source::PageFetcher};

/// Serves a previously saved copy of the trending page from disk.
///
/// The requested url is ignored; it is only used downstream to resolve
/// relative video links.
#[derive(Debug, Clone)]
pub struct LocalPage {
    path: PathBuf,
}

impl LocalPage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PageFetcher for LocalPage {
    type Error = Error;

    #[tracing::instrument(skip(self), fields(path = %self.path.display()))]
    async fn fetch_page(&self, _url: &str) -> Result<TrendingHtmlDocument, Self::Error> {
        let html = tokio::fs::read_to_string(&self.path)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to read saved page"))?;

        Ok(html.into())
    }
}
