pub mod builder;

use chrono::Utc;
use url::Url;

use crate::{
    error::Error,
    parser::{parse_html, parse_trending_videos},
    source::PageFetcher,
    types::{VideoRecord, WorkflowState},
};

/// Runs the two-stage trending pipeline: fetch the page, then extract the
/// ranked videos from it.
///
/// Failures never escape [`TrendingProcessor::run`]; they end up in
/// [`WorkflowState::error`].
#[derive(Debug)]
pub struct TrendingProcessor<F>
where
    F: PageFetcher + Send + Sync + 'static,
{
    pub(crate) url: String,
    pub(crate) fetcher: F,
    pub(crate) max_videos: usize,
}

impl<F> TrendingProcessor<F>
where
    F: PageFetcher + Send + Sync + 'static,
{
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn max_videos(&self) -> usize {
        self.max_videos
    }

    /// Retrieves the raw page markup into `state`.
    #[tracing::instrument(skip_all, fields(url = %state.url()))]
    async fn fetch(&self, state: &mut WorkflowState) {
        state.set_timestamp(Utc::now());

        match self.fetcher.fetch_page(state.url()).await {
            Ok(doc) => {
                tracing::info!(bytes = doc.len(), "Fetched trending page");
                state.set_raw_content(doc.into_inner());
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch trending page");
                state.fail(e);
            }
        }
    }

    /// Extracts the ranked videos out of the fetched markup.
    #[tracing::instrument(skip_all)]
    fn extract(&self, state: &mut WorkflowState) {
        if state.is_failed() {
            tracing::info!("Skipping extraction, an earlier stage failed");
            state.set_videos(Vec::new());
            return;
        }

        match self.extract_videos(state) {
            Ok(videos) => {
                tracing::info!(count = videos.len(), "Extracted trending videos");
                state.set_videos(videos);
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to extract trending videos");
                state.set_videos(Vec::new());
                state.fail(e);
            }
        }
    }

    fn extract_videos(&self, state: &WorkflowState) -> Result<Vec<VideoRecord>, Error> {
        let raw_content = state
            .raw_content()
            .ok_or(Error::ParseError("No page content to extract videos from"))?;
        let base_url = Url::parse(state.url())?;

        parse_trending_videos(&parse_html(raw_content), &base_url, self.max_videos)
    }

    #[tracing::instrument(skip(self), fields(url = %self.url))]
    pub async fn run(&self) -> WorkflowState {
        let mut state = WorkflowState::new(&self.url);

        self.fetch(&mut state).await;
        self.extract(&mut state);

        if let Some(error) = state.error() {
            tracing::warn!(%error, "Trending run finished with an error");
        } else if state.videos().is_empty() {
            tracing::info!("No trending videos found at this time");
        }

        state
    }
}
