use crate::{parser::MAX_VIDEOS, source::PageFetcher, TrendingProcessor};

pub struct TrendingProcessorBuilder<F = ()> {
    url: String,
    fetcher: F,
    max_videos: usize,
}

impl TrendingProcessorBuilder {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            fetcher: (),
            max_videos: MAX_VIDEOS,
        }
    }
}

impl<F> TrendingProcessorBuilder<F> {
    pub fn fetcher<F2: PageFetcher + Send + Sync + 'static>(
        self,
        fetcher: F2,
    ) -> TrendingProcessorBuilder<F2> {
        TrendingProcessorBuilder {
            url: self.url,
            fetcher,
            max_videos: self.max_videos,
        }
    }

    pub fn max_videos(mut self, max_videos: usize) -> Self {
        self.max_videos = max_videos;
        self
    }
}

impl<F> TrendingProcessorBuilder<F>
where
    F: PageFetcher + Send + Sync + 'static,
{
    pub fn build(self) -> TrendingProcessor<F> {
        TrendingProcessor {
            url: self.url,
            fetcher: self.fetcher,
            max_videos: self.max_videos,
        }
    }
}
