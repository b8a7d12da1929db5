use chrono::{DateTime, Utc};
use serde::Serialize;

/// A single entry of the trending ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoRecord {
    pub title: String,
    pub channel: String,
    pub thumbnail_url: String,
    pub video_url: String,
    pub rank: u32,
}

/// State threaded through the fetch and extract stages of a single run.
///
/// Fields are only ever filled in, never cleared. The first recorded error
/// wins; later stages read it as a signal to skip their work.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowState {
    url: String,
    #[serde(skip)]
    raw_content: Option<String>,
    videos: Vec<VideoRecord>,
    error: Option<String>,
    timestamp: Option<DateTime<Utc>>,
}

impl WorkflowState {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn raw_content(&self) -> Option<&str> {
        self.raw_content.as_deref()
    }

    pub fn videos(&self) -> &[VideoRecord] {
        &self.videos
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp
    }

    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }

    pub(crate) fn set_raw_content(&mut self, raw_content: String) {
        self.raw_content.get_or_insert(raw_content);
    }

    pub(crate) fn set_timestamp(&mut self, timestamp: DateTime<Utc>) {
        self.timestamp.get_or_insert(timestamp);
    }

    pub(crate) fn set_videos(&mut self, videos: Vec<VideoRecord>) {
        if self.videos.is_empty() {
            self.videos = videos;
        }
    }

    /// Records `error` unless an earlier stage already failed.
    pub(crate) fn fail(&mut self, error: impl ToString) {
        self.error.get_or_insert_with(|| error.to_string());
    }
}
