use std::sync::{Arc, Mutex};

use trend_pulse::{parser::TrendingHtmlDocument, source::PageFetcher};

#[derive(Clone)]
pub struct MockPageFetcher {
    pub html: String,
    pub calls: Arc<Mutex<Vec<String>>>,
    pub fail_with: Option<String>,
}

impl MockPageFetcher {
    pub fn new(html: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    pub fn from_fixture() -> Self {
        Self::new(include_str!("../fixtures/trending.html"))
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            html: String::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: Some(msg.to_string()),
        }
    }
}

impl PageFetcher for MockPageFetcher {
    type Error = anyhow::Error;

    async fn fetch_page(&self, url: &str) -> anyhow::Result<TrendingHtmlDocument> {
        self.calls.lock().unwrap().push(url.to_string());
        if let Some(ref msg) = self.fail_with {
            return Err(anyhow::anyhow!("{}", msg));
        }
        Ok(TrendingHtmlDocument::new(self.html.clone()))
    }
}
