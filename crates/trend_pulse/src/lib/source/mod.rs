pub mod local;
pub mod scraper;

use std::{fmt::Display, future::Future};

use crate::parser::TrendingHtmlDocument;

/// Retrieves the raw markup of the trending page.
pub trait PageFetcher {
    type Error: Display;

    fn fetch_page(
        &self,
        url: &str,
    ) -> impl Future<Output = Result<TrendingHtmlDocument, Self::Error>> + Send;
}
