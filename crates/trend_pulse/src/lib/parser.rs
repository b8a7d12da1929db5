//! # Trending Parser
//!
//! This module turns the raw markup of the trending aggregator page into
//! [`VideoRecord`]s. Only the "all categories" ranking is read:
//!
//! ```html
//! <section>
//!   <h2 id="all-categories" data-group="all">All categories</h2>
//!   <ol data-group="all">
//!     <li>
//!       <span class="rank">1</span>
//!       <a href="/watch?v=..."><img src="..."></a>
//!       <h3 class="title">...</h3>
//!       <p class="info">
//!         <span class="text-medium-emphasis">1.2M views</span>
//!         <span class="text-medium-emphasis">Channel name</span>
//!       </p>
//!     </li>
//!   </ol>
//! </section>
//! ```
//!
//! Missing landmarks (header, section, list) fail the whole extraction.
//! A broken entry only costs that entry.

use std::{ops::Deref, sync::LazyLock};

use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::{error::Error, types::VideoRecord};

/// Upper bound on the number of entries read from the ranking.
pub const MAX_VIDEOS: usize = 20;

pub const TITLE_PLACEHOLDER: &str = "No title";

const SECTION_HEADER_ID: &str = "all-categories";
const GROUP_ATTR: &str = "data-group";

static SECTION_HEADER_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(&format!("#{SECTION_HEADER_ID}")).unwrap());
static VIDEO_LIST_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(&format!("ol[{GROUP_ATTR}]")).unwrap());
static RANK_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse(".rank").unwrap());
static LINK_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a[href]").unwrap());
static THUMBNAIL_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("img").unwrap());
static TITLE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse(".title").unwrap());
static INFO_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("p.info").unwrap());
static MEDIUM_EMPHASIS_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span.text-medium-emphasis").unwrap());

pub struct TrendingHtmlDocument(String);

impl Deref for TrendingHtmlDocument {
    type Target = String;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl TrendingHtmlDocument {
    pub fn new(doc: String) -> Self {
        TrendingHtmlDocument(doc)
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl From<String> for TrendingHtmlDocument {
    fn from(value: String) -> Self {
        TrendingHtmlDocument(value)
    }
}

/// Builds the navigable document tree. html5ever recovers from any
/// malformed input, so this never fails.
pub fn parse_html(raw: &str) -> Html {
    Html::parse_document(raw)
}

/// Extracts up to `max_videos` ranked videos from the "all categories" list.
///
/// # Parameters
/// * `html`: The parsed trending page.
/// * `base_url`: The page URL, used to resolve relative video links.
/// * `max_videos`: Number of list entries to consider, in document order.
///
/// # Returns
/// * `Ok(Vec<VideoRecord>)` with 0..=`max_videos` records. Entries without a
///   link, or whose fields could not be extracted, are left out.
/// * `Err(Error::ParseError)` if the header, its section or the video list
///   cannot be found.
#[tracing::instrument(skip(html))]
pub fn parse_trending_videos(
    html: &Html,
    base_url: &Url,
    max_videos: usize,
) -> Result<Vec<VideoRecord>, Error> {
    let header = html
        .select(&SECTION_HEADER_SELECTOR)
        .next()
        .ok_or(Error::ParseError(
            "Failed to find the 'all categories' section header, structure might have changed",
        ))?;

    let group = header.value().attr(GROUP_ATTR).ok_or(Error::ParseError(
        "Section header carries no group identifier",
    ))?;

    let section = header
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "section")
        .ok_or(Error::ParseError(
            "Failed to find the section enclosing the 'all categories' header",
        ))?;

    let list = section
        .select(&VIDEO_LIST_SELECTOR)
        .find(|el| el.value().attr(GROUP_ATTR) == Some(group))
        .ok_or(Error::ParseError(
            "Failed to find the 'all categories' video list",
        ))?;

    let mut videos = Vec::new();

    let entries = list
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "li")
        .take(max_videos);

    for (idx, entry) in entries.enumerate() {
        let fallback_rank = videos.len() as u32 + 1;
        match parse_entry(entry, base_url, fallback_rank) {
            Ok(Some(video)) => videos.push(video),
            Ok(None) => {
                tracing::debug!(entry = idx, "Skipping entry without a video link");
            }
            Err(e) => {
                tracing::warn!(entry = idx, error = %e, "Failed to extract entry, skipping");
            }
        }
    }

    Ok(videos)
}

/// Reads a single `<li>` entry.
///
/// Returns `Ok(None)` when the entry has no usable link.
fn parse_entry(
    entry: ElementRef<'_>,
    base_url: &Url,
    fallback_rank: u32,
) -> Result<Option<VideoRecord>, Error> {
    let Some(href) = entry
        .select(&LINK_SELECTOR)
        .next()
        .and_then(|a| a.value().attr("href"))
        .map(str::trim)
        .filter(|href| !href.is_empty())
    else {
        return Ok(None);
    };

    let video_url = base_url
        .join(href)
        .map_err(|e| Error::Item(format!("unresolvable video link {href:?}: {e}")))?;

    // only web links point at a video
    if !matches!(video_url.scheme(), "http" | "https") {
        return Ok(None);
    }

    let rank = entry
        .select(&RANK_SELECTOR)
        .next()
        .and_then(|el| parse_rank(&collapsed_text(el)))
        .unwrap_or(fallback_rank);

    let thumbnail_url = entry
        .select(&THUMBNAIL_SELECTOR)
        .next()
        .and_then(|img| {
            img.value()
                .attr("src")
                .filter(|src| !src.trim().is_empty())
                .or_else(|| img.value().attr("data-src"))
        })
        .map(|src| src.trim().to_string())
        .unwrap_or_default();

    let title = entry
        .select(&TITLE_SELECTOR)
        .next()
        .map(collapsed_text)
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| TITLE_PLACEHOLDER.to_string());

    let channel = entry
        .select(&INFO_SELECTOR)
        .next()
        .and_then(|info| info.select(&MEDIUM_EMPHASIS_SELECTOR).nth(1))
        .map(collapsed_text)
        .unwrap_or_default();

    Ok(Some(VideoRecord {
        title,
        channel,
        thumbnail_url,
        video_url: video_url.into(),
        rank,
    }))
}

/// Parses rank labels such as `"3"`, `"#3"` or `"3."`.
fn parse_rank(label: &str) -> Option<u32> {
    label
        .trim()
        .trim_start_matches('#')
        .trim_end_matches('.')
        .parse::<u32>()
        .ok()
        .filter(|rank| *rank > 0)
}

fn collapsed_text(el: ElementRef<'_>) -> String {
    el.text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
