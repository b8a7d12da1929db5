use std::time::Duration;

use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Request to {url} timed out after {}s", timeout.as_secs())]
    Timeout { url: String, timeout: Duration },
    #[error("Unexpected HTTP status {status} from {url}")]
    Status { url: String, status: StatusCode },
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("Parse error: {0}")]
    ParseError(&'static str),
    #[error("Invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("Item extraction failed: {0}")]
    Item(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Classifies a transport error raised while talking to `url`.
    pub(crate) fn from_request(url: &str, timeout: Duration, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Error::Timeout {
                url: url.to_string(),
                timeout,
            }
        } else {
            Error::Request {
                url: url.to_string(),
                source,
            }
        }
    }
}
