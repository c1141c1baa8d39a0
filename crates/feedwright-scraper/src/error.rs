use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("rate limited by {domain} (retry after {retry_after_secs}s)")]
    RateLimited {
        domain: String,
        retry_after_secs: u64,
    },

    #[error("endpoint not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("invalid selector \"{selector}\": {reason}")]
    Selector { selector: String, reason: String },

    #[error("invalid pattern \"{pattern}\": {reason}")]
    Pattern { pattern: String, reason: String },

    #[error("{what} not found in {url}")]
    PayloadNotFound { what: String, url: String },

    #[error("invalid literal at byte {offset}: {reason}")]
    Literal { offset: usize, reason: String },

    #[error("feed from {url} could not be parsed: {reason}")]
    Feed { url: String, reason: String },

    #[error("readability extraction failed: {0}")]
    Readability(String),

    #[error("route {route} produced no items")]
    EmptyFeed { route: String },

    #[error("unknown route: {0}")]
    UnknownRoute(String),
}
