//! Normalized feed records shared by every route.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One normalized entry produced by a route.
///
/// `link` is always absolute and doubles as the detail-cache key. Items are
/// rebuilt from live upstream data on every run; nothing here is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedItem {
    pub title: String,
    pub link: String,
    /// Stable identifier. `None` means "use `link`".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guid: Option<String>,
    /// HTML or plain text. Starts as the listing summary and may be replaced
    /// by full content from the detail page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pub_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub category: Vec<String>,
}

impl FeedItem {
    /// Builds an item with only the two required fields set.
    #[must_use]
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            ..Self::default()
        }
    }

    /// Whether the item may be emitted: both `title` and `link` are non-blank.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.title.trim().is_empty() && !self.link.trim().is_empty()
    }

    /// The effective guid: the source-provided one, else the link.
    #[must_use]
    pub fn guid_or_link(&self) -> &str {
        self.guid
            .as_deref()
            .filter(|g| !g.is_empty())
            .unwrap_or(&self.link)
    }
}

/// The record a route hands back to its caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feed {
    pub title: String,
    pub link: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "item")]
    pub items: Vec<FeedItem>,
}

/// What a route does when fetching or extracting a detail page fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnrichmentFailures {
    /// Keep the listing summary item and carry on.
    Fallback,
    /// Fail the whole request.
    Abort,
}

impl std::fmt::Display for EnrichmentFailures {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnrichmentFailures::Fallback => write!(f, "fallback"),
            EnrichmentFailures::Abort => write!(f, "abort"),
        }
    }
}
