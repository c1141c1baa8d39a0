//! RSS 1.0 (RDF), RSS 2.0, and Atom parsing via `feed-rs`.

use feed_rs::model::{Entry, Link};
use feed_rs::parser::Builder;
use feedwright_core::FeedItem;

use crate::error::ScraperError;

/// Channel metadata plus the entries mapped to [`FeedItem`]s, in feed order.
#[derive(Debug, Clone, Default)]
pub struct ParsedFeed {
    pub title: Option<String>,
    pub link: Option<String>,
    pub items: Vec<FeedItem>,
}

/// Whether a response body is markup at all. Some origins answer feed URLs
/// with an HTML challenge or plain text instead of XML.
#[must_use]
pub fn looks_like_xml(body: &str) -> bool {
    body.trim_start().starts_with('<')
}

/// Parses a feed document fetched from `url`.
///
/// Entries without an explicit guid get their first link as guid. Content
/// (`content:encoded`, Atom `content`) is preferred over the summary.
///
/// # Errors
///
/// Returns [`ScraperError::Feed`] when the document is not a recognizable feed.
pub fn parse_feed(xml: &str, url: &str) -> Result<ParsedFeed, ScraperError> {
    let parser = Builder::new()
        .id_generator(|links: &[Link], _title, _uri| {
            links.first().map(|l| l.href.clone()).unwrap_or_default()
        })
        .build();

    let feed = parser
        .parse(xml.as_bytes())
        .map_err(|e| ScraperError::Feed {
            url: url.to_owned(),
            reason: e.to_string(),
        })?;

    Ok(ParsedFeed {
        title: feed
            .title
            .map(|t| t.content.trim().to_owned())
            .filter(|t| !t.is_empty()),
        link: preferred_link(&feed.links),
        items: feed.entries.into_iter().map(entry_to_item).collect(),
    })
}

fn entry_to_item(entry: Entry) -> FeedItem {
    let link = preferred_link(&entry.links).unwrap_or_default();
    let description = entry
        .content
        .and_then(|c| c.body)
        .or_else(|| entry.summary.map(|s| s.content))
        .filter(|d| !d.trim().is_empty());
    let authors: Vec<String> = entry
        .authors
        .into_iter()
        .map(|p| p.name.trim().to_owned())
        .filter(|n| !n.is_empty())
        .collect();

    FeedItem {
        title: entry
            .title
            .map(|t| t.content.trim().to_owned())
            .unwrap_or_default(),
        guid: Some(entry.id).filter(|id| !id.is_empty()),
        description,
        pub_date: entry.published.or(entry.updated),
        author: (!authors.is_empty()).then(|| authors.join(", ")),
        category: entry
            .categories
            .into_iter()
            .map(|c| c.term.trim().to_owned())
            .filter(|t| !t.is_empty())
            .collect(),
        link,
    }
}

/// The `alternate` link if one is marked, else the first link.
fn preferred_link(links: &[Link]) -> Option<String> {
    links
        .iter()
        .find(|l| l.rel.as_deref() == Some("alternate"))
        .or_else(|| links.first())
        .map(|l| l.href.trim().to_owned())
        .filter(|href| !href.is_empty())
}
