//! Sitemap listing for sites without a usable index page.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;

use super::dates::parse_date;

static URL_ENTRY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<url>\s*<loc>([^<]+)</loc>(?:\s*<lastmod>([^<]+)</lastmod>)?")
        .expect("valid sitemap entry regex")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapEntry {
    pub loc: String,
    pub lastmod: Option<DateTime<Utc>>,
}

/// Collects `<url>` entries strictly under `prefix`, newest `lastmod` first.
///
/// The prefix page itself is excluded. Entries without a readable `lastmod`
/// sort as if dated at the Unix epoch; ties keep document order.
#[must_use]
pub fn parse_sitemap(xml: &str, prefix: &str) -> Vec<SitemapEntry> {
    let mut entries: Vec<SitemapEntry> = URL_ENTRY_RE
        .captures_iter(xml)
        .filter_map(|cap| {
            let loc = html_escape::decode_html_entities(cap.get(1)?.as_str().trim()).into_owned();
            if !loc.starts_with(prefix) || loc == prefix {
                return None;
            }
            let lastmod = cap.get(2).and_then(|m| parse_date(m.as_str()));
            Some(SitemapEntry { loc, lastmod })
        })
        .collect();

    entries.sort_by_key(|entry| std::cmp::Reverse(entry.lastmod.unwrap_or(DateTime::UNIX_EPOCH)));
    entries
}
