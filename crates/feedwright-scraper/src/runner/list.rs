//! Candidate extraction from a static HTML listing page.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use scraper::Html;
use url::Url;

use feedwright_core::FeedItem;

use crate::error::ScraperError;
use crate::extract::{dates, html, urls};
use crate::rules::HtmlList;

/// Reads one candidate per `rule.item` match, in document order.
///
/// Links and images come back absolute. Candidates missing a title or link
/// are kept here; the run loop drops them.
pub(super) fn html_items(
    rule: &HtmlList,
    body: &str,
    base: &Url,
) -> Result<Vec<FeedItem>, ScraperError> {
    let link_date = rule
        .date_from_link
        .map(|pattern| {
            Regex::new(pattern).map_err(|e| ScraperError::Pattern {
                pattern: pattern.to_owned(),
                reason: e.to_string(),
            })
        })
        .transpose()?;

    let doc = Html::parse_document(body);
    let item_selector = html::compile(rule.item)?;
    let mut seen = HashSet::new();
    let mut items = Vec::new();

    for element in doc.select(&item_selector) {
        let title = html::pick(element, rule.title)?.unwrap_or_default();
        let link = html::pick(element, rule.link)?
            .and_then(|raw| urls::absolutize(base, &raw))
            .unwrap_or_default();

        if rule.dedupe_links {
            if title.is_empty() || link.is_empty() || seen.contains(&link) {
                continue;
            }
            seen.insert(link.clone());
        }

        let image = html::pick(element, rule.image)?.and_then(|raw| urls::absolutize(base, &raw));
        let summary = html::pick(element, rule.summary)?;
        let pub_date = match html::pick(element, rule.date)? {
            Some(raw) => dates::parse_with(rule.date_format.as_ref(), &raw),
            None => link_date.as_ref().and_then(|re| date_in_link(re, &link)),
        };

        items.push(FeedItem {
            description: summary_with_image(image.as_deref(), summary.as_deref()),
            pub_date,
            ..FeedItem::new(title, link)
        });
    }

    tracing::debug!(count = items.len(), selector = rule.item, "html candidates");
    Ok(items)
}

/// `<img src="…">` and the summary text on separate lines; `None` when both
/// are absent.
pub(super) fn summary_with_image(image: Option<&str>, summary: Option<&str>) -> Option<String> {
    let parts: Vec<String> = image
        .map(|src| format!("<img src=\"{src}\">"))
        .into_iter()
        .chain(summary.map(str::to_owned))
        .collect();
    (!parts.is_empty()).then(|| parts.join("\n"))
}

/// Midnight UTC of the year, month, and day captured by `pattern`.
fn date_in_link(pattern: &Regex, link: &str) -> Option<DateTime<Utc>> {
    let caps = pattern.captures(link)?;
    let part = |i: usize| caps.get(i)?.as_str().parse::<u32>().ok();
    let year = i32::try_from(part(1)?).ok()?;
    let date = NaiveDate::from_ymd_opt(year, part(2)?, part(3)?)?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc())
}

#[cfg(test)]
#[path = "list_test.rs"]
mod tests;
