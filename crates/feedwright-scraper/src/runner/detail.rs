//! Completing a candidate from its detail page.

use scraper::Html;
use url::Url;

use feedwright_core::FeedItem;

use crate::error::ScraperError;
use crate::extract::{dates, html, readability, urls};
use crate::rules::{ContainerRule, Enrichment};

/// Applies `enrichment` to `item` using the fetched detail `body`.
/// Relative URLs inside extracted content resolve against the site `base`.
///
/// Synchronous on purpose: the parsed document must not live across an
/// `.await`.
pub(super) fn apply(
    enrichment: &Enrichment,
    body: &str,
    base: &Url,
    item: FeedItem,
) -> Result<FeedItem, ScraperError> {
    match enrichment {
        Enrichment::None => Ok(item),
        Enrichment::Readability => {
            let content = readability::extract_article(body, &item.link)?;
            Ok(FeedItem {
                description: Some(content),
                ..item
            })
        }
        Enrichment::Container(rule) => container(rule, body, base, item),
    }
}

fn container(
    rule: &ContainerRule,
    body: &str,
    base: &Url,
    mut item: FeedItem,
) -> Result<FeedItem, ScraperError> {
    let mut doc = Html::parse_document(body);

    let content = html::container_html(&mut doc, rule.content, rule.strip, rule.join_all)?
        .filter(|content| !content.trim().is_empty());
    if let Some(content) = content {
        item.description = Some(if rule.rewrite_urls {
            urls::rewrite_fragment_urls(base, &content)
        } else {
            content
        });
    }

    let root = doc.root_element();
    if let Some(title) = html::pick(root, rule.title)? {
        item.title = title;
    }
    if let Some(date) = html::pick(root, rule.date)?
        .and_then(|raw| dates::parse_with(rule.date_format.as_ref(), &raw))
    {
        item.pub_date = Some(date);
    }
    if let Some(author) = html::pick(root, rule.author)? {
        item.author = Some(author);
    }
    if let Some(selector) = rule.categories {
        let categories = html::texts(root, selector)?;
        if !categories.is_empty() {
            item.category = categories;
        }
    }

    Ok(item)
}
