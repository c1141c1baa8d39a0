//! Candidates recovered from embedded payloads and proxy renderings.

use scraper::Html;
use serde_json::{Map, Value};
use url::Url;

use feedwright_core::FeedItem;

use super::list::summary_with_image;
use crate::error::ScraperError;
use crate::extract::{dates, html, interned, js_literal, proxy_text, urls};
use crate::rules::{NuxtDataList, ProxyTextList, ScriptStateList};

/// One item per numbered link, summarized from its section header.
pub(super) fn proxy_items(rule: &ProxyTextList, text: &str, limit: usize) -> Vec<FeedItem> {
    let sections = proxy_text::parse_sections(text, limit);
    sections
        .items
        .iter()
        .map(|entry| {
            let header = sections.header_of(entry);
            FeedItem {
                description: Some(header.describe()).filter(|d| !d.is_empty()),
                pub_date: header
                    .time_text
                    .as_deref()
                    .and_then(|raw| rule.date_format.parse(raw)),
                ..FeedItem::new(entry.title.clone(), entry.link.clone())
            }
        })
        .collect()
}

/// Items from a `__NUXT_DATA__` script.
///
/// # Errors
///
/// - [`ScraperError::PayloadNotFound`] when the script or the list container
///   is missing.
/// - [`ScraperError::Deserialize`] when the script is not a JSON array.
pub(super) fn nuxt_items(
    rule: &NuxtDataList,
    body: &str,
    base: &Url,
    url: &str,
) -> Result<Vec<FeedItem>, ScraperError> {
    let raw = nuxt_data_text(body)?.ok_or_else(|| ScraperError::PayloadNotFound {
        what: "Nuxt payload".to_owned(),
        url: url.to_owned(),
    })?;
    let root: Vec<Value> =
        serde_json::from_str(&raw).map_err(|e| ScraperError::Deserialize {
            context: format!("Nuxt payload of {url}"),
            source: e,
        })?;

    let list_missing = || ScraperError::PayloadNotFound {
        what: "News list".to_owned(),
        url: url.to_owned(),
    };
    let list_key = rule.container_keys.first().ok_or_else(list_missing)?;
    let container = interned::find_object_with_keys(&root, rule.container_keys)
        .ok_or_else(list_missing)?;
    let indices = container
        .get(*list_key)
        .map(|value| interned::resolve(&root, value))
        .and_then(Value::as_array)
        .ok_or_else(list_missing)?;

    let fields = &rule.fields;
    let items = indices
        .iter()
        .filter_map(|index| interned::resolve(&root, index).as_object())
        .map(|record| {
            let text = |key: &str| interned::resolve_text(&root, record, key);
            let link = text(fields.id)
                .and_then(|id| urls::absolutize(base, &rule.link_template.replace("{id}", &id)))
                .unwrap_or_default();
            let image = text(fields.image).and_then(|src| urls::absolutize(base, &src));
            FeedItem {
                description: summary_with_image(image.as_deref(), text(fields.summary).as_deref()),
                pub_date: text(fields.date).and_then(|raw| dates::parse_date(&raw)),
                author: text(fields.author),
                ..FeedItem::new(text(fields.title).unwrap_or_default(), link)
            }
        })
        .collect();
    Ok(items)
}

fn nuxt_data_text(body: &str) -> Result<Option<String>, ScraperError> {
    let doc = Html::parse_document(body);
    let selector = html::compile("script#__NUXT_DATA__")?;
    Ok(doc
        .select(&selector)
        .next()
        .map(|script| script.text().collect::<String>())
        .filter(|text| !text.trim().is_empty()))
}

/// Items from a `window.__NUXT__=` style assignment.
///
/// A missing item array yields no items; a missing assignment is an error.
///
/// # Errors
///
/// - [`ScraperError::PayloadNotFound`] when the marker or its closing
///   `</script>` is absent.
/// - [`ScraperError::Literal`] when the assigned expression is not a literal.
pub(super) fn script_state_items(
    rule: &ScriptStateList,
    body: &str,
    url: &str,
) -> Result<Vec<FeedItem>, ScraperError> {
    let expr = js_literal::extract_assignment(body, rule.marker).ok_or_else(|| {
        ScraperError::PayloadNotFound {
            what: format!("{} state", rule.marker.trim_end_matches('=')),
            url: url.to_owned(),
        }
    })?;
    let state = js_literal::parse(expr)?;

    let Some(list) = state.pointer(rule.items_pointer).and_then(Value::as_array) else {
        tracing::debug!(url, pointer = rule.items_pointer, "state has no item list");
        return Ok(Vec::new());
    };

    Ok(list
        .iter()
        .filter_map(|record| newsroom_item(rule, record, url))
        .collect())
}

fn newsroom_item(rule: &ScriptStateList, record: &Value, url: &str) -> Option<FeedItem> {
    let entry = record.get("en")?.as_object()?;
    let title = string_field(entry, "title")?;
    let anchor = match record.get("__id__") {
        Some(Value::String(id)) if !id.is_empty() => id.clone(),
        Some(Value::Number(id)) => id.to_string(),
        _ => title.clone(),
    };
    let link = format!("{url}#{anchor}");

    Some(FeedItem {
        guid: Some(link.clone()),
        description: entry
            .get("info")
            .and_then(Value::as_array)
            .and_then(|info| newsroom_description(info))
            .or_else(|| string_field(entry, "desc")),
        pub_date: string_field(entry, "date").and_then(|raw| rule.date_format.parse(&raw)),
        ..FeedItem::new(title, link)
    })
}

fn string_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    object
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_owned)
}

/// Concatenated info blocks: image blocks become `<img>` tags, other blocks
/// contribute their HTML content. `None` when nothing renders.
fn newsroom_description(info: &[Value]) -> Option<String> {
    let html: String = info
        .iter()
        .filter_map(Value::as_object)
        .filter_map(|block| {
            let image = string_field(block, "imgUrl");
            let content = string_field(block, "content");
            let is_image = block.get("type").and_then(Value::as_str) == Some("img");
            match (is_image, image, content) {
                (true, Some(src), _) | (false, Some(src), None) => {
                    Some(format!("<img src=\"{src}\">"))
                }
                (_, _, Some(content)) => Some(content),
                _ => None,
            }
        })
        .collect();
    (!html.is_empty()).then_some(html)
}

#[cfg(test)]
#[path = "payload_test.rs"]
mod tests;
