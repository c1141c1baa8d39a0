//! Absolute-URL helpers for links and extracted HTML fragments.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use url::Url;

use crate::error::ScraperError;

// Quoted attribute values may contain a raw `>`.
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<[a-zA-Z](?:[^>"']|"[^"]*"|'[^']*')*>"#).expect("valid tag regex")
});

static URL_ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(\s)(src|href|srcset)(\s*=\s*)(?:"([^"]*)"|'([^']*)')"#)
        .expect("valid url attribute regex")
});

/// Parses a site base URL.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidUrl`] when `base` is not an absolute URL.
pub fn parse_base(base: &str) -> Result<Url, ScraperError> {
    Url::parse(base).map_err(|e| ScraperError::InvalidUrl {
        url: base.to_owned(),
        reason: e.to_string(),
    })
}

/// Resolves `raw` against `base`. Values that already carry a scheme
/// (`https:`, `data:`, `mailto:` and so on) come back unchanged.
///
/// Returns `None` for blank input or a reference `base` cannot resolve.
#[must_use]
pub fn absolutize(base: &Url, raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if Url::parse(raw).is_ok() {
        return Some(raw.to_owned());
    }
    base.join(raw).ok().map(String::from)
}

/// Rewrites every `src`, `href`, and `srcset` attribute in an HTML fragment
/// to an absolute URL.
///
/// Each `srcset` candidate is resolved on its own and keeps its width or
/// density descriptor. Attribute values are entity-decoded before resolving
/// and re-encoded afterwards, so `&amp;` in a query string survives.
#[must_use]
pub fn rewrite_fragment_urls(base: &Url, html: &str) -> String {
    TAG_RE
        .replace_all(html, |tag: &Captures<'_>| {
            URL_ATTR_RE
                .replace_all(&tag[0], |attr: &Captures<'_>| rewrite_attr(base, attr))
                .into_owned()
        })
        .into_owned()
}

fn rewrite_attr(base: &Url, attr: &Captures<'_>) -> String {
    let (value, quote) = match (attr.get(4), attr.get(5)) {
        (Some(v), _) => (v.as_str(), '"'),
        (None, Some(v)) => (v.as_str(), '\''),
        (None, None) => return attr[0].to_owned(),
    };

    let decoded = html_escape::decode_html_entities(value);
    let rewritten = if attr[2].eq_ignore_ascii_case("srcset") {
        rewrite_srcset(base, &decoded)
    } else {
        absolutize(base, &decoded).unwrap_or_else(|| decoded.into_owned())
    };

    let encoded = if quote == '"' {
        html_escape::encode_double_quoted_attribute(&rewritten)
    } else {
        html_escape::encode_single_quoted_attribute(&rewritten)
    };
    format!("{}{}{}{quote}{encoded}{quote}", &attr[1], &attr[2], &attr[3])
}

/// Resolves each `srcset` candidate independently.
///
/// A candidate URL runs up to the next whitespace, so commas inside it (as in
/// `data:` URLs) are kept; trailing commas end the candidate.
#[must_use]
pub fn rewrite_srcset(base: &Url, srcset: &str) -> String {
    srcset_candidates(srcset)
        .into_iter()
        .map(|(url, descriptor)| {
            let resolved = absolutize(base, url).unwrap_or_else(|| url.to_owned());
            if descriptor.is_empty() {
                resolved
            } else {
                format!("{resolved} {descriptor}")
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn srcset_candidates(srcset: &str) -> Vec<(&str, &str)> {
    let mut candidates = Vec::new();
    let mut rest = srcset;
    loop {
        rest = rest.trim_start_matches(|c: char| c == ',' || c.is_whitespace());
        if rest.is_empty() {
            return candidates;
        }
        let url_end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let (raw_url, after) = rest.split_at(url_end);
        let url = raw_url.trim_end_matches(',');
        if url.len() < raw_url.len() {
            candidates.push((url, ""));
            rest = after;
            continue;
        }
        let descriptor_end = after.find(',').unwrap_or(after.len());
        candidates.push((url, after[..descriptor_end].trim()));
        rest = &after[descriptor_end..];
    }
}
