//! Reverse lookup from a public page URL to the routes that cover it.

use crate::routes::ROUTES;
use crate::rules::Route;

/// A route whose radar source matched, with the pattern that matched.
#[derive(Debug, Clone, Copy)]
pub struct RadarMatch {
    pub route: &'static Route,
    pub source: &'static str,
}

/// Routes whose radar sources equal the `host/path` of `url`.
///
/// The scheme is optional. Query, fragment, and trailing slashes are
/// ignored, and the host is compared case-insensitively.
#[must_use]
pub fn match_url(url: &str) -> Vec<RadarMatch> {
    let Some(target) = normalize(url) else {
        return Vec::new();
    };
    ROUTES
        .iter()
        .flat_map(|route| {
            route
                .radar
                .iter()
                .map(move |&source| RadarMatch { route, source })
        })
        .filter(|m| normalize(m.source).as_deref() == Some(target.as_str()))
        .collect()
}

fn normalize(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let rest = raw.split_once("://").map_or(raw, |(_, rest)| rest);
    let rest = rest.split(['?', '#']).next().unwrap_or_default();
    let (host, path) = rest.split_once('/').unwrap_or((rest, ""));
    if host.is_empty() {
        return None;
    }
    let path = path.trim_end_matches('/');
    Some(if path.is_empty() {
        host.to_ascii_lowercase()
    } else {
        format!("{}/{path}", host.to_ascii_lowercase())
    })
}
