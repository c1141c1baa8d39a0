//! Declarative route descriptions.
//!
//! A [`Route`] is static data: where the list lives, how candidates are read
//! from it, and how each candidate is enriched from its detail page. The only
//! logic that consumes these rules is [`crate::Runner`].

use feedwright_core::EnrichmentFailures;
use serde::Serialize;

use crate::extract::dates::DateFormat;
use crate::extract::html::{Locator, Pick};

/// A publisher grouping routes, e.g. `telegramorg`.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Namespace {
    pub id: &'static str,
    pub name: &'static str,
    pub url: &'static str,
    pub lang: &'static str,
    pub categories: &'static [&'static str],
}

/// Capability flags shown alongside a route.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
#[allow(clippy::struct_excessive_bools)]
pub struct Features {
    pub require_config: bool,
    pub require_puppeteer: bool,
    pub anti_crawler: bool,
    pub support_radar: bool,
    pub support_bt: bool,
    pub support_podcast: bool,
    pub support_scihub: bool,
}

impl Features {
    /// Plain public page with radar support and nothing else.
    pub const RADAR: Self = Self {
        require_config: false,
        require_puppeteer: false,
        anti_crawler: false,
        support_radar: true,
        support_bt: false,
        support_podcast: false,
        support_scihub: false,
    };
}

#[derive(Debug, Clone, Copy)]
pub struct Route {
    pub namespace: &'static str,
    /// Path under the namespace, `/` for the namespace root.
    pub path: &'static str,
    pub name: &'static str,
    pub example: &'static str,
    /// Public site the route reads, without scheme.
    pub url: &'static str,
    pub maintainers: &'static [&'static str],
    pub description: &'static str,
    pub categories: &'static [&'static str],
    pub features: Option<Features>,
    /// Public `host/path` patterns that map back to this route.
    pub radar: &'static [&'static str],

    /// Scheme and host every other URL of the route is joined onto.
    pub base_url: &'static str,
    pub feed_title: &'static str,
    /// Feed link, joined onto `base_url`.
    pub feed_link: &'static str,
    /// Whether an empty result is a valid answer rather than an error.
    pub allow_empty: bool,
    pub list: ListStrategy,
    pub enrichment: Enrichment,
    pub enrichment_failures: EnrichmentFailures,
}

impl Route {
    /// `namespace/path` without surrounding slashes; the namespace alone for
    /// root routes.
    #[must_use]
    pub fn id(&self) -> String {
        let path = self.path.trim_matches('/');
        if path.is_empty() {
            self.namespace.to_owned()
        } else {
            format!("{}/{path}", self.namespace)
        }
    }
}

/// How the candidate list is obtained.
#[derive(Debug, Clone, Copy)]
pub enum ListStrategy {
    Html(HtmlList),
    Feed(FeedList),
    /// WordPress REST API, `/wp-json/wp/v2/posts?_embed=1`.
    WordPress,
    ProxyText(ProxyTextList),
    NuxtData(NuxtDataList),
    ScriptState(ScriptStateList),
    Sitemap(SitemapList),
}

/// CSS selection over a static listing page.
#[derive(Debug, Clone, Copy)]
pub struct HtmlList {
    pub path: &'static str,
    /// Selects one element per candidate; the picks below are scoped to it.
    pub item: &'static str,
    pub title: &'static [Pick],
    pub link: &'static [Pick],
    pub summary: &'static [Pick],
    pub image: &'static [Pick],
    pub date: &'static [Pick],
    pub date_format: Option<DateFormat>,
    /// Regex with year, month, and day groups, applied to the absolute link
    /// when `date` yields nothing.
    pub date_from_link: Option<&'static str>,
    /// Keep only the first complete candidate per link.
    pub dedupe_links: bool,
}

impl HtmlList {
    pub const EMPTY: Self = Self {
        path: "/",
        item: "body",
        title: &[],
        link: &[],
        summary: &[],
        image: &[],
        date: &[],
        date_format: None,
        date_from_link: None,
        dedupe_links: false,
    };
}

/// An RSS, RDF, or Atom document.
#[derive(Debug, Clone, Copy)]
pub struct FeedList {
    pub path: &'static str,
    /// Retry through the reader proxy when the origin answers with non-XML.
    pub proxy_fallback: bool,
    /// Use the channel `<link>` as the feed link when present.
    pub use_channel_link: bool,
}

/// A plain-text proxy rendering with source headers and numbered items.
#[derive(Debug, Clone, Copy)]
pub struct ProxyTextList {
    pub path: &'static str,
    pub date_format: DateFormat,
}

/// A `<script id="__NUXT_DATA__">` payload with interned values.
#[derive(Debug, Clone, Copy)]
pub struct NuxtDataList {
    pub path: &'static str,
    /// Keys identifying the list container object. The first key's value
    /// points at the array of item indices.
    pub container_keys: &'static [&'static str],
    pub fields: NuxtFields,
    /// Item link path with `{id}` replaced, joined onto the base URL.
    pub link_template: &'static str,
}

/// Item field names inside a [`NuxtDataList`] payload.
#[derive(Debug, Clone, Copy)]
pub struct NuxtFields {
    pub title: &'static str,
    pub summary: &'static str,
    pub image: &'static str,
    pub id: &'static str,
    pub date: &'static str,
    pub author: &'static str,
}

/// A `window.__NUXT__=` literal holding a newsroom list.
#[derive(Debug, Clone, Copy)]
pub struct ScriptStateList {
    pub path: &'static str,
    pub marker: &'static str,
    /// JSON pointer to the item array inside the parsed literal.
    pub items_pointer: &'static str,
    pub date_format: DateFormat,
}

#[derive(Debug, Clone, Copy)]
pub struct SitemapList {
    pub path: &'static str,
    /// Section prefix, joined onto the base URL; only entries below it count.
    pub prefix: &'static str,
}

/// How a candidate is completed from its own page.
#[derive(Debug, Clone, Copy)]
pub enum Enrichment {
    None,
    Container(ContainerRule),
    Readability,
}

/// Site-specific detail extraction.
///
/// A missing content container leaves the description unchanged; each
/// metadata pick applies on its own whenever it finds a value.
#[derive(Debug, Clone, Copy)]
pub struct ContainerRule {
    pub content: &'static [Locator],
    pub strip: &'static [&'static str],
    pub rewrite_urls: bool,
    pub join_all: bool,
    pub title: &'static [Pick],
    pub date: &'static [Pick],
    pub date_format: Option<DateFormat>,
    pub author: &'static [Pick],
    pub categories: Option<&'static str>,
}

impl ContainerRule {
    /// Content from the first match of `selector`, nothing else.
    #[must_use]
    pub const fn content(selector: &'static [Locator]) -> Self {
        Self {
            content: selector,
            strip: &[],
            rewrite_urls: false,
            join_all: false,
            title: &[],
            date: &[],
            date_format: None,
            author: &[],
            categories: None,
        }
    }
}
