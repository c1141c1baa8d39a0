//! WordPress REST API (`/wp-json/wp/v2/posts?_embed=1`) response types.

use serde::Deserialize;

use feedwright_core::FeedItem;

use crate::extract::dates;

const MAX_PER_PAGE: usize = 100;

/// The `per_page` value to request; the API rejects values outside 1..=100.
pub(super) fn per_page(limit: usize) -> usize {
    limit.clamp(1, MAX_PER_PAGE)
}

#[derive(Debug, Deserialize)]
pub(super) struct Rendered {
    #[serde(default)]
    rendered: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct Embedded {
    #[serde(default)]
    author: Vec<EmbeddedAuthor>,
    #[serde(default, rename = "wp:term")]
    terms: Vec<Vec<EmbeddedTerm>>,
}

#[derive(Debug, Deserialize)]
pub(super) struct EmbeddedAuthor {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct EmbeddedTerm {
    #[serde(default)]
    taxonomy: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct WpPost {
    #[serde(default)]
    title: Option<Rendered>,
    #[serde(default)]
    link: Option<String>,
    #[serde(default)]
    guid: Option<Rendered>,
    #[serde(default)]
    content: Option<Rendered>,
    #[serde(default)]
    date_gmt: Option<String>,
    #[serde(default)]
    date: Option<String>,
    #[serde(default, rename = "_embedded")]
    embedded: Option<Embedded>,
}

fn rendered(field: Option<Rendered>) -> Option<String> {
    field
        .and_then(|r| r.rendered)
        .filter(|s| !s.trim().is_empty())
}

impl WpPost {
    pub(super) fn into_item(self) -> FeedItem {
        let link = self.link.unwrap_or_default();
        let title = rendered(self.title)
            .map(|t| html_escape::decode_html_entities(t.trim()).into_owned())
            .unwrap_or_default();
        // `date_gmt` has no zone designator but is UTC, which is how bare
        // timestamps are read.
        let pub_date = self
            .date_gmt
            .or(self.date)
            .filter(|d| !d.trim().is_empty())
            .and_then(|d| dates::parse_date(&d));

        let embedded = self.embedded.unwrap_or_default();
        let mut category: Vec<String> = Vec::new();
        for term in embedded.terms.into_iter().flatten() {
            let taxonomy = term.taxonomy.as_deref();
            if !matches!(taxonomy, Some("category" | "post_tag")) {
                continue;
            }
            if let Some(name) = term.name.map(|n| n.trim().to_owned()) {
                if !name.is_empty() && !category.contains(&name) {
                    category.push(name);
                }
            }
        }

        FeedItem {
            guid: rendered(self.guid).or_else(|| Some(link.clone())),
            description: rendered(self.content),
            pub_date,
            author: embedded
                .author
                .into_iter()
                .next()
                .and_then(|a| a.name)
                .filter(|n| !n.trim().is_empty()),
            category,
            ..FeedItem::new(title, link)
        }
    }
}
