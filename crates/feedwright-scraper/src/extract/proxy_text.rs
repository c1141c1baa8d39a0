//! Header/item pairing over a plain-text proxy rendering of a page.
//!
//! The rendering is markdown-like: each source block starts with a header
//! line `[![Image…](logo) Source name](source url)update time`, followed by
//! numbered item links `[1. Title](https://…)`.

use std::sync::LazyLock;

use regex::Regex;

static HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[!\[Image[^\]]*\]\(([^)]+)\)\s*([^\]]+)\]\(([^)]+)\)([^\n]+)")
        .expect("valid section header regex")
});

static ITEM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[(\d+)\.\s*([^\]]+?)\]\((https?://[^)]+)\)").expect("valid section item regex")
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionHeader {
    pub logo: Option<String>,
    pub source_name: Option<String>,
    pub source_url: Option<String>,
    pub time_text: Option<String>,
}

impl SectionHeader {
    /// Summary lines for items under this header, one per known field.
    #[must_use]
    pub fn describe(&self) -> String {
        let mut lines = Vec::with_capacity(4);
        if let Some(logo) = &self.logo {
            lines.push(format!("<img src=\"{logo}\">"));
        }
        if let Some(name) = &self.source_name {
            lines.push(format!("来源：{name}"));
        }
        if let Some(time) = &self.time_text {
            lines.push(format!("更新时间：{time}"));
        }
        if let Some(url) = &self.source_url {
            lines.push(format!("原站：{url}"));
        }
        lines.join("\n")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionItem {
    pub title: String,
    pub link: String,
    /// Index into the headers returned alongside the items.
    pub header: usize,
}

#[derive(Debug, Default)]
pub struct Sections {
    pub headers: Vec<SectionHeader>,
    pub items: Vec<SectionItem>,
}

impl Sections {
    #[must_use]
    pub fn header_of(&self, item: &SectionItem) -> &SectionHeader {
        &self.headers[item.header]
    }
}

/// Splits `text` at each header match and collects up to `limit` items.
///
/// An item belongs to the nearest header before it; text before the first
/// header is ignored.
#[must_use]
pub fn parse_sections(text: &str, limit: usize) -> Sections {
    let matches: Vec<_> = HEADER_RE.captures_iter(text).collect();
    let mut sections = Sections::default();

    for (index, cap) in matches.iter().enumerate() {
        if sections.items.len() >= limit {
            break;
        }
        let whole = cap.get(0).map_or(0..0, |m| m.range());
        let end = matches
            .get(index + 1)
            .and_then(|next| next.get(0))
            .map_or(text.len(), |m| m.start());

        let field = |i: usize| {
            cap.get(i)
                .map(|m| m.as_str().trim().to_owned())
                .filter(|s| !s.is_empty())
        };
        sections.headers.push(SectionHeader {
            logo: field(1),
            source_name: field(2),
            source_url: field(3),
            time_text: field(4),
        });
        let header = sections.headers.len() - 1;

        for item in ITEM_RE.captures_iter(&text[whole.end..end]) {
            if sections.items.len() >= limit {
                break;
            }
            sections.items.push(SectionItem {
                title: item[2].trim().to_owned(),
                link: item[3].trim().to_owned(),
                header,
            });
        }
    }

    sections
}
