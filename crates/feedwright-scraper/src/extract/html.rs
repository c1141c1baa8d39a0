//! DOM helpers over `scraper` shared by the HTML list and detail strategies.
//!
//! `scraper::Html` is not `Send`, so documents are parsed and dropped inside
//! these synchronous helpers and never held across an `.await`.

use scraper::{ElementRef, Html, Selector};

use crate::error::ScraperError;

/// What to read from a matched element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// Concatenated descendant text, trimmed.
    Text,
    /// An attribute value, trimmed.
    Attr(&'static str),
}

/// One way to read a field. A field is a list of picks tried in order; the
/// first non-empty value wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pick {
    /// `None` reads the scoped element itself.
    pub selector: Option<&'static str>,
    pub source: Source,
}

impl Pick {
    #[must_use]
    pub const fn text(selector: &'static str) -> Self {
        Self {
            selector: Some(selector),
            source: Source::Text,
        }
    }

    #[must_use]
    pub const fn attr(selector: &'static str, name: &'static str) -> Self {
        Self {
            selector: Some(selector),
            source: Source::Attr(name),
        }
    }

    #[must_use]
    pub const fn own_attr(name: &'static str) -> Self {
        Self {
            selector: None,
            source: Source::Attr(name),
        }
    }
}

/// How to find a content container on a detail page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Locator {
    pub selector: &'static str,
    /// Use the matched element's parent instead of the element.
    pub parent: bool,
}

impl Locator {
    #[must_use]
    pub const fn of(selector: &'static str) -> Self {
        Self {
            selector,
            parent: false,
        }
    }

    #[must_use]
    pub const fn parent_of(selector: &'static str) -> Self {
        Self {
            selector,
            parent: true,
        }
    }
}

/// Parses a CSS selector.
///
/// # Errors
///
/// Returns [`ScraperError::Selector`] for invalid syntax.
pub fn compile(selector: &str) -> Result<Selector, ScraperError> {
    Selector::parse(selector).map_err(|e| ScraperError::Selector {
        selector: selector.to_owned(),
        reason: format!("{e:?}"),
    })
}

/// Reads the first non-empty value among `picks`, scoped to `scope`.
///
/// # Errors
///
/// Returns [`ScraperError::Selector`] if a pick's selector is invalid.
pub fn pick(scope: ElementRef<'_>, picks: &[Pick]) -> Result<Option<String>, ScraperError> {
    for p in picks {
        let element = match p.selector {
            Some(selector) => scope.select(&compile(selector)?).next(),
            None => Some(scope),
        };
        if let Some(value) = element.and_then(|el| read(el, p.source)) {
            return Ok(Some(value));
        }
    }
    Ok(None)
}

fn read(element: ElementRef<'_>, source: Source) -> Option<String> {
    let value = match source {
        Source::Text => element.text().collect::<String>(),
        Source::Attr(name) => element.value().attr(name)?.to_owned(),
    };
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_owned())
}

/// Trimmed, non-empty text of every element matching `selector`.
///
/// # Errors
///
/// Returns [`ScraperError::Selector`] if `selector` is invalid.
pub fn texts(scope: ElementRef<'_>, selector: &str) -> Result<Vec<String>, ScraperError> {
    let selector = compile(selector)?;
    Ok(scope
        .select(&selector)
        .filter_map(|el| read(el, Source::Text))
        .collect())
}

/// Inner HTML of the content container, or `None` when no locator matches.
///
/// Locators are tried in order. Elements matching `strip` are removed from the
/// container first. With `join_all`, every match of the winning locator is
/// concatenated in document order; otherwise only the first is used.
///
/// # Errors
///
/// Returns [`ScraperError::Selector`] if any selector is invalid.
pub fn container_html(
    doc: &mut Html,
    locators: &[Locator],
    strip: &[&str],
    join_all: bool,
) -> Result<Option<String>, ScraperError> {
    let mut containers = Vec::new();
    for locator in locators {
        let selector = compile(locator.selector)?;
        let root = doc.root_element();
        let matches = root.select(&selector).filter_map(|el| {
            if locator.parent {
                el.parent().and_then(ElementRef::wrap)
            } else {
                Some(el)
            }
        });
        containers = if join_all {
            matches.map(|el| el.id()).collect()
        } else {
            matches.take(1).map(|el| el.id()).collect()
        };
        if !containers.is_empty() {
            break;
        }
    }
    if containers.is_empty() {
        return Ok(None);
    }

    let strip_selectors = strip
        .iter()
        .map(|s| compile(s))
        .collect::<Result<Vec<_>, _>>()?;
    let mut doomed = Vec::new();
    for id in &containers {
        let Some(container) = doc.tree.get(*id).and_then(ElementRef::wrap) else {
            continue;
        };
        for selector in &strip_selectors {
            doomed.extend(container.select(selector).map(|el| el.id()));
        }
    }
    for id in doomed {
        if let Some(mut node) = doc.tree.get_mut(id) {
            node.detach();
        }
    }

    let html: String = containers
        .iter()
        .filter_map(|id| doc.tree.get(*id).and_then(ElementRef::wrap))
        .map(|el| el.inner_html())
        .collect();
    Ok(Some(html))
}
