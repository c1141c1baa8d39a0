//! The built-in route table.

mod feeds;
mod namespaces;
mod pages;
mod payloads;

pub use namespaces::NAMESPACES;

use crate::rules::{Namespace, Route};

pub(crate) const MAINTAINERS: &[&str] = &["cantaible"];
pub(crate) const NEW_MEDIA: &[&str] = &["new-media"];

/// Every built-in route, ordered by id.
pub static ROUTES: &[Route] = &[
    payloads::AIBASE_NEWS_SITE,
    feeds::AIERA,
    payloads::AIHOT_TODAY,
    pages::FACEBOOK_DEVELOPERS_BLOG,
    feeds::JAYISGAMES,
    payloads::KWAI_NEWSROOM,
    pages::MIT_AI_NEWS,
    feeds::MUSICALLY,
    pages::POCKETGAMER,
    pages::SEMRUSH_PRODUCT_NEWS,
    feeds::SEROUNDTABLE,
    pages::TELEGRAM_BLOG,
    feeds::TESTINGCATALOG,
    feeds::TLDR_TECH,
    pages::YOUTUBE_NEWS_AND_EVENTS,
];

/// Looks a route up by id; surrounding slashes are ignored.
#[must_use]
pub fn find(id: &str) -> Option<&'static Route> {
    let id = id.trim().trim_matches('/');
    ROUTES.iter().find(|route| route.id() == id)
}

#[must_use]
pub fn namespace(id: &str) -> Option<&'static Namespace> {
    NAMESPACES.iter().find(|ns| ns.id == id)
}
