//! Pure extraction helpers shared by the list and detail strategies.
//!
//! Nothing in here performs I/O; every function takes already-fetched text.

pub mod dates;
pub mod feed;
pub mod html;
pub mod interned;
pub mod js_literal;
pub mod limit;
pub mod proxy_text;
pub mod readability;
pub mod sitemap;
pub mod urls;
