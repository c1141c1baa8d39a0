pub mod cache;
pub mod client;
pub mod error;
pub mod extract;
pub mod radar;
mod rate_limit;
pub mod routes;
pub mod rules;
pub mod runner;

pub use cache::DetailCache;
pub use client::HttpClient;
pub use error::ScraperError;
pub use radar::{match_url, RadarMatch};
pub use rules::{Enrichment, Features, ListStrategy, Namespace, Route};
pub use runner::Runner;
