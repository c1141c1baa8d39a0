//! The generic run loop: fetch list, extract candidates, enrich, normalize.

mod detail;
mod list;
mod payload;
mod wordpress;

use std::collections::HashMap;
use std::time::Duration;

use futures::future::try_join_all;
use url::Url;

use feedwright_core::{AppConfig, EnrichmentFailures, Feed, FeedItem, SitesFile};

use crate::cache::DetailCache;
use crate::client::HttpClient;
use crate::error::ScraperError;
use crate::extract::{feed, sitemap, urls};
use crate::routes;
use crate::rules::{Enrichment, FeedList, ListStrategy, Route};

/// Candidates plus any feed metadata the source itself supplied.
#[derive(Debug, Default)]
struct Listing {
    title: Option<String>,
    link: Option<String>,
    items: Vec<FeedItem>,
}

impl Listing {
    fn of(items: Vec<FeedItem>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }
}

/// Runs routes against live (or re-rooted) upstreams.
///
/// The detail cache lives as long as the runner, so repeated runs within the
/// cache TTL reuse enriched items instead of refetching detail pages.
pub struct Runner {
    client: HttpClient,
    cache: DetailCache<FeedItem>,
    reader_proxy_url: String,
    policies: HashMap<String, EnrichmentFailures>,
}

impl Runner {
    #[must_use]
    pub fn new(client: HttpClient, cache_ttl: Duration, reader_proxy_url: impl Into<String>) -> Self {
        Self {
            client,
            cache: DetailCache::new(cache_ttl),
            reader_proxy_url: reader_proxy_url.into(),
            policies: HashMap::new(),
        }
    }

    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, ScraperError> {
        Ok(Self::new(
            HttpClient::from_config(config)?,
            Duration::from_secs(config.cache_ttl_secs),
            config.reader_proxy_url.clone(),
        ))
    }

    /// Applies per-route settings from a sites file.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::UnknownRoute`] for an entry naming no built-in route.
    pub fn apply_overrides(&mut self, sites: &SitesFile) -> Result<(), ScraperError> {
        for site in &sites.sites {
            let route = routes::find(&site.route)
                .ok_or_else(|| ScraperError::UnknownRoute(site.route.clone()))?;
            if let Some(policy) = site.enrichment_failures {
                tracing::debug!(route = %route.id(), %policy, "enrichment policy override");
                self.policies.insert(route.id(), policy);
            }
        }
        Ok(())
    }

    /// The effective enrichment failure policy for `route`.
    #[must_use]
    pub fn enrichment_policy(&self, route: &Route) -> EnrichmentFailures {
        self.policies
            .get(&route.id())
            .copied()
            .unwrap_or(route.enrichment_failures)
    }

    #[must_use]
    pub fn cache(&self) -> &DetailCache<FeedItem> {
        &self.cache
    }

    /// Runs `route` against its own site.
    ///
    /// # Errors
    ///
    /// See [`Runner::run_at`].
    pub async fn run(&self, route: &Route, limit: usize) -> Result<Feed, ScraperError> {
        self.run_at(route, route.base_url, limit).await
    }

    /// Runs `route` with every URL re-rooted on `base_url`.
    ///
    /// # Errors
    ///
    /// - Any fetch error for the list page.
    /// - [`ScraperError::PayloadNotFound`] when an embedded payload is missing.
    /// - [`ScraperError::EmptyFeed`] when nothing usable was found and the
    ///   route does not allow empty results.
    /// - Detail-page errors, unless the route's policy is
    ///   [`EnrichmentFailures::Fallback`].
    pub async fn run_at(
        &self,
        route: &Route,
        base_url: &str,
        limit: usize,
    ) -> Result<Feed, ScraperError> {
        let base = urls::parse_base(base_url)?;
        let route_id = route.id();
        tracing::info!(route = %route_id, base = %base, limit, "running route");

        let Listing { title, link, items } = self.list(route, &base, limit).await?;
        let mut items: Vec<FeedItem> = items
            .into_iter()
            .filter_map(|mut item| {
                item.link = urls::absolutize(&base, &item.link)?;
                item.title = item.title.trim().to_owned();
                item.guid = Some(item.guid_or_link().to_owned());
                item.is_complete().then_some(item)
            })
            .collect();

        if items.is_empty() && !route.allow_empty {
            return Err(ScraperError::EmptyFeed { route: route_id });
        }
        items.truncate(limit);

        // One enrichment per unique link; later duplicates share its outcome,
        // including the fallback item when the detail fetch fails.
        let mut unique: Vec<FeedItem> = Vec::new();
        let mut index_of: HashMap<String, usize> = HashMap::new();
        let order: Vec<usize> = items
            .into_iter()
            .map(|item| {
                *index_of.entry(item.link.clone()).or_insert_with(|| {
                    unique.push(item);
                    unique.len() - 1
                })
            })
            .collect();

        let policy = self.enrichment_policy(route);
        let enriched = try_join_all(
            unique
                .into_iter()
                .map(|item| self.enrich(route, &route_id, &base, policy, item)),
        )
        .await?;
        let items: Vec<FeedItem> = order.into_iter().map(|i| enriched[i].clone()).collect();

        tracing::info!(route = %route_id, count = items.len(), "route finished");
        Ok(Feed {
            title: title.unwrap_or_else(|| route.feed_title.to_owned()),
            link: link.unwrap_or_else(|| join(&base, route.feed_link)),
            description: Some(route.description.to_owned()),
            items,
        })
    }

    async fn list(&self, route: &Route, base: &Url, limit: usize) -> Result<Listing, ScraperError> {
        match &route.list {
            ListStrategy::Html(rule) => {
                let html = self.client.get_text(&join(base, rule.path)).await?;
                list::html_items(rule, &html, base).map(Listing::of)
            }
            ListStrategy::Feed(rule) => self.feed_listing(rule, base).await,
            ListStrategy::WordPress => {
                let url = join(base, "/wp-json/wp/v2/posts");
                let query = [
                    ("per_page", wordpress::per_page(limit).to_string()),
                    ("_embed", "1".to_owned()),
                ];
                let posts: Vec<wordpress::WpPost> = self.client.get_json(&url, &query).await?;
                Ok(Listing::of(
                    posts.into_iter().map(wordpress::WpPost::into_item).collect(),
                ))
            }
            ListStrategy::ProxyText(rule) => {
                let url = format!("{}{}", self.reader_proxy_url, join(base, rule.path));
                let text = self.client.get_text(&url).await?;
                Ok(Listing::of(payload::proxy_items(rule, &text, limit)))
            }
            ListStrategy::NuxtData(rule) => {
                let url = join(base, rule.path);
                let html = self.client.get_text(&url).await?;
                payload::nuxt_items(rule, &html, base, &url).map(Listing::of)
            }
            ListStrategy::ScriptState(rule) => {
                let url = join(base, rule.path);
                let html = self.client.get_text(&url).await?;
                payload::script_state_items(rule, &html, &url).map(Listing::of)
            }
            ListStrategy::Sitemap(rule) => {
                let xml = self.client.get_text(&join(base, rule.path)).await?;
                let entries = sitemap::parse_sitemap(&xml, &join(base, rule.prefix));
                Ok(Listing::of(
                    entries
                        .into_iter()
                        .map(|entry| FeedItem {
                            guid: Some(entry.loc.clone()),
                            pub_date: entry.lastmod,
                            ..FeedItem::new(entry.loc.clone(), entry.loc)
                        })
                        .collect(),
                ))
            }
        }
    }

    async fn feed_listing(&self, rule: &FeedList, base: &Url) -> Result<Listing, ScraperError> {
        let url = join(base, rule.path);
        let mut body = self.client.get_text(&url).await?;

        if rule.proxy_fallback && !feed::looks_like_xml(&body) {
            tracing::warn!(url = %url, "origin did not return XML, retrying through reader proxy");
            body = self
                .client
                .get_text(&format!("{}{url}", self.reader_proxy_url))
                .await?;
            if !feed::looks_like_xml(&body) {
                return Err(ScraperError::Feed {
                    url,
                    reason: "neither origin nor reader proxy returned XML".to_owned(),
                });
            }
        }

        let parsed = feed::parse_feed(&body, &url)?;
        Ok(Listing {
            title: parsed.title,
            link: parsed.link.filter(|_| rule.use_channel_link),
            items: parsed.items,
        })
    }

    async fn enrich(
        &self,
        route: &Route,
        route_id: &str,
        base: &Url,
        policy: EnrichmentFailures,
        item: FeedItem,
    ) -> Result<FeedItem, ScraperError> {
        if matches!(route.enrichment, Enrichment::None) {
            return Ok(item);
        }

        let result = self
            .cache
            .try_get(&item.link, || async {
                let html = self.client.get_text(&item.link).await?;
                detail::apply(&route.enrichment, &html, base, item.clone())
            })
            .await;

        match (result, policy) {
            (Ok(enriched), _) => Ok(enriched),
            (Err(err), EnrichmentFailures::Fallback) => {
                tracing::warn!(
                    route = %route_id,
                    link = %item.link,
                    error = %err,
                    "detail enrichment failed, keeping summary"
                );
                Ok(item)
            }
            (Err(err), EnrichmentFailures::Abort) => {
                tracing::error!(route = %route_id, link = %item.link, error = %err, "detail enrichment failed");
                Err(err)
            }
        }
    }
}

/// Joins a route path onto the base URL.
fn join(base: &Url, path: &str) -> String {
    urls::absolutize(base, path).unwrap_or_else(|| base.to_string())
}

#[cfg(test)]
#[path = "runner_test.rs"]
mod tests;
