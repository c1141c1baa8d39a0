//! Shared HTTP fetch wrapper used by every route.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;

use feedwright_core::AppConfig;

use crate::error::ScraperError;
use crate::rate_limit::retry_with_backoff;

/// HTTP client for upstream list and detail pages.
///
/// Maps 429, 404, and other non-2xx responses to typed errors. Transient
/// errors (429, network failures) are retried with exponential backoff up to
/// `max_retries` additional attempts; with the default of zero every request
/// is made exactly once.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    max_retries: u32,
    backoff_base_secs: u64,
}

impl HttpClient {
    /// Creates an `HttpClient` with the given timeout, `User-Agent`, and retry policy.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            max_retries,
            backoff_base_secs,
        })
    }

    /// # Errors
    ///
    /// See [`HttpClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ScraperError> {
        Self::new(
            config.request_timeout_secs,
            &config.user_agent,
            config.max_retries,
            config.retry_backoff_base_secs,
        )
    }

    /// Fetches `url` and returns the body as text.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::RateLimited`] for HTTP 429 after retries are exhausted.
    /// - [`ScraperError::NotFound`] for HTTP 404.
    /// - [`ScraperError::UnexpectedStatus`] for any other non-2xx status.
    /// - [`ScraperError::Http`] for network or TLS failures.
    pub async fn get_text(&self, url: &str) -> Result<String, ScraperError> {
        self.get_with_query(url, &[]).await
    }

    /// Fetches `url` with `query` appended and deserializes the JSON body.
    ///
    /// # Errors
    ///
    /// As [`HttpClient::get_text`], plus [`ScraperError::Deserialize`] when
    /// the body does not match `T`.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, ScraperError> {
        let body = self.get_with_query(url, query).await?;
        serde_json::from_str::<T>(&body).map_err(|e| ScraperError::Deserialize {
            context: format!("response from {url}"),
            source: e,
        })
    }

    async fn get_with_query(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<String, ScraperError> {
        retry_with_backoff(self.max_retries, self.backoff_base_secs, || async move {
            tracing::debug!(url, "fetching");
            let response = self.client.get(url).query(query).send().await?;
            let status = response.status();

            if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                let retry_after_secs = response
                    .headers()
                    .get(reqwest::header::RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|s| s.trim().parse::<u64>().ok())
                    .unwrap_or(60);
                return Err(ScraperError::RateLimited {
                    domain: extract_domain(url),
                    retry_after_secs,
                });
            }

            if status == reqwest::StatusCode::NOT_FOUND {
                return Err(ScraperError::NotFound {
                    url: url.to_owned(),
                });
            }

            if !status.is_success() {
                return Err(ScraperError::UnexpectedStatus {
                    status: status.as_u16(),
                    url: url.to_owned(),
                });
            }

            Ok(response.text().await?)
        })
        .await
    }
}

/// Host part of `url` for error messages; falls back to the input.
fn extract_domain(url: &str) -> String {
    url::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_owned))
        .unwrap_or_else(|| url.to_owned())
}
