use std::path::PathBuf;

/// Desktop browser user agent sent by default; several upstream sites serve
/// stripped or blocked pages to unknown agents.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

#[derive(Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub max_retries: u32,
    pub retry_backoff_base_secs: u64,
    pub cache_ttl_secs: u64,
    pub reader_proxy_url: String,
    pub sites_path: Option<PathBuf>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_secs", &self.retry_backoff_base_secs)
            .field("cache_ttl_secs", &self.cache_ttl_secs)
            // Reader proxies are commonly keyed with a token in the URL.
            .field("reader_proxy_url", &"[redacted]")
            .field("sites_path", &self.sites_path)
            .finish()
    }
}
