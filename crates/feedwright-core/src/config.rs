use crate::app_config::{AppConfig, DEFAULT_USER_AGENT};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default, so only malformed values fail.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u32>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let log_level = or_default("FEEDWRIGHT_LOG_LEVEL", "info");

    let request_timeout_secs = parse_u64("FEEDWRIGHT_REQUEST_TIMEOUT_SECS", "30")?;
    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "FEEDWRIGHT_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    let user_agent = or_default("FEEDWRIGHT_USER_AGENT", DEFAULT_USER_AGENT);
    let max_retries = parse_u32("FEEDWRIGHT_MAX_RETRIES", "0")?;
    let retry_backoff_base_secs = parse_u64("FEEDWRIGHT_RETRY_BACKOFF_BASE_SECS", "1")?;
    // Zero disables reuse across runs; duplicates within a run still share a fetch.
    let cache_ttl_secs = parse_u64("FEEDWRIGHT_CACHE_TTL_SECS", "3600")?;

    let reader_proxy_url = or_default("FEEDWRIGHT_READER_PROXY_URL", "https://r.jina.ai/");
    if !(reader_proxy_url.starts_with("http://") || reader_proxy_url.starts_with("https://")) {
        return Err(ConfigError::InvalidEnvVar {
            var: "FEEDWRIGHT_READER_PROXY_URL".to_string(),
            reason: format!("expected an http(s) URL, got \"{reader_proxy_url}\""),
        });
    }

    let sites_path = lookup("FEEDWRIGHT_SITES_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);

    Ok(AppConfig {
        log_level,
        request_timeout_secs,
        user_agent,
        max_retries,
        retry_backoff_base_secs,
        cache_ttl_secs,
        reader_proxy_url,
        sites_path,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
