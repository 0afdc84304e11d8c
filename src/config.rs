use std::time::Duration;

use anyhow::Context;
use url::Url;

/// Base URL of the production admin API gateway.
pub const DEFAULT_API_URL: &str =
    "https://setdoc-api-gateway-308638875599.southamerica-east1.run.app";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    /// Timeout of the login probe. All other calls rely on the transport
    /// default. Set via SETDOC_LOGIN_TIMEOUT_SECS. Default: 10.
    pub login_timeout_secs: u64,
    /// TTL for cached account and user listings.
    /// Set via SETDOC_CACHE_TTL_SECS. Default: 30.
    pub cache_ttl_secs: u64,
    /// TTL for cached prompt and permission listings, which change less.
    /// Set via SETDOC_PROMPT_CACHE_TTL_SECS. Default: 60.
    pub prompt_cache_ttl_secs: u64,
}

impl Config {
    pub fn login_timeout(&self) -> Duration {
        Duration::from_secs(self.login_timeout_secs)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn prompt_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.prompt_cache_ttl_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            login_timeout_secs: 10,
            cache_ttl_secs: 30,
            prompt_cache_ttl_secs: 60,
        }
    }
}

/// Reject a malformed base URL before any request is attempted.
pub fn validate_api_url(url: &str) -> anyhow::Result<Url> {
    Url::parse(url).with_context(|| format!("invalid admin API URL: {url}"))
}

pub fn load() -> anyhow::Result<Config> {
    dotenvy::dotenv().ok();

    let defaults = Config::default();
    let api_url = std::env::var("SETDOC_API_URL").unwrap_or(defaults.api_url);
    validate_api_url(&api_url)?;

    Ok(Config {
        api_url,
        login_timeout_secs: std::env::var("SETDOC_LOGIN_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.login_timeout_secs),
        cache_ttl_secs: std::env::var("SETDOC_CACHE_TTL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.cache_ttl_secs),
        prompt_cache_ttl_secs: std::env::var("SETDOC_PROMPT_CACHE_TTL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.prompt_cache_ttl_secs),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_api_url_is_valid() {
        assert!(validate_api_url(DEFAULT_API_URL).is_ok());
    }

    #[test]
    fn garbage_urls_are_rejected() {
        assert!(validate_api_url("not a url").is_err());
    }
}
