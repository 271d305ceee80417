use std::env;
use std::num::NonZeroU32;
use std::time::Duration;

use crate::error::{Error, Result};

pub const DEFAULT_METRICS_URL: &str = "https://analytics.planhat.com/dimensiondata";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_RATE_PER_SECOND: NonZeroU32 = match NonZeroU32::new(150) {
    Some(n) => n,
    None => unreachable!(),
};
pub const DEFAULT_BURST: NonZeroU32 = NonZeroU32::MIN;

/// Runtime configuration for a Planhat client.
///
/// Build one with [`Config::new`] and the `with_*` setters, or load it from
/// the environment with [`Config::from_env`].
#[derive(Clone)]
pub struct Config {
    pub api_key: String,
    pub region: String,
    pub tenant_uuid: Option<String>,
    pub base_url: String,
    pub metrics_url: String,
    pub timeout: Duration,
    pub rate_per_second: NonZeroU32,
    pub burst: NonZeroU32,
    pub user_agent: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("region", &self.region)
            .field("tenant_uuid", &self.tenant_uuid)
            .field("base_url", &self.base_url)
            .field("metrics_url", &self.metrics_url)
            .field("timeout", &self.timeout)
            .field("rate_per_second", &self.rate_per_second)
            .field("burst", &self.burst)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// Base URL for a Planhat region. An empty region maps to the bare `api` host.
///
/// ```
/// assert_eq!(planhat::config::base_url_for_region(""), "https://api.planhat.com");
/// assert_eq!(planhat::config::base_url_for_region("eu3"), "https://api-eu3.planhat.com");
/// ```
pub fn base_url_for_region(region: &str) -> String {
    let region = region.trim();
    if region.is_empty() {
        "https://api.planhat.com".to_string()
    } else {
        format!("https://api-{}.planhat.com", region)
    }
}

impl Config {
    pub fn new(api_key: impl Into<String>, region: impl Into<String>) -> Self {
        let region = region.into();
        Self {
            api_key: api_key.into(),
            base_url: base_url_for_region(&region),
            region,
            tenant_uuid: None,
            metrics_url: DEFAULT_METRICS_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            rate_per_second: DEFAULT_RATE_PER_SECOND,
            burst: DEFAULT_BURST,
            user_agent: format!("planhat-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Load configuration from environment.
    ///
    /// Env vars:
    /// - PLANHAT_API_KEY [required]
    /// - PLANHAT_REGION (default: empty, i.e. https://api.planhat.com)
    /// - PLANHAT_TENANT_UUID (only needed for metrics bulk upsert)
    /// - PLANHAT_API_URL (default: derived from region)
    /// - PLANHAT_METRICS_URL (default: https://analytics.planhat.com/dimensiondata)
    /// - PLANHAT_HTTP_TIMEOUT_SECS (default: 10)
    pub fn from_env() -> Result<Self> {
        let api_key = non_empty_var("PLANHAT_API_KEY").ok_or(Error::MissingApiKey)?;
        let region = non_empty_var("PLANHAT_REGION").unwrap_or_default();

        let mut cfg = Config::new(api_key, region);
        cfg.tenant_uuid = non_empty_var("PLANHAT_TENANT_UUID");
        if let Some(url) = non_empty_var("PLANHAT_API_URL") {
            cfg.base_url = url;
        }
        if let Some(url) = non_empty_var("PLANHAT_METRICS_URL") {
            cfg.metrics_url = url;
        }
        if let Some(secs) =
            non_empty_var("PLANHAT_HTTP_TIMEOUT_SECS").and_then(|s| s.parse::<u64>().ok())
        {
            cfg.timeout = Duration::from_secs(secs);
        }
        Ok(cfg)
    }

    pub fn with_tenant_uuid(mut self, tenant_uuid: impl Into<String>) -> Self {
        self.tenant_uuid = Some(tenant_uuid.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_metrics_url(mut self, metrics_url: impl Into<String>) -> Self {
        self.metrics_url = metrics_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_rate_limit(mut self, rate_per_second: NonZeroU32, burst: NonZeroU32) -> Self {
        self.rate_per_second = rate_per_second;
        self.burst = burst;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Checks everything that must hold before a client exists.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(Error::MissingApiKey);
        }
        url::Url::parse(&self.base_url)?;
        url::Url::parse(&self.metrics_url)?;
        Ok(())
    }

    /// The tenant identifier, treating an empty string as absent.
    pub fn tenant(&self) -> Option<&str> {
        self.tenant_uuid.as_deref().filter(|t| !t.is_empty())
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_maps_to_subdomain() {
        assert_eq!(base_url_for_region(""), "https://api.planhat.com");
        assert_eq!(base_url_for_region("eu"), "https://api-eu.planhat.com");
        assert_eq!(base_url_for_region("us2"), "https://api-us2.planhat.com");
    }

    #[test]
    fn defaults() {
        let cfg = Config::new("key", "eu2");
        assert_eq!(cfg.base_url, "https://api-eu2.planhat.com");
        assert_eq!(cfg.metrics_url, DEFAULT_METRICS_URL);
        assert_eq!(cfg.timeout, Duration::from_secs(10));
        assert_eq!(cfg.rate_per_second.get(), 150);
        assert_eq!(cfg.burst.get(), 1);
        assert!(cfg.tenant().is_none());
    }

    #[test]
    fn empty_api_key_rejected() {
        let err = Config::new("  ", "").validate().unwrap_err();
        assert!(matches!(err, Error::MissingApiKey));
    }

    #[test]
    fn bad_base_url_rejected() {
        let err = Config::new("key", "")
            .with_base_url("not a url")
            .validate()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }

    #[test]
    fn empty_tenant_counts_as_missing() {
        let cfg = Config::new("key", "").with_tenant_uuid("");
        assert!(cfg.tenant().is_none());
    }

    #[test]
    fn debug_redacts_key() {
        let cfg = Config::new("secret-key", "");
        assert!(!format!("{:?}", cfg).contains("secret-key"));
    }
}
