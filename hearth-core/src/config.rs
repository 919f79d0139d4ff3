//! Backend configuration from environment variables.

use std::env;
use std::time::Duration;

use url::Url;

use crate::error::ConfigError;

/// Default backend base URL.
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Backend client configuration.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL all endpoint paths are joined onto.
    pub base_url: Url,
    /// Bearer token sent with every request.
    pub api_token: Option<String>,
    pub timeout: Duration,
}

impl BackendConfig {
    /// Configuration for `base_url` with no token and the default timeout.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            api_token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Optional:
    /// - `HEARTH_API_URL`: Backend base URL (default: "http://localhost:3000")
    /// - `HEARTH_API_TOKEN`: Bearer token
    /// - `HEARTH_HTTP_TIMEOUT_SECS`: Request timeout (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw_url = env::var("HEARTH_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let base_url = parse_base_url("HEARTH_API_URL", &raw_url)?;

        let api_token = env::var("HEARTH_API_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty());

        let timeout = match env::var("HEARTH_HTTP_TIMEOUT_SECS") {
            Ok(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                    var: "HEARTH_HTTP_TIMEOUT_SECS".to_string(),
                    value: raw.clone(),
                })?;
                Duration::from_secs(secs)
            }
            Err(_) => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            base_url,
            api_token,
            timeout,
        })
    }
}

/// Parse a base URL, rejecting anything that cannot carry a path.
pub fn parse_base_url(var: &str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|e| ConfigError::InvalidUrl {
        var: var.to_string(),
        message: e.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidUrl {
            var: var.to_string(),
            message: format!("{} cannot be used as a base URL", raw),
        });
    }
    Ok(url)
}
