//! Compliance API client configuration.
//!
//! Configures the backend base URL and the request timeout. Defaults point
//! to a locally running backend. Override via environment variables or
//! explicit construction for staging/testing.

use url::Url;

/// Backend address used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/api/v1";

/// Request timeout used when nothing else is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for connecting to the compliance-analysis backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplianceApiConfig {
    /// Base URL under which `/analyze` and `/results/{id}` live.
    /// Default: <http://127.0.0.1:8000/api/v1>
    pub base_url: Url,
    /// Per-request timeout in seconds. `0` disables the timeout.
    pub timeout_secs: u64,
}

impl ComplianceApiConfig {
    /// Build a configuration for an explicit base URL.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if `base_url` does not parse or
    /// cannot carry path segments (e.g. `mailto:`).
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url("base_url", base_url)?,
            timeout_secs,
        })
    }

    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `NIS2_API_URL` (default: `http://127.0.0.1:8000/api/v1`)
    /// - `NIS2_TIMEOUT_SECS` (default: 30, `0` = no timeout)
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: Self::base_url_from_env()?,
            timeout_secs: Self::timeout_secs_from_env()?,
        })
    }

    /// The base URL from `NIS2_API_URL`, or [`DEFAULT_API_URL`] if unset.
    pub fn base_url_from_env() -> Result<Url, ConfigError> {
        match std::env::var("NIS2_API_URL") {
            Ok(raw) => parse_base_url("NIS2_API_URL", &raw),
            Err(_) => parse_base_url("base_url", DEFAULT_API_URL),
        }
    }

    /// The timeout from `NIS2_TIMEOUT_SECS`, or [`DEFAULT_TIMEOUT_SECS`] if unset.
    pub fn timeout_secs_from_env() -> Result<u64, ConfigError> {
        match std::env::var("NIS2_TIMEOUT_SECS") {
            Ok(s) => s
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidTimeout(s.clone())),
            Err(_) => Ok(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Create a configuration pointing to a local mock server (for testing).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if the localhost URL cannot be parsed.
    pub fn local_mock(port: u16) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url("localhost", &format!("http://127.0.0.1:{port}"))?,
            timeout_secs: 5,
        })
    }

    /// The timeout to install on the HTTP client, if any.
    pub fn timeout(&self) -> Option<std::time::Duration> {
        (self.timeout_secs > 0).then(|| std::time::Duration::from_secs(self.timeout_secs))
    }
}

fn parse_base_url(source: &str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::InvalidUrl(source.to_string(), e.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidUrl(
            source.to_string(),
            "URL cannot carry path segments".to_string(),
        ));
    }
    Ok(url)
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("NIS2_TIMEOUT_SECS must be a whole number of seconds, got {0:?}")]
    InvalidTimeout(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_backend() {
        let cfg = ComplianceApiConfig::new(DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS).unwrap();
        assert_eq!(cfg.base_url.as_str(), "http://127.0.0.1:8000/api/v1");
        assert_eq!(cfg.timeout_secs, 30);
        assert_eq!(cfg.timeout(), Some(std::time::Duration::from_secs(30)));
    }

    #[test]
    fn local_mock_builds_valid_config() {
        let cfg = ComplianceApiConfig::local_mock(9000).unwrap();
        assert_eq!(cfg.timeout_secs, 5);
        assert_eq!(cfg.base_url.as_str(), "http://127.0.0.1:9000/");
    }

    #[test]
    fn zero_timeout_disables_it() {
        let cfg = ComplianceApiConfig::new("http://localhost:8000/api/v1", 0).unwrap();
        assert_eq!(cfg.timeout(), None);
    }

    #[test]
    fn rejects_invalid_urls() {
        assert!(matches!(
            ComplianceApiConfig::new("not a url", 5),
            Err(ConfigError::InvalidUrl(..))
        ));
        assert!(matches!(
            ComplianceApiConfig::new("mailto:ops@example.com", 5),
            Err(ConfigError::InvalidUrl(..))
        ));
    }
}
