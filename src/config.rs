//! Client configuration.
//!
//! The base URL of the dataset server is supplied at startup through the
//! environment and used verbatim as the prefix of every request.

use std::time::Duration;

use thiserror::Error;

/// Environment variable holding the dataset server's base URL.
pub const BASE_URL_ENV: &str = "EXPLORER_API_URL";
/// Environment variable selecting the [`FailurePolicy`].
pub const FAILURE_POLICY_ENV: &str = "EXPLORER_FAILURE_POLICY";
/// Environment variable holding the connect timeout in seconds.
pub const CONNECT_TIMEOUT_ENV: &str = "EXPLORER_CONNECT_TIMEOUT_SECS";

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("EXPLORER_API_URL is not set")]
    MissingBaseUrl,

    #[error("{name} has an invalid value '{value}': {reason}")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// What a client operation does when the transport fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Log the failure and return an empty result.
    #[default]
    Soft,
    /// Log the failure and return it to the caller.
    Strict,
}

impl std::str::FromStr for FailurePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "soft" => Ok(FailurePolicy::Soft),
            "strict" => Ok(FailurePolicy::Strict),
            _ => Err(ConfigError::InvalidValue {
                name: FAILURE_POLICY_ENV,
                value: s.to_string(),
                reason: "expected 'soft' or 'strict'".to_string(),
            }),
        }
    }
}

/// Configuration for a [`crate::client::DatasetClient`].
///
/// # Example
///
/// ```ignore
/// use explorer::config::{ExplorerConfig, FailurePolicy};
///
/// let config = ExplorerConfig::new("http://127.0.0.1:31415")
///     .with_failure_policy(FailurePolicy::Strict);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ExplorerConfig {
    /// Base URL every endpoint path is appended to
    pub base_url: String,
    /// Behaviour on transport failure
    pub failure_policy: FailurePolicy,
    /// Connect timeout for the HTTP client; streams themselves have no deadline
    pub connect_timeout: Option<Duration>,
}

impl ExplorerConfig {
    /// Create a configuration for the given base URL.
    ///
    /// A single trailing `/` is dropped so that endpoint paths can be joined
    /// with one separator.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            failure_policy: FailurePolicy::default(),
            connect_timeout: None,
        }
    }

    /// Build a configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(BASE_URL_ENV)
            .filter(|value| !value.trim().is_empty())
            .ok_or(ConfigError::MissingBaseUrl)?;

        let mut config = Self::new(base_url.trim());

        if let Some(policy) = lookup(FAILURE_POLICY_ENV) {
            config.failure_policy = policy.parse()?;
        }

        if let Some(raw) = lookup(CONNECT_TIMEOUT_ENV) {
            let secs: u64 = raw
                .trim()
                .parse()
                .map_err(|e: std::num::ParseIntError| ConfigError::InvalidValue {
                    name: CONNECT_TIMEOUT_ENV,
                    value: raw.clone(),
                    reason: e.to_string(),
                })?;
            config.connect_timeout = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }

    /// Set the failure policy.
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// Set the connect timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Join an endpoint path onto the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Join an endpoint path and an instance id onto the base URL.
    ///
    /// The instance id is percent-encoded as a single path segment.
    pub fn instance_url(&self, path: &str, instance_id: &str) -> String {
        format!(
            "{}/{}",
            self.url(path).trim_end_matches('/'),
            urlencoding::encode(instance_id)
        )
    }
}
