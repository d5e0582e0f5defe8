//! Client configuration.
//!
//! Defaults point at the public ViaCEP service with a 30 second timeout.
//! `from_env` lets deployments and tests redirect the client without code
//! changes.

use std::num::ParseIntError;
use std::time::Duration;

use thiserror::Error;

/// Root of the public ViaCEP REST API.
pub const DEFAULT_BASE_URL: &str = "https://viacep.com.br/ws";

/// Timeout applied by the default transport to a whole request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment variable overriding the base URL.
pub const BASE_URL_ENV: &str = "VIACEP_BASE_URL";

/// Environment variable overriding the timeout, in whole seconds.
pub const TIMEOUT_ENV: &str = "VIACEP_TIMEOUT_SECS";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid VIACEP_TIMEOUT_SECS value '{value}': {source}")]
    InvalidTimeout {
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("VIACEP_TIMEOUT_SECS must be greater than zero")]
    ZeroTimeout,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ClientConfig {
    /// Configuration for `base_url` with the default timeout. A trailing `/`
    /// is stripped.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: Some(DEFAULT_TIMEOUT),
        }
    }

    /// Replace the timeout. `None` leaves requests bounded only by the OS.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Build a configuration from `VIACEP_BASE_URL` and `VIACEP_TIMEOUT_SECS`,
    /// falling back to the defaults for unset variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = match lookup(BASE_URL_ENV) {
            Some(url) if !url.trim().is_empty() => Self::new(url.trim()),
            _ => Self::default(),
        };
        if let Some(raw) = lookup(TIMEOUT_ENV) {
            let secs: u64 = raw.trim().parse().map_err(|source| ConfigError::InvalidTimeout {
                value: raw.clone(),
                source,
            })?;
            if secs == 0 {
                return Err(ConfigError::ZeroTimeout);
            }
            config.timeout = Some(Duration::from_secs(secs));
        }
        Ok(config)
    }
}
