//! Configuration types.

use std::time::Duration;

use secrecy::SecretString;

use crate::error::ConfigurationError;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the remote agent platform.
#[derive(Debug, Clone)]
pub struct PlatformConfig {
    /// Base URL of the platform API, without a trailing slash.
    pub base_url: String,
    pub api_key: SecretString,
    /// Transport timeout per request. This is the only timeout in the
    /// subsystem; the orchestrator itself has none.
    pub request_timeout: Duration,
}

impl PlatformConfig {
    pub fn new(base_url: impl Into<String>, api_key: SecretString) -> Self {
        Self {
            base_url: base_url.into(),
            api_key,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Read settings from the environment:
    /// `CALLSMITH_PLATFORM_URL`, `CALLSMITH_PLATFORM_API_KEY` (required),
    /// `CALLSMITH_PLATFORM_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ConfigurationError> {
        let base_url = std::env::var("CALLSMITH_PLATFORM_URL")
            .unwrap_or_else(|_| "https://api.agent-platform.example.com".to_string());

        let api_key = std::env::var("CALLSMITH_PLATFORM_API_KEY").map_err(|_| {
            ConfigurationError::MissingEnvVar("CALLSMITH_PLATFORM_API_KEY".to_string())
        })?;

        let request_timeout = match std::env::var("CALLSMITH_PLATFORM_TIMEOUT_SECS") {
            Ok(raw) => {
                let secs: u64 = raw.parse().map_err(|_| ConfigurationError::InvalidValue {
                    key: "CALLSMITH_PLATFORM_TIMEOUT_SECS".to_string(),
                    message: format!("expected an integer number of seconds, got {raw:?}"),
                })?;
                Duration::from_secs(secs)
            }
            Err(_) => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: SecretString::from(api_key),
            request_timeout,
        })
    }
}
