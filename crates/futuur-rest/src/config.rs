//! Client configuration.

use std::time::Duration;

/// Futuur API origin.
pub const BASE_URL: &str = "https://api.futuur.com/api/v1";

/// Default request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Environment variable overriding the request timeout (milliseconds).
pub const TIMEOUT_ENV: &str = "FUTUUR_TIMEOUT_MS";

/// Environment variable overriding the base URL.
pub const BASE_URL_ENV: &str = "FUTUUR_BASE_URL";

/// Per-client settings. Each client owns its copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API origin all paths are appended to.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }
}

impl ClientConfig {
    /// Default configuration with a custom timeout.
    ///
    /// A zero timeout falls back to the default.
    pub fn with_timeout_ms(timeout_ms: u64) -> Self {
        let timeout_ms = if timeout_ms == 0 {
            DEFAULT_TIMEOUT_MS
        } else {
            timeout_ms
        };

        Self {
            timeout: Duration::from_millis(timeout_ms),
            ..Self::default()
        }
    }

    /// Load configuration from `FUTUUR_TIMEOUT_MS` and `FUTUUR_BASE_URL`.
    ///
    /// Unset or invalid values keep their defaults.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let timeout_ms = match std::env::var(TIMEOUT_ENV) {
            Ok(raw) => raw.trim().parse::<u64>().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "Ignoring invalid FUTUUR_TIMEOUT_MS");
                DEFAULT_TIMEOUT_MS
            }),
            Err(_) => DEFAULT_TIMEOUT_MS,
        };

        let mut config = Self::with_timeout_ms(timeout_ms);

        if let Some(url) = std::env::var(BASE_URL_ENV)
            .ok()
            .filter(|u| !u.trim().is_empty())
        {
            config.base_url = url;
        }

        config
    }
}
