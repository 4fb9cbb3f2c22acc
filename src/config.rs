//! Runtime configuration read from the environment.
//!
//! Values normally come from a `.env` file loaded at startup:
//!
//! | Variable | Required | Meaning |
//! |----------|----------|---------|
//! | `NEWS_API_URL` | yes | Search endpoint, e.g. `https://newsapi.org/v2/everything` |
//! | `NEWS_API_TOKEN` | yes | Sent as the `X-Api-Key` header on every request |
//! | `NEWS_LOG_FILE` | no | Append-only log file, defaults to `app.log` |

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use url::Url;

pub const API_URL_VAR: &str = "NEWS_API_URL";
pub const API_TOKEN_VAR: &str = "NEWS_API_TOKEN";
pub const LOG_FILE_VAR: &str = "NEWS_LOG_FILE";

pub const DEFAULT_LOG_FILE: &str = "app.log";

/// Time between two scheduled ticks.
pub const POLL_INTERVAL: Duration = Duration::from_secs(30 * 60);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    Missing(&'static str),
    #[error("{var} is not a valid URL: {source}")]
    InvalidUrl {
        var: &'static str,
        #[source]
        source: url::ParseError,
    },
}

#[derive(Clone)]
pub struct Config {
    pub api_url: Url,
    pub api_token: String,
    pub log_file: PathBuf,
    pub interval: Duration,
    /// How far back each search looks.
    pub lookback: chrono::Duration,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_url", &self.api_url.as_str())
            .field("api_token", &"<redacted>")
            .field("log_file", &self.log_file)
            .field("interval", &self.interval)
            .field("lookback", &self.lookback)
            .finish()
    }
}

impl Config {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through `lookup`; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let raw_url = get(API_URL_VAR).ok_or(ConfigError::Missing(API_URL_VAR))?;
        let api_url = Url::parse(raw_url.trim()).map_err(|source| ConfigError::InvalidUrl {
            var: API_URL_VAR,
            source,
        })?;
        let api_token = get(API_TOKEN_VAR).ok_or(ConfigError::Missing(API_TOKEN_VAR))?;
        let log_file = get(LOG_FILE_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

        Ok(Self {
            api_url,
            api_token,
            log_file,
            interval: POLL_INTERVAL,
            lookback: chrono::Duration::hours(1),
        })
    }
}
