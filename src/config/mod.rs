use std::env;
use std::str::FromStr;
use std::time::Duration;

use url::Url;

use crate::utils::constants::{DEFAULT_PRICES_URL, DEFAULT_SLACK_CHANNEL, DEFAULT_SWAP_DELAY_MS};

/// Configuration struct for the application
#[derive(Debug, Clone)]
pub struct Config {
    pub prices_url: String,
    pub prices_timeout: Option<Duration>,
    pub swap_delay: Duration,
    pub log_level: log::LevelFilter,
    pub slack_token: Option<String>,
    pub slack_channel: String,
}

impl Config {
    /// Default values for configuration
    fn defaults() -> Self {
        Self {
            prices_url: DEFAULT_PRICES_URL.to_string(),
            prices_timeout: None,
            swap_delay: Duration::from_millis(DEFAULT_SWAP_DELAY_MS),
            log_level: log::LevelFilter::Info,
            slack_token: None,
            slack_channel: DEFAULT_SLACK_CHANNEL.to_string(),
        }
    }

    /// Load configuration from environment variables
    ///
    /// # Environment Variables:
    /// - `PRICES_URL`: price list endpoint
    /// - `PRICES_TIMEOUT_SECS`: request timeout for the price fetch, none when unset
    /// - `SWAP_DELAY_MS`: simulated swap settlement delay
    /// - `LOG_LEVEL`: `error`, `warn`, `info`, `debug` or `trace`
    /// - `SLACK_OAUTH_TOKEN`: enables Slack notifications
    /// - `SLACK_CHANNEL`: channel for Slack notifications
    ///
    /// Malformed values fall back to the defaults.
    ///
    /// # Returns
    /// Returns `Config` with values from environment variables or defaults
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::defaults();

        Self {
            prices_url: parsed_var::<Url>("PRICES_URL").map_or(defaults.prices_url, String::from),
            prices_timeout: parsed_var::<u64>("PRICES_TIMEOUT_SECS").map(Duration::from_secs),
            swap_delay: parsed_var::<u64>("SWAP_DELAY_MS")
                .map_or(defaults.swap_delay, Duration::from_millis),
            log_level: parsed_var("LOG_LEVEL").unwrap_or(defaults.log_level),
            slack_token: env::var("SLACK_OAUTH_TOKEN").ok().filter(|t| !t.is_empty()),
            slack_channel: env::var("SLACK_CHANNEL").unwrap_or(defaults.slack_channel),
        }
    }

    /// Create a test configuration
    #[cfg(test)]
    #[must_use]
    pub fn test_config() -> Self {
        Self::defaults()
    }
}

/// Reads and parses an environment variable. Unset is silent, malformed is logged.
fn parsed_var<T: FromStr>(name: &str) -> Option<T> {
    let raw = env::var(name).ok()?;
    raw.trim().parse().map_or_else(
        |_| {
            log::warn!("config: ignoring malformed {name}={raw}");
            None
        },
        Some,
    )
}
