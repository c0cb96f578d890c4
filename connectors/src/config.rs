use common::{Error, Result};
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.coingecko.com/api/v3";

/// Settings for the CoinGecko client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the v3 API, without a trailing slash
    pub api_url: String,
    /// Demo API key, sent as `x-cg-demo-api-key` when present
    pub api_key: Option<String>,
    /// Per-request timeout; `None` waits indefinitely
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: None,
            timeout: None,
        }
    }
}

impl ClientConfig {
    /// Create a client configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let api_url = std::env::var("COINGECKO_API_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let api_key = std::env::var("COINGECKO_API_KEY")
            .ok()
            .filter(|key| !key.is_empty());
        let timeout = match std::env::var("REQUEST_TIMEOUT_SECS") {
            Ok(secs) => Some(parse_timeout(&secs)?),
            Err(_) => None,
        };

        Ok(Self {
            api_url,
            api_key,
            timeout,
        })
    }
}

fn parse_timeout(secs: &str) -> Result<Duration> {
    match secs.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(Error::ConfigError(format!(
            "REQUEST_TIMEOUT_SECS must be a positive number of seconds, got {:?}",
            secs
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_no_timeout() {
        let config = ClientConfig::default();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert!(config.timeout.is_none());
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_parse_timeout() {
        assert_eq!(parse_timeout("15").unwrap(), Duration::from_secs(15));
        assert!(matches!(parse_timeout("0"), Err(Error::ConfigError(_))));
        assert!(matches!(parse_timeout("soon"), Err(Error::ConfigError(_))));
    }
}
