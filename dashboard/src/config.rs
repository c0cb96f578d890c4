use common::{Error, Result};
use std::time::Duration;

const DEFAULT_REFRESH_SECS: u64 = 30;

/// Configuration for the dashboard core
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Cadence of the market listing poll
    pub refresh_interval: Duration,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            refresh_interval: Duration::from_secs(DEFAULT_REFRESH_SECS),
        }
    }
}

impl DashboardConfig {
    /// Create a dashboard configuration from environment variables
    pub fn from_env() -> Result<Self> {
        match std::env::var("REFRESH_INTERVAL_SECS") {
            Ok(secs) => Ok(Self {
                refresh_interval: parse_interval(&secs)?,
            }),
            Err(_) => Ok(Self::default()),
        }
    }
}

fn parse_interval(secs: &str) -> Result<Duration> {
    match secs.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(Error::ConfigError(format!(
            "REFRESH_INTERVAL_SECS must be a positive number of seconds, got {:?}",
            secs
        ))),
    }
}
