pub mod coingecko;
mod config;

pub use config::ClientConfig;

use async_trait::async_trait;
use common::{
    models::{CoinList, HistorySeries, MarketScope, Window},
    Result,
};

/// Read-only access to a market-data provider
#[async_trait]
pub trait MarketDataClient: Send + Sync {
    /// List coins with their current stats, ordered by market cap descending
    async fn list_markets(&self, scope: &MarketScope) -> Result<CoinList>;

    /// Get the price history of one coin over the last `window` days
    async fn get_history(&self, coin_id: &str, window: Window) -> Result<HistorySeries>;
}
