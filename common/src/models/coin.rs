use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One row of a market listing snapshot, as returned by the list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Coin {
    /// Unique identifier for the coin (e.g., "bitcoin", "ethereum")
    pub id: String,
    /// Ticker symbol as the provider sends it (e.g., "btc")
    pub symbol: String,
    /// Human-readable name (e.g., "Bitcoin")
    pub name: String,
    /// Logo URL
    pub image: String,
    /// Current price in USD
    pub current_price: f64,
    /// Signed 24h change in percent, omitted by the provider for some coins
    #[serde(default)]
    pub price_change_percentage_24h: Option<f64>,
    /// Market capitalisation in USD
    pub market_cap: f64,
}

/// Ordered listing snapshot. Order is whatever the provider returned
/// (market cap descending); ids are unique.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CoinList(Vec<Coin>);

impl CoinList {
    pub fn new(coins: Vec<Coin>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(coins.len());
        for coin in &coins {
            if !seen.insert(coin.id.as_str()) {
                return Err(Error::DecodeError(format!(
                    "Duplicate coin id in listing: {}",
                    coin.id
                )));
            }
        }
        Ok(Self(coins))
    }

    pub fn coins(&self) -> &[Coin] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Coin> {
        self.0.iter()
    }
}

/// Entry of the static popular-coin table that backs the coin selector
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct PopularCoin {
    pub id: &'static str,
    pub symbol: &'static str,
    pub name: &'static str,
}

impl PopularCoin {
    /// Selector label, e.g. "Bitcoin (BTC)"
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.symbol.to_uppercase())
    }
}

pub const POPULAR_COINS: &[PopularCoin] = &[
    PopularCoin { id: "bitcoin", symbol: "btc", name: "Bitcoin" },
    PopularCoin { id: "ethereum", symbol: "eth", name: "Ethereum" },
    PopularCoin { id: "ripple", symbol: "xrp", name: "Ripple" },
    PopularCoin { id: "cardano", symbol: "ada", name: "Cardano" },
    PopularCoin { id: "dogecoin", symbol: "doge", name: "Dogecoin" },
    PopularCoin { id: "polkadot", symbol: "dot", name: "Polkadot" },
    PopularCoin { id: "litecoin", symbol: "ltc", name: "Litecoin" },
    PopularCoin { id: "binancecoin", symbol: "bnb", name: "Binancecoin" },
];

pub fn popular_coin(id: &str) -> Option<&'static PopularCoin> {
    POPULAR_COINS.iter().find(|coin| coin.id == id)
}

/// Which coins a listing request asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarketScope {
    /// Every coin in the popular-coin table
    Popular,
    /// An explicit set of coin ids
    Ids(Vec<String>),
}

impl MarketScope {
    /// Scope for a listing that follows the selected coin, if any
    pub fn for_selection(coin_id: Option<&str>) -> Self {
        match coin_id {
            Some(id) => MarketScope::Ids(vec![id.to_string()]),
            None => MarketScope::Popular,
        }
    }

    /// Comma-separated value for the `ids` query parameter
    pub fn ids_param(&self) -> String {
        match self {
            MarketScope::Popular => POPULAR_COINS
                .iter()
                .map(|coin| coin.id)
                .collect::<Vec<_>>()
                .join(","),
            MarketScope::Ids(ids) => ids.join(","),
        }
    }
}
