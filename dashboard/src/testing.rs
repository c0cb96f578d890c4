//! Test doubles for the dashboard core.

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use common::models::{Coin, CoinList, HistoryPoint, HistorySeries, MarketScope, Window};
use common::{Error, Result};
use connectors::MarketDataClient;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use tokio::sync::oneshot;

pub fn coin(id: &str, symbol: &str, name: &str) -> Coin {
    Coin {
        id: id.to_string(),
        symbol: symbol.to_string(),
        name: name.to_string(),
        image: format!("https://img.example/{}.png", id),
        current_price: 100.0,
        price_change_percentage_24h: Some(1.5),
        market_cap: 1_000_000.0,
    }
}

pub fn coin_list(rows: &[(&str, &str, &str)]) -> CoinList {
    CoinList::new(
        rows.iter()
            .map(|(id, symbol, name)| coin(id, symbol, name))
            .collect(),
    )
    .unwrap()
}

pub fn series(points: &[(i64, f64)]) -> HistorySeries {
    HistorySeries {
        points: points
            .iter()
            .map(|&(ms, price)| HistoryPoint {
                timestamp: Utc.timestamp_millis_opt(ms).unwrap(),
                price,
            })
            .collect(),
    }
}

/// Market-data client whose answers are scripted by the test.
///
/// Listings are served from a queue. History answers are delivered through a
/// oneshot per `(coin, window)`, so a test decides when (and in which order)
/// each response arrives.
#[derive(Default)]
pub struct ScriptedClient {
    markets: Mutex<VecDeque<Result<CoinList>>>,
    history: Mutex<HashMap<(String, Window), oneshot::Receiver<Result<HistorySeries>>>>,
    scopes: Mutex<Vec<MarketScope>>,
    history_calls: Mutex<Vec<(String, Window)>>,
}

impl ScriptedClient {
    pub fn push_markets(&self, response: Result<CoinList>) {
        self.markets.lock().unwrap().push_back(response);
    }

    /// Register a pending history response; send on the returned channel to deliver it.
    pub fn expect_history(
        &self,
        coin_id: &str,
        window: Window,
    ) -> oneshot::Sender<Result<HistorySeries>> {
        let (tx, rx) = oneshot::channel();
        self.history
            .lock()
            .unwrap()
            .insert((coin_id.to_string(), window), rx);
        tx
    }

    pub fn scopes(&self) -> Vec<MarketScope> {
        self.scopes.lock().unwrap().clone()
    }

    pub fn history_calls(&self) -> Vec<(String, Window)> {
        self.history_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MarketDataClient for ScriptedClient {
    async fn list_markets(&self, scope: &MarketScope) -> Result<CoinList> {
        self.scopes.lock().unwrap().push(scope.clone());
        self.markets
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Error::NetworkError("no scripted listing".into())))
    }

    async fn get_history(&self, coin_id: &str, window: Window) -> Result<HistorySeries> {
        self.history_calls
            .lock()
            .unwrap()
            .push((coin_id.to_string(), window));

        let pending = self
            .history
            .lock()
            .unwrap()
            .remove(&(coin_id.to_string(), window));

        match pending {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(Error::NetworkError("response dropped".into()))),
            None => Err(Error::NetworkError(format!(
                "no scripted history for {} / {}",
                coin_id, window
            ))),
        }
    }
}
