use common::models::{popular_coin, MarketScope, Window};
use common::{Error, Result};
use serde::Serialize;

/// The user's chart choice. Only user actions change it; refreshes never do.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Selection {
    coin_id: Option<String>,
    window: Window,
}

/// Identity of one chart request
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ChartKey {
    pub coin_id: String,
    pub window: Window,
}

impl Selection {
    pub fn coin_id(&self) -> Option<&str> {
        self.coin_id.as_deref()
    }

    pub fn window(&self) -> Window {
        self.window
    }

    /// Select a coin from the popular table; `None` or `""` clears it.
    /// Returns whether the selection changed.
    pub fn select_coin(&mut self, coin_id: Option<&str>) -> Result<bool> {
        let coin_id = match coin_id.map(str::trim) {
            None | Some("") => None,
            Some(id) => {
                let coin = popular_coin(id)
                    .ok_or_else(|| Error::NotFound(format!("Coin with ID '{}' not found", id)))?;
                Some(coin.id.to_string())
            }
        };

        if self.coin_id == coin_id {
            return Ok(false);
        }
        self.coin_id = coin_id;
        Ok(true)
    }

    /// Returns whether the selection changed
    pub fn select_window(&mut self, window: Window) -> bool {
        if self.window == window {
            return false;
        }
        self.window = window;
        true
    }

    /// Key of the chart this selection asks for; `None` when no coin is selected
    pub fn chart_key(&self) -> Option<ChartKey> {
        self.coin_id.as_ref().map(|coin_id| ChartKey {
            coin_id: coin_id.clone(),
            window: self.window,
        })
    }

    /// Scope of the market listing that goes with this selection
    pub fn market_scope(&self) -> MarketScope {
        MarketScope::for_selection(self.coin_id())
    }
}
