use crate::filter::{filter, FilteredView, SearchTerm};
use crate::scheduler::RefreshTask;
use crate::selection::{ChartKey, Selection};
use crate::view::{ChartView, DashboardSnapshot, TableView};
use async_trait::async_trait;
use common::{
    models::{CoinList, HistorySeries, Window},
    Result,
};
use connectors::MarketDataClient;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// State of the chart region for the active selection
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ChartState {
    /// No coin selected
    #[default]
    Empty,
    Loading {
        key: ChartKey,
    },
    Ready {
        key: ChartKey,
        series: HistorySeries,
    },
    Failed {
        key: ChartKey,
        message: String,
    },
}

/// A history fetch tagged with the selection generation it was issued for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartRequest {
    generation: u64,
    key: ChartKey,
}

impl ChartRequest {
    pub fn key(&self) -> &ChartKey {
        &self.key
    }
}

#[derive(Debug, Default)]
struct TableStatus {
    loading: bool,
    error: Option<String>,
}

#[derive(Debug, Default)]
struct DashboardState {
    coins: CoinList,
    search: SearchTerm,
    table: TableStatus,
    selection: Selection,
    chart: ChartState,
    /// Bumped on every effective selection change
    generation: u64,
}

impl DashboardState {
    fn invalidate_chart(&mut self) -> Option<ChartRequest> {
        self.generation += 1;

        match self.selection.chart_key() {
            Some(key) => {
                self.chart = ChartState::Loading { key: key.clone() };
                Some(ChartRequest {
                    generation: self.generation,
                    key,
                })
            }
            None => {
                self.chart = ChartState::Empty;
                None
            }
        }
    }

    fn filtered(&self) -> FilteredView {
        filter(&self.coins, &self.search)
    }

    fn table_view(&self) -> TableView {
        TableView::build(
            self.table.loading,
            self.table.error.as_deref(),
            &self.filtered(),
        )
    }
}

/// Owns the market snapshot, the search term, the selection and the chart
/// region, and keeps them consistent across refreshes and user actions.
pub struct Dashboard {
    client: Arc<dyn MarketDataClient>,
    state: RwLock<DashboardState>,
}

impl Dashboard {
    pub fn new(client: Arc<dyn MarketDataClient>) -> Self {
        Self {
            client,
            state: RwLock::new(DashboardState::default()),
        }
    }

    /// Fetch the listing for the current scope and replace the snapshot.
    ///
    /// On failure the previous snapshot is kept and the table region shows
    /// the error until the next successful fetch.
    pub async fn reload_markets(&self) -> Result<()> {
        let scope = {
            let mut state = self.state.write().await;
            state.table.loading = true;
            state.table.error = None;
            state.selection.market_scope()
        };

        debug!("Reloading market listing for ids={}", scope.ids_param());

        let result = self.client.list_markets(&scope).await;

        let mut state = self.state.write().await;
        state.table.loading = false;

        match result {
            Ok(coins) => {
                info!("Market listing refreshed: {} coins", coins.len());
                state.coins = coins;
                Ok(())
            }
            Err(e) => {
                state.table.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub async fn set_search(&self, term: impl Into<String>) {
        self.state.write().await.search = SearchTerm::new(term);
    }

    pub async fn search_term(&self) -> String {
        self.state.read().await.search.as_str().to_string()
    }

    pub async fn coins(&self) -> CoinList {
        self.state.read().await.coins.clone()
    }

    /// Current listing filtered by the current search term
    pub async fn filtered(&self) -> FilteredView {
        self.state.read().await.filtered()
    }

    pub async fn selection(&self) -> Selection {
        self.state.read().await.selection.clone()
    }

    pub async fn chart_state(&self) -> ChartState {
        self.state.read().await.chart.clone()
    }

    /// Change the selected coin. Returns the history request to run, if any.
    pub async fn select_coin(&self, coin_id: Option<&str>) -> Result<Option<ChartRequest>> {
        let mut state = self.state.write().await;

        if !state.selection.select_coin(coin_id)? {
            return Ok(None);
        }

        debug!("Selected coin: {:?}", state.selection.coin_id());
        Ok(state.invalidate_chart())
    }

    /// Change the chart window. Returns the history request to run, if any.
    pub async fn select_window(&self, window: Window) -> Option<ChartRequest> {
        let mut state = self.state.write().await;

        if !state.selection.select_window(window) {
            return None;
        }

        debug!("Selected window: {} days", window.days());
        state.invalidate_chart()
    }

    /// Run a history request and apply its result if it is still current.
    /// Returns whether the result was applied.
    pub async fn load_chart(&self, request: ChartRequest) -> bool {
        debug!(
            "Loading chart for {} ({} days)",
            request.key.coin_id,
            request.key.window.days()
        );

        let result = self
            .client
            .get_history(&request.key.coin_id, request.key.window)
            .await;

        self.apply_history(&request, result).await
    }

    /// Apply a history result to the chart region unless a newer selection
    /// has superseded the request.
    pub async fn apply_history(
        &self,
        request: &ChartRequest,
        result: Result<HistorySeries>,
    ) -> bool {
        let mut state = self.state.write().await;

        if request.generation != state.generation {
            debug!(
                "Dropping stale chart response for {} ({} days)",
                request.key.coin_id,
                request.key.window.days()
            );
            return false;
        }

        let key = request.key.clone();
        state.chart = match result {
            Ok(series) => {
                debug!("Chart ready for {}: {} points", key.coin_id, series.len());
                ChartState::Ready { key, series }
            }
            Err(e) => {
                warn!("Failed to load chart for {}: {}", key.coin_id, e);
                ChartState::Failed {
                    key,
                    message: e.to_string(),
                }
            }
        };
        true
    }

    pub async fn table_view(&self) -> TableView {
        self.state.read().await.table_view()
    }

    pub async fn chart_view(&self) -> ChartView {
        ChartView::build(&self.state.read().await.chart)
    }

    pub async fn snapshot(&self) -> DashboardSnapshot {
        let state = self.state.read().await;

        DashboardSnapshot::new(
            state.search.as_str(),
            &state.selection,
            state.table_view(),
            ChartView::build(&state.chart),
        )
    }
}

#[async_trait]
impl RefreshTask for Dashboard {
    async fn refresh(&self) -> Result<()> {
        self.reload_markets().await
    }
}
