use common::{models::Window, Result};
use connectors::MarketDataClient;
use dashboard::{
    view::{ChartView, DashboardSnapshot, TableView},
    ChartRequest, Dashboard, DashboardConfig, RefreshScheduler, RefreshTask, TickOutcome,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Wires the dashboard core to its refresh schedule and runs chart loads
/// in the background.
pub struct DashboardService {
    /// Canonical snapshot, selection and chart state
    dashboard: Arc<Dashboard>,
    /// Poll timer for the market listing
    scheduler: RefreshScheduler,
    /// Poll cadence
    refresh_interval: Duration,
}

impl DashboardService {
    pub fn new(client: Arc<dyn MarketDataClient>, config: DashboardConfig) -> Self {
        Self {
            dashboard: Arc::new(Dashboard::new(client)),
            scheduler: RefreshScheduler::new(),
            refresh_interval: config.refresh_interval,
        }
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    /// Start (or restart) polling; the first reload happens right away
    pub async fn start(&self) {
        let task: Arc<dyn RefreshTask> = self.dashboard.clone();
        self.scheduler.start(task, self.refresh_interval).await;
    }

    pub async fn stop(&self) {
        self.scheduler.stop().await;
    }

    /// Manual "refresh now"; ignored while another reload is in flight
    pub async fn refresh_now(&self) -> TickOutcome {
        self.scheduler.trigger(self.dashboard.as_ref()).await
    }

    pub async fn set_search(&self, term: String) -> TableView {
        self.dashboard.set_search(term).await;
        self.dashboard.table_view().await
    }

    pub async fn snapshot(&self) -> DashboardSnapshot {
        self.dashboard.snapshot().await
    }

    pub async fn select_coin(&self, coin_id: Option<&str>) -> Result<ChartView> {
        let before = self.dashboard.selection().await;

        if let Some(request) = self.dashboard.select_coin(coin_id).await? {
            self.spawn_chart_load(request);
        }

        // The listing is scoped to the selected coin, so restart polling to
        // fetch the new scope now instead of at the next tick.
        if self.dashboard.selection().await.coin_id() != before.coin_id() {
            info!("Listing scope changed, restarting refresh schedule");
            self.start().await;
        }

        Ok(self.dashboard.chart_view().await)
    }

    pub async fn select_window(&self, window: &str) -> Result<ChartView> {
        let window: Window = window.parse()?;

        if let Some(request) = self.dashboard.select_window(window).await {
            self.spawn_chart_load(request);
        }

        Ok(self.dashboard.chart_view().await)
    }

    fn spawn_chart_load(&self, request: ChartRequest) {
        let dashboard = Arc::clone(&self.dashboard);
        tokio::spawn(async move {
            let key = request.key().clone();
            if !dashboard.load_chart(request).await {
                debug!(
                    "Chart response for {} ({} days) arrived after the selection moved on",
                    key.coin_id,
                    key.window.days()
                );
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use common::{
        chart::to_series,
        models::{CoinList, HistorySeries, MarketScope},
        Error,
    };
    use std::sync::Mutex;
    use tokio::time::sleep;

    fn sample_series() -> HistorySeries {
        to_series(&serde_json::json!({
            "prices": [[1711843200000i64, 100.0], [1711846800000i64, 101.0]]
        }))
        .unwrap()
    }

    #[derive(Default)]
    struct StubClient {
        scopes: Mutex<Vec<MarketScope>>,
    }

    impl StubClient {
        fn scopes(&self) -> Vec<MarketScope> {
            self.scopes.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl MarketDataClient for StubClient {
        async fn list_markets(&self, scope: &MarketScope) -> Result<CoinList> {
            self.scopes.lock().unwrap().push(scope.clone());
            Ok(CoinList::default())
        }

        async fn get_history(&self, _coin_id: &str, _window: Window) -> Result<HistorySeries> {
            Ok(sample_series())
        }
    }

    fn service() -> (Arc<StubClient>, DashboardService) {
        let client = Arc::new(StubClient::default());
        let service = DashboardService::new(client.clone(), DashboardConfig::default());
        (client, service)
    }

    #[tokio::test(start_paused = true)]
    async fn test_coin_selection_rescopes_listing_immediately() {
        let (client, service) = service();

        service.start().await;
        sleep(Duration::from_secs(1)).await;

        service.select_coin(Some("bitcoin")).await.unwrap();
        sleep(Duration::from_secs(1)).await;

        assert_eq!(
            client.scopes(),
            vec![MarketScope::Popular, MarketScope::Ids(vec!["bitcoin".into()])]
        );
        assert!(matches!(
            service.dashboard().chart_view().await,
            ChartView::Ready { .. }
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_window_change_keeps_schedule() {
        let (client, service) = service();

        service.start().await;
        sleep(Duration::from_secs(1)).await;

        let view = service.select_window("7").await.unwrap();
        assert!(matches!(view, ChartView::Empty { .. }));
        sleep(Duration::from_secs(1)).await;

        assert_eq!(client.scopes(), vec![MarketScope::Popular]);
    }

    #[tokio::test]
    async fn test_invalid_window_is_rejected() {
        let (_client, service) = service();
        let err = service.select_window("14").await.unwrap_err();
        assert!(matches!(err, Error::InvalidSelection(_)));
    }

    #[tokio::test]
    async fn test_selection_returns_loading_view() {
        let (_client, service) = service();
        let view = service.select_coin(Some("ethereum")).await.unwrap();
        assert!(matches!(view, ChartView::Loading { .. }));
        service.stop().await;
    }

    #[tokio::test]
    async fn test_manual_refresh() {
        let (client, service) = service();
        assert!(matches!(service.refresh_now().await, TickOutcome::Completed));
        assert_eq!(client.scopes().len(), 1);
    }
}
