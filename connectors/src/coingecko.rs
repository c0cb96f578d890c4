use crate::{ClientConfig, MarketDataClient};
use async_trait::async_trait;
use common::{
    chart,
    models::{Coin, CoinList, HistorySeries, MarketScope, Window},
    Error, Result,
};
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::{debug, error};

const VS_CURRENCY: &str = "usd";
const ORDER: &str = "market_cap_desc";
const PAGE_SIZE: u32 = 20;
const PAGE: u32 = 1;

pub struct CoinGeckoClient {
    client: reqwest::Client,
    api_url: String,
}

impl CoinGeckoClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(key) = &config.api_key {
            let value = HeaderValue::from_str(key)
                .map_err(|e| Error::ConfigError(format!("Invalid API key: {}", e)))?;
            headers.insert("x-cg-demo-api-key", value);
        }

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| Error::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
        })
    }

    fn markets_url(&self) -> String {
        format!("{}/coins/markets", self.api_url)
    }

    fn market_chart_url(&self, coin_id: &str) -> String {
        format!("{}/coins/{}/market_chart", self.api_url, coin_id)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response> {
        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            error!("CoinGecko API error: {} - {}", status, error_text);
            return Err(Error::NetworkError(format!(
                "CoinGecko API error: {} - {}",
                status, error_text
            )));
        }

        Ok(response)
    }
}

fn markets_query(scope: &MarketScope) -> Vec<(&'static str, String)> {
    vec![
        ("vs_currency", VS_CURRENCY.to_string()),
        ("ids", scope.ids_param()),
        ("order", ORDER.to_string()),
        ("per_page", PAGE_SIZE.to_string()),
        ("page", PAGE.to_string()),
        ("sparkline", "false".to_string()),
    ]
}

fn market_chart_query(window: Window) -> Vec<(&'static str, String)> {
    vec![
        ("vs_currency", VS_CURRENCY.to_string()),
        ("days", window.days().to_string()),
    ]
}

#[async_trait]
impl MarketDataClient for CoinGeckoClient {
    async fn list_markets(&self, scope: &MarketScope) -> Result<CoinList> {
        let url = self.markets_url();
        let params = markets_query(scope);

        debug!("Fetching markets from CoinGecko: {} {:?}", url, params);

        let response = self.send(self.client.get(&url).query(&params)).await?;

        let coins: Vec<Coin> = response.json().await.map_err(|e| {
            Error::DecodeError(format!("Failed to parse CoinGecko markets: {}", e))
        })?;

        debug!("Received {} coins from CoinGecko", coins.len());

        CoinList::new(coins)
    }

    async fn get_history(&self, coin_id: &str, window: Window) -> Result<HistorySeries> {
        let url = self.market_chart_url(coin_id);

        debug!(
            "Fetching market chart from CoinGecko: {} (window: {} days)",
            url,
            window.days()
        );

        let response = self
            .send(self.client.get(&url).query(&market_chart_query(window)))
            .await?;

        let raw: serde_json::Value = response.json().await.map_err(|e| {
            Error::DecodeError(format!("Failed to parse CoinGecko market chart: {}", e))
        })?;

        chart::to_series(&raw)
    }
}
