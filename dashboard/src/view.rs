//! Render models for the table and chart regions.
//!
//! Everything here is derived on read; nothing is stored.

use crate::dashboard::ChartState;
use crate::filter::FilteredView;
use crate::selection::Selection;
use common::{
    chart::granularity,
    models::{Coin, Granularity, Window, POPULAR_COINS},
};
use num_format::{Locale, ToFormattedString};
use serde::Serialize;

pub const NO_DATA_MESSAGE: &str = "No data found";
pub const SELECT_COIN_PROMPT: &str = "Select a coin to see price trends chart.";
pub const CHART_ERROR_MESSAGE: &str = "Failed to load chart data";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
}

/// One table row, formatted for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoinRow {
    pub id: String,
    pub name: String,
    /// Upper-cased ticker
    pub symbol: String,
    pub image: String,
    pub price: String,
    pub change_24h: Option<String>,
    pub trend: Option<Trend>,
    pub market_cap: String,
}

impl From<&Coin> for CoinRow {
    fn from(coin: &Coin) -> Self {
        let change = coin.price_change_percentage_24h;

        Self {
            id: coin.id.clone(),
            name: coin.name.clone(),
            symbol: coin.symbol.to_uppercase(),
            image: coin.image.clone(),
            price: format_usd(coin.current_price),
            change_24h: change.map(format_percent),
            trend: change.map(|c| if c < 0.0 { Trend::Down } else { Trend::Up }),
            market_cap: format_usd(coin.market_cap),
        }
    }
}

/// What the table region shows
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TableView {
    Loading,
    Failed { message: String },
    NoData { message: &'static str },
    Ready { rows: Vec<CoinRow> },
}

impl TableView {
    pub fn build(loading: bool, error: Option<&str>, filtered: &FilteredView) -> Self {
        if loading {
            return TableView::Loading;
        }
        if let Some(message) = error {
            return TableView::Failed {
                message: message.to_string(),
            };
        }
        if filtered.is_empty() {
            return TableView::NoData {
                message: NO_DATA_MESSAGE,
            };
        }

        TableView::Ready {
            rows: filtered.coins().iter().map(CoinRow::from).collect(),
        }
    }
}

/// Chart point in the `{x, y}` shape plotting libraries take; `x` is epoch millis
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartPoint {
    pub x: i64,
    pub y: f64,
}

/// What the chart region shows
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ChartView {
    Empty {
        prompt: &'static str,
    },
    Loading {
        coin_id: String,
        window: Window,
    },
    Ready {
        title: String,
        label: String,
        window: Window,
        granularity: Granularity,
        points: Vec<ChartPoint>,
    },
    Failed {
        coin_id: String,
        window: Window,
        message: &'static str,
        detail: String,
    },
}

impl ChartView {
    pub fn build(state: &ChartState) -> Self {
        match state {
            ChartState::Empty => ChartView::Empty {
                prompt: SELECT_COIN_PROMPT,
            },
            ChartState::Loading { key } => ChartView::Loading {
                coin_id: key.coin_id.clone(),
                window: key.window,
            },
            ChartState::Ready { key, series } => {
                let coin = key.coin_id.to_uppercase();
                ChartView::Ready {
                    title: format!("{} Price Chart", coin),
                    label: format!("{} Price (USD)", coin),
                    window: key.window,
                    granularity: granularity(key.window),
                    points: series
                        .points
                        .iter()
                        .map(|p| ChartPoint {
                            x: p.timestamp.timestamp_millis(),
                            y: p.price,
                        })
                        .collect(),
                }
            }
            ChartState::Failed { key, message } => ChartView::Failed {
                coin_id: key.coin_id.clone(),
                window: key.window,
                message: CHART_ERROR_MESSAGE,
                detail: message.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoinOption {
    pub id: &'static str,
    pub label: String,
    pub selected: bool,
}

/// Coin selector entries, in popular-table order
pub fn coin_options(selected: Option<&str>) -> Vec<CoinOption> {
    POPULAR_COINS
        .iter()
        .map(|coin| CoinOption {
            id: coin.id,
            label: coin.label(),
            selected: selected == Some(coin.id),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowOption {
    pub window: Window,
    pub label: &'static str,
    pub active: bool,
}

pub fn window_options(selected: Window) -> Vec<WindowOption> {
    Window::ALL
        .iter()
        .map(|&window| WindowOption {
            window,
            label: window.label(),
            active: window == selected,
        })
        .collect()
}

/// Everything the page needs for one render
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub search: String,
    pub selected_coin: Option<String>,
    pub coins: Vec<CoinOption>,
    pub windows: Vec<WindowOption>,
    pub table: TableView,
    pub chart: ChartView,
}

impl DashboardSnapshot {
    pub fn new(search: &str, selection: &Selection, table: TableView, chart: ChartView) -> Self {
        Self {
            search: search.to_string(),
            selected_coin: selection.coin_id().map(str::to_string),
            coins: coin_options(selection.coin_id()),
            windows: window_options(selection.window()),
            table,
            chart,
        }
    }
}

/// `$1,234.567`: grouped thousands, at most three fraction digits
pub fn format_usd(value: f64) -> String {
    let thousandths = (value.abs() * 1000.0).round() as u64;
    let whole = (thousandths / 1000).to_formatted_string(&Locale::en);
    let fraction = format!("{:03}", thousandths % 1000);
    let fraction = fraction.trim_end_matches('0');
    let sign = if value < 0.0 && thousandths > 0 { "-" } else { "" };

    if fraction.is_empty() {
        format!("{}${}", sign, whole)
    } else {
        format!("{}${}.{}", sign, whole, fraction)
    }
}

pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value)
}
