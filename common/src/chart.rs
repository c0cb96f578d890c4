//! Turns a raw market-chart response into a plotting-ready series.
//!
//! The provider answers the history endpoint with an object whose `prices`
//! member is an array of `[timestamp_ms, price]` pairs:
//!
//! ```text
//! {
//!   "prices": [[1711843200000, 69702.31], [1711846800000, 69811.05], ...],
//!   "market_caps": [...],
//!   "total_volumes": [...]
//! }
//! ```
//!
//! Only `prices` is used. Pair order is kept as-is.

use crate::models::{Granularity, HistoryPoint, HistorySeries, Window};
use crate::{Error, Result};
use chrono::{TimeZone, Utc};
use serde_json::Value;

pub fn to_series(raw: &Value) -> Result<HistorySeries> {
    let prices = match raw.get("prices") {
        Some(Value::Array(prices)) => prices,
        Some(other) => {
            return Err(Error::DecodeError(format!(
                "Expected `prices` to be an array, got {}",
                kind(other)
            )))
        }
        None => {
            // Error payloads look like {"error": "coin not found"}
            let detail = raw
                .get("error")
                .and_then(Value::as_str)
                .map(|e| format!(": {}", e))
                .unwrap_or_default();
            return Err(Error::DecodeError(format!(
                "Missing `prices` in history response{}",
                detail
            )));
        }
    };

    let mut points = Vec::with_capacity(prices.len());

    for (index, pair) in prices.iter().enumerate() {
        let pair = match pair.as_array() {
            Some(pair) if pair.len() >= 2 => pair,
            _ => {
                return Err(Error::DecodeError(format!(
                    "Entry {} is not a [timestamp, price] pair",
                    index
                )))
            }
        };

        let millis = pair[0]
            .as_i64()
            .or_else(|| pair[0].as_f64().map(|ms| ms as i64))
            .ok_or_else(|| {
                Error::DecodeError(format!("Entry {} has a non-numeric timestamp", index))
            })?;

        let timestamp = Utc.timestamp_millis_opt(millis).single().ok_or_else(|| {
            Error::DecodeError(format!(
                "Entry {} has an out-of-range timestamp: {}",
                index, millis
            ))
        })?;

        let price = pair[1].as_f64().ok_or_else(|| {
            Error::DecodeError(format!("Entry {} has a non-numeric price", index))
        })?;

        points.push(HistoryPoint { timestamp, price });
    }

    Ok(HistorySeries { points })
}

/// Hourly ticks for a one-day window, daily ticks otherwise.
pub fn granularity(window: Window) -> Granularity {
    match window {
        Window::OneDay => Granularity::Hour,
        Window::SevenDays | Window::ThirtyDays => Granularity::Day,
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
