use crate::Error;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Chart window in days
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Window {
    #[default]
    #[serde(rename = "1")]
    OneDay,
    #[serde(rename = "7")]
    SevenDays,
    #[serde(rename = "30")]
    ThirtyDays,
}

impl Window {
    pub const ALL: [Window; 3] = [Window::OneDay, Window::SevenDays, Window::ThirtyDays];

    pub fn days(self) -> u32 {
        match self {
            Window::OneDay => 1,
            Window::SevenDays => 7,
            Window::ThirtyDays => 30,
        }
    }

    /// Button caption for the window selector
    pub fn label(self) -> &'static str {
        match self {
            Window::OneDay => "1D",
            Window::SevenDays => "7D",
            Window::ThirtyDays => "1M",
        }
    }
}

impl TryFrom<u32> for Window {
    type Error = Error;

    fn try_from(days: u32) -> Result<Self, Self::Error> {
        match days {
            1 => Ok(Window::OneDay),
            7 => Ok(Window::SevenDays),
            30 => Ok(Window::ThirtyDays),
            other => Err(Error::InvalidSelection(format!(
                "Unknown window: {} days. Supported windows: 1, 7, 30",
                other
            ))),
        }
    }
}

impl FromStr for Window {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let days = s.trim().parse::<u32>().map_err(|_| {
            Error::InvalidSelection(format!(
                "Unknown window: {}. Supported windows: 1, 7, 30",
                s
            ))
        })?;
        Window::try_from(days)
    }
}

impl std::fmt::Display for Window {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.days())
    }
}

/// Time-axis unit used to present a series
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Hour,
    Day,
}

/// Price history point
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct HistoryPoint {
    /// Timestamp for this price point
    pub timestamp: DateTime<Utc>,
    /// USD price at this point in time
    pub price: f64,
}

/// Price history for one coin and window, ascending by timestamp
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HistorySeries {
    pub points: Vec<HistoryPoint>,
}

impl HistorySeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
