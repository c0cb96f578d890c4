mod config;
mod dashboard;
mod filter;
mod scheduler;
mod selection;
pub mod view;

#[cfg(test)]
mod testing;

pub use config::DashboardConfig;
pub use dashboard::{ChartRequest, ChartState, Dashboard};
pub use filter::{filter, FilteredView, SearchTerm};
pub use scheduler::{RefreshScheduler, RefreshTask, TickOutcome};
pub use selection::{ChartKey, Selection};
