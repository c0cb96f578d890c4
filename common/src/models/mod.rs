pub mod coin;
pub mod price;

pub use coin::{popular_coin, Coin, CoinList, MarketScope, PopularCoin, POPULAR_COINS};
pub use price::{Granularity, HistoryPoint, HistorySeries, Window};
