use common::models::{Coin, CoinList};
use serde::Serialize;

/// Case-insensitive search text matched against coin name and symbol.
/// The empty term matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchTerm {
    raw: String,
    needle: String,
}

impl SearchTerm {
    pub fn new(term: impl Into<String>) -> Self {
        let raw = term.into();
        let needle = raw.to_lowercase();
        Self { raw, needle }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    pub fn matches(&self, coin: &Coin) -> bool {
        self.needle.is_empty()
            || coin.name.to_lowercase().contains(&self.needle)
            || coin.symbol.to_lowercase().contains(&self.needle)
    }
}

/// Coins of one listing that match one search term, in listing order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FilteredView(Vec<Coin>);

impl FilteredView {
    pub fn coins(&self) -> &[Coin] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

pub fn filter(coins: &CoinList, term: &SearchTerm) -> FilteredView {
    if term.is_empty() {
        return FilteredView(coins.coins().to_vec());
    }

    FilteredView(
        coins
            .iter()
            .filter(|coin| term.matches(coin))
            .cloned()
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{coin, coin_list};

    fn ids(view: &FilteredView) -> Vec<&str> {
        view.coins().iter().map(|c| c.id.as_str()).collect()
    }

    fn listing() -> CoinList {
        coin_list(&[
            ("bitcoin", "btc", "Bitcoin"),
            ("ethereum", "eth", "Ethereum"),
            ("ethereum-classic", "etc", "Ethereum Classic"),
            ("tether", "usdt", "Tether"),
            ("dogecoin", "doge", "Dogecoin"),
        ])
    }

    #[test]
    fn test_symbol_match_is_case_insensitive() {
        let list = coin_list(&[("bitcoin", "btc", "Bitcoin"), ("ethereum", "eth", "Ethereum")]);
        let view = filter(&list, &SearchTerm::new("ETH"));
        assert_eq!(view.coins(), &[coin("ethereum", "eth", "Ethereum")]);
    }

    #[test]
    fn test_empty_term_is_identity() {
        let list = listing();
        let view = filter(&list, &SearchTerm::default());
        assert_eq!(view.coins(), list.coins());
    }

    #[test]
    fn test_matches_name_or_symbol_in_listing_order() {
        let view = filter(&listing(), &SearchTerm::new("eth"));
        assert_eq!(ids(&view), ["ethereum", "ethereum-classic", "tether"]);

        let view = filter(&listing(), &SearchTerm::new("coin"));
        assert_eq!(ids(&view), ["bitcoin", "dogecoin"]);

        let view = filter(&listing(), &SearchTerm::new("UsDt"));
        assert_eq!(ids(&view), ["tether"]);
    }

    #[test]
    fn test_no_match_is_empty() {
        let view = filter(&listing(), &SearchTerm::new("solana"));
        assert!(view.is_empty());
    }

    #[test]
    fn test_result_is_an_ordered_subsequence_of_matches() {
        let list = listing();
        for term in ["e", "T", "oge", " ", "classic", "x"] {
            let term = SearchTerm::new(term);
            let view = filter(&list, &term);

            let expected: Vec<&Coin> = list.iter().filter(|c| term.matches(c)).collect();
            let actual: Vec<&Coin> = view.coins().iter().collect();
            assert_eq!(actual, expected, "term {:?}", term.as_str());

            let needle = term.as_str().to_lowercase();
            for c in view.coins() {
                assert!(
                    c.name.to_lowercase().contains(&needle)
                        || c.symbol.to_lowercase().contains(&needle)
                );
            }
        }
    }
}
