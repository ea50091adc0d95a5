use serde::{Deserialize, Serialize};

/// One row of the `/coins/markets` feed. Every numeric field can be `null`
/// upstream for thinly traded or newly listed coins.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MarketCoin {
    pub id: String,
    pub name: String,
    pub current_price: Option<f64>,
    pub market_cap: Option<f64>,
    pub price_change_percentage_24h: Option<f64>,
    pub total_volume: Option<f64>,
    pub circulating_supply: Option<f64>,
    pub high_24h: Option<f64>,
    pub low_24h: Option<f64>,
}

/// Query for one page of coins ordered by market cap.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MarketQuery {
    pub vs_currency: String,
    pub order: String,
    pub per_page: u32,
    pub page: u32,
}

impl Default for MarketQuery {
    // Top 10 by market cap, USD
    fn default() -> Self {
        Self {
            vs_currency: "usd".into(),
            order: "market_cap_desc".into(),
            per_page: 10,
            page: 1,
        }
    }
}

/// Case-insensitive substring match on the coin name.
pub fn filter_by_name<'a>(coins: &'a [MarketCoin], search_term: &str) -> Vec<&'a MarketCoin> {
    let needle = search_term.to_lowercase();
    coins
        .iter()
        .filter(|coin| coin.name.to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coin(id: &str, name: &str) -> MarketCoin {
        MarketCoin {
            id: id.into(),
            name: name.into(),
            current_price: Some(1.0),
            market_cap: Some(1.0),
            price_change_percentage_24h: Some(0.0),
            total_volume: None,
            circulating_supply: None,
            high_24h: None,
            low_24h: None,
        }
    }

    #[test]
    fn filter_matches_substring_case_insensitively() {
        let coins = vec![coin("bitcoin", "Bitcoin"), coin("ethereum", "Ethereum")];

        let filtered = filter_by_name(&coins, "bit");

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "Bitcoin");
        assert_eq!(filter_by_name(&coins, "ETH")[0].name, "Ethereum");
    }

    #[test]
    fn empty_search_keeps_every_coin() {
        let coins = vec![coin("bitcoin", "Bitcoin"), coin("ethereum", "Ethereum")];
        assert_eq!(filter_by_name(&coins, "").len(), 2);
    }

    #[test]
    fn parses_feed_row_with_null_fields() {
        let row = r#"{
            "id": "bitcoin", "symbol": "btc", "name": "Bitcoin",
            "current_price": 50000.5, "market_cap": 900000000000,
            "price_change_percentage_24h": null, "total_volume": 1000,
            "circulating_supply": 19000000, "high_24h": 51000, "low_24h": null
        }"#;

        let coin: MarketCoin = serde_json::from_str(row).unwrap();

        assert_eq!(coin.name, "Bitcoin");
        assert_eq!(coin.price_change_percentage_24h, None);
        assert_eq!(coin.high_24h, Some(51000.0));
    }

    #[test]
    fn null_price_does_not_sink_the_whole_page() {
        let page = r#"[
            {"id": "bitcoin", "name": "Bitcoin", "current_price": 50000, "market_cap": 900000000000,
             "price_change_percentage_24h": 2.5, "total_volume": null, "circulating_supply": null,
             "high_24h": null, "low_24h": null},
            {"id": "newcoin", "name": "Newcoin", "current_price": null, "market_cap": null,
             "price_change_percentage_24h": null, "total_volume": null, "circulating_supply": null,
             "high_24h": null, "low_24h": null}
        ]"#;

        let coins: Vec<MarketCoin> = serde_json::from_str(page).unwrap();

        assert_eq!(coins.len(), 2);
        assert_eq!(coins[0].current_price, Some(50000.0));
        assert_eq!(coins[1].current_price, None);
        assert_eq!(coins[1].market_cap, None);
    }
}
