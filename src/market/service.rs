use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::{
    error::AppError,
    market::model::{MarketCoin, MarketQuery},
};

/// Read-only source of market rows.
#[async_trait]
pub trait MarketFeed: Send + Sync {
    async fn fetch_markets(&self, query: &MarketQuery) -> Result<Vec<MarketCoin>, AppError>;
}

/// CoinGecko-compatible `/coins/markets` client.
#[derive(Clone)]
pub struct MarketService {
    client: Client,
    base_url: String,
}

impl MarketService {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl MarketFeed for MarketService {
    async fn fetch_markets(&self, query: &MarketQuery) -> Result<Vec<MarketCoin>, AppError> {
        let url = format!("{}/coins/markets", self.base_url);
        debug!("Fetching market data from {}", url);

        let coins = self
            .client
            .get(&url)
            .header("accept", "application/json")
            .query(query)
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<MarketCoin>>()
            .await?;

        Ok(coins)
    }
}
