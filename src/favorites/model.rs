use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::market::model::MarketCoin;

// Favorite document stored in MongoDB
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Favorite {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub price: f64,
    #[serde(rename = "marketCap")]
    pub market_cap: f64,
    #[serde(rename = "change24h")]
    pub change_24h: f64,
}

// Create request; every field is optional at the type level so a missing one
// surfaces as a validation error instead of a body rejection
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CreateFavoriteRequest {
    #[validate(required, length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    #[validate(required)]
    pub price: Option<f64>,
    #[validate(required)]
    #[serde(rename = "marketCap")]
    pub market_cap: Option<f64>,
    #[validate(required)]
    #[serde(rename = "change24h")]
    pub change_24h: Option<f64>,
}

// Favorite sent over the wire
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FavoriteResponse {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub price: f64,
    #[serde(rename = "marketCap")]
    pub market_cap: f64,
    #[serde(rename = "change24h")]
    pub change_24h: f64,
}

impl Favorite {
    /// Builds an unsaved favorite from a request that already passed validation.
    pub fn from_request(req: CreateFavoriteRequest) -> Option<Self> {
        Some(Self {
            id: None,
            name: req.name?,
            price: req.price?,
            market_cap: req.market_cap?,
            change_24h: req.change_24h?,
        })
    }
}

impl From<Favorite> for FavoriteResponse {
    fn from(favorite: Favorite) -> Self {
        Self {
            id: favorite.id.map_or_else(|| "unknown".to_string(), |id| id.to_hex()),
            name: favorite.name,
            price: favorite.price,
            market_cap: favorite.market_cap,
            change_24h: favorite.change_24h,
        }
    }
}

// Snapshot of a market row at the moment it is favorited
impl From<&MarketCoin> for CreateFavoriteRequest {
    fn from(coin: &MarketCoin) -> Self {
        Self {
            name: Some(coin.name.clone()),
            price: coin.current_price,
            market_cap: coin.market_cap,
            change_24h: coin.price_change_percentage_24h,
        }
    }
}
