use std::{sync::Arc, time::Duration};

use tracing::{error, info, warn};

use crate::{
    dashboard::{
        client::FavoritesApi,
        notification::{Notification, NotificationKind, Notifier},
    },
    favorites::model::{CreateFavoriteRequest, FavoriteResponse},
    market::{
        model::{filter_by_name, MarketCoin, MarketQuery},
        service::MarketFeed,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    Idle,
    AddInFlight,
    RemoveInFlight,
}

/// State behind the dashboard: market rows, the favorites list as last
/// fetched from the service, the search term and the current notification.
pub struct DashboardViewModel {
    favorites_api: Arc<dyn FavoritesApi>,
    market_feed: Arc<dyn MarketFeed>,
    coins: Vec<MarketCoin>,
    favorites: Vec<FavoriteResponse>,
    search_term: String,
    state: SyncState,
    notifier: Notifier,
}

impl DashboardViewModel {
    pub fn new(
        favorites_api: Arc<dyn FavoritesApi>,
        market_feed: Arc<dyn MarketFeed>,
        notification_ttl: Duration,
    ) -> Self {
        Self {
            favorites_api,
            market_feed,
            coins: Vec::new(),
            favorites: Vec::new(),
            search_term: String::new(),
            state: SyncState::Idle,
            notifier: Notifier::new(notification_ttl),
        }
    }

    /// Initial load: one market fetch and one favorites fetch.
    pub async fn load(&mut self) {
        self.load_market().await;
        self.refresh_favorites().await;
    }

    // A feed failure only empties the table
    async fn load_market(&mut self) {
        match self.market_feed.fetch_markets(&MarketQuery::default()).await {
            Ok(coins) => {
                info!("Loaded {} market rows", coins.len());
                self.coins = coins;
            }
            Err(e) => {
                error!("Error fetching market data: {}", e);
                self.coins = Vec::new();
            }
        }
    }

    /// Replaces the list with the service's. On failure the previous list stays.
    pub async fn refresh_favorites(&mut self) {
        match self.favorites_api.list().await {
            Ok(favorites) => self.favorites = favorites,
            Err(e) => error!("Error fetching favorites: {}", e),
        }
    }

    pub async fn add_favorite(&mut self, coin: &MarketCoin) -> Notification {
        if self.is_favorite(&coin.name) {
            warn!("{} is already in favorites", coin.name);
            return self
                .notifier
                .show(NotificationKind::Warning, format!("{} is already in favorites", coin.name));
        }

        self.state = SyncState::AddInFlight;
        let result = self
            .favorites_api
            .create(&CreateFavoriteRequest::from(coin))
            .await;

        let notification = match result {
            Ok(_) => {
                let notification = self
                    .notifier
                    .show(NotificationKind::Success, format!("{} added to favorites", coin.name));
                self.refresh_favorites().await;
                notification
            }
            Err(e) => {
                error!("Error saving favorite: {}", e);
                self.notifier.show(NotificationKind::Error, "Error saving favorite")
            }
        };

        self.state = SyncState::Idle;
        notification
    }

    pub async fn remove_favorite(&mut self, id: &str) -> Notification {
        self.state = SyncState::RemoveInFlight;

        let notification = match self.favorites_api.delete(id).await {
            Ok(()) => {
                let notification = self.notifier.show(NotificationKind::Success, "Favorite removed");
                self.refresh_favorites().await;
                notification
            }
            Err(e) => {
                error!("Error removing favorite: {}", e);
                self.notifier.show(NotificationKind::Error, "Error removing favorite")
            }
        };

        self.state = SyncState::Idle;
        notification
    }

    pub fn is_favorite(&self, name: &str) -> bool {
        self.favorites.iter().any(|f| f.name == name)
    }

    /// Looks a market row up by name, ignoring case.
    pub fn find_coin(&self, name: &str) -> Option<&MarketCoin> {
        self.coins.iter().find(|c| c.name.eq_ignore_ascii_case(name))
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn filtered_coins(&self) -> Vec<&MarketCoin> {
        filter_by_name(&self.coins, &self.search_term)
    }

    pub fn coins(&self) -> &[MarketCoin] {
        &self.coins
    }

    pub fn favorites(&self) -> &[FavoriteResponse] {
        &self.favorites
    }

    pub fn state(&self) -> SyncState {
        self.state
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notifier.current()
    }

    pub fn dismiss_notification(&mut self) {
        self.notifier.dismiss();
    }
}
