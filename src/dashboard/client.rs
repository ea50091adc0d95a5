use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use tracing::debug;

use crate::{
    error::{AppError, ErrorBody},
    favorites::model::{CreateFavoriteRequest, FavoriteResponse},
};

/// The favorites service as seen from the dashboard.
#[async_trait]
pub trait FavoritesApi: Send + Sync {
    async fn list(&self) -> Result<Vec<FavoriteResponse>, AppError>;
    async fn create(&self, req: &CreateFavoriteRequest) -> Result<FavoriteResponse, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[derive(Clone)]
pub struct FavoritesClient {
    client: Client,
    base_url: String,
}

impl FavoritesClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn favorites_url(&self) -> String {
        format!("{}/api/favorites", self.base_url)
    }

    // The id goes in as one percent-encoded path segment, so `/`, `?` and `#`
    // cannot change which route or record is addressed
    fn favorite_url(&self, id: &str) -> Result<Url, AppError> {
        let mut url = Url::parse(&self.favorites_url())
            .map_err(|e| AppError::ConfigError(format!("Invalid favorites API URL: {}", e)))?;

        url.path_segments_mut()
            .map_err(|_| AppError::ConfigError("Favorites API URL cannot take a path".into()))?
            .push(id);

        Ok(url)
    }
}

// Turns a non-success response into the matching error kind
async fn check_status(response: Response) -> Result<Response, AppError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let detail = match serde_json::from_str::<ErrorBody>(&text) {
        Ok(body) => format!("{}: {}", body.message, body.error),
        Err(_) if text.is_empty() => status.to_string(),
        Err(_) => text,
    };

    Err(AppError::from_status(status, detail))
}

#[async_trait]
impl FavoritesApi for FavoritesClient {
    async fn list(&self) -> Result<Vec<FavoriteResponse>, AppError> {
        let response = self.client.get(self.favorites_url()).send().await?;
        let favorites = check_status(response).await?.json().await?;
        Ok(favorites)
    }

    async fn create(&self, req: &CreateFavoriteRequest) -> Result<FavoriteResponse, AppError> {
        let response = self.client.post(self.favorites_url()).json(req).send().await?;
        let favorite = check_status(response).await?.json().await?;
        Ok(favorite)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        // An empty id names no record; deleting it is already done
        if id.is_empty() {
            debug!("Skipping delete for empty favorite id");
            return Ok(());
        }

        let url = self.favorite_url(id)?;
        let response = self.client.delete(url).send().await?;

        check_status(response).await?;
        Ok(())
    }
}
