use std::{str::FromStr, sync::Arc};

use mongodb::bson::oid::ObjectId;
use tracing::{debug, info};
use validator::Validate;

use crate::{
    error::AppError,
    favorites::{
        model::{CreateFavoriteRequest, Favorite, FavoriteResponse},
        repository::FavoriteRepository,
    },
};

#[derive(Clone)]
pub struct FavoriteService {
    repository: Arc<dyn FavoriteRepository>,
}

impl FavoriteService {
    pub fn new(repository: Arc<dyn FavoriteRepository>) -> Self {
        Self { repository }
    }

    pub async fn create_favorite(&self, req: CreateFavoriteRequest) -> Result<FavoriteResponse, AppError> {
        // Validate the input
        req.validate().map_err(|e| AppError::ValidationError(e.to_string()))?;

        let favorite = Favorite::from_request(req)
            .ok_or_else(|| AppError::ValidationError("All favorite fields are required".into()))?;

        let created = self.repository.insert(favorite).await?;
        info!("Added favorite {}", created.name);

        Ok(created.into())
    }

    pub async fn list_favorites(&self) -> Result<Vec<FavoriteResponse>, AppError> {
        let favorites = self.repository.find_all().await?;

        Ok(favorites.into_iter().map(FavoriteResponse::from).collect())
    }

    /// Deletes a favorite. Succeeds whether or not a record existed; an id that
    /// is not a valid ObjectId cannot name a record and is treated the same way.
    pub async fn delete_favorite(&self, id: &str) -> Result<(), AppError> {
        let object_id = match ObjectId::from_str(id) {
            Ok(object_id) => object_id,
            Err(_) => {
                debug!("Ignoring delete for malformed favorite id {}", id);
                return Ok(());
            }
        };

        if self.repository.delete(&object_id).await? {
            info!("Removed favorite {}", id);
        } else {
            debug!("No favorite with id {} to remove", id);
        }

        Ok(())
    }
}
