use axum::{
  extract::{rejection::JsonRejection, Path, State},
  http::StatusCode,
  Json,
};

use crate::{
  error::{ApiError, AppError},
  favorites::{
      model::{CreateFavoriteRequest, FavoriteResponse},
      service::FavoriteService,
  },
};

// Add a coin snapshot to favorites
pub async fn create_favorite(
  State(service): State<FavoriteService>,
  payload: Result<Json<CreateFavoriteRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<FavoriteResponse>), ApiError> {
  const MESSAGE: &str = "Error saving favorite";

  // Malformed or wrongly-typed bodies are validation failures too
  let Json(req) = payload
      .map_err(|rejection| ApiError::new(MESSAGE, AppError::ValidationError(rejection.body_text())))?;

  let favorite = service
      .create_favorite(req)
      .await
      .map_err(|e| ApiError::new(MESSAGE, e))?;

  Ok((StatusCode::CREATED, Json(favorite)))
}

// List every stored favorite
pub async fn get_favorites(
  State(service): State<FavoriteService>,
) -> Result<Json<Vec<FavoriteResponse>>, ApiError> {
  let favorites = service
      .list_favorites()
      .await
      .map_err(|e| ApiError::new("Error fetching favorites", e))?;

  Ok(Json(favorites))
}

// Remove a favorite by id
pub async fn delete_favorite(
  State(service): State<FavoriteService>,
  Path(favorite_id): Path<String>,
) -> Result<StatusCode, ApiError> {
  service
      .delete_favorite(&favorite_id)
      .await
      .map_err(|e| ApiError::new("Error deleting favorite", e))?;

  Ok(StatusCode::NO_CONTENT)
}
