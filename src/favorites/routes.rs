use axum::{
  routing::{delete, get},
  Router,
};

use crate::favorites::{handler, service::FavoriteService};

pub fn favorite_routes(service: FavoriteService) -> Router {
  Router::new()
      .route("/favorites", get(handler::get_favorites).post(handler::create_favorite))
      .route("/favorites/:favorite_id", delete(handler::delete_favorite))
      .with_state(service)
}
