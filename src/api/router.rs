use axum::{
  routing::get,
  http::StatusCode,
  Json, Router,
};
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::{
  cors::{Any, CorsLayer},
  trace::TraceLayer,
};

use crate::favorites::{routes::favorite_routes, service::FavoriteService};

pub fn create_router(favorite_service: FavoriteService) -> Router {
  // Setup CORS
  let cors = CorsLayer::new()
      .allow_origin(Any)
      .allow_methods(Any)
      .allow_headers(Any);

  // Setup routes
  let api_routes = Router::new()
      .route("/health", get(health_check))
      .merge(favorite_routes(favorite_service));

  // Build the router
  Router::new()
      .nest("/api", api_routes)
      .layer(
          ServiceBuilder::new()
              .layer(TraceLayer::new_for_http())
              .layer(cors),
      )
}

async fn health_check() -> (StatusCode, Json<serde_json::Value>) {
  (
      StatusCode::OK,
      Json(json!({
          "status": "success",
          "message": "Server is running"
      })),
  )
}
