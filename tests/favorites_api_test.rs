use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use mongodb::bson::oid::ObjectId;
use serde_json::{json, Value};
use tower::ServiceExt;

use crypto_favorites::{
    api::router::create_router,
    error::AppError,
    favorites::{
        model::Favorite,
        repository::{FavoriteRepository, InMemoryFavoriteRepository},
        service::FavoriteService,
    },
};

fn app() -> Router {
    let repository = Arc::new(InMemoryFavoriteRepository::new());
    create_router(FavoriteService::new(repository))
}

// Store whose backend is gone; every call fails
struct UnavailableRepository;

#[async_trait]
impl FavoriteRepository for UnavailableRepository {
    async fn insert(&self, _favorite: Favorite) -> Result<Favorite, AppError> {
        Err(AppError::StorageError("connection refused".into()))
    }

    async fn find_all(&self) -> Result<Vec<Favorite>, AppError> {
        Err(AppError::StorageError("connection refused".into()))
    }

    async fn delete(&self, _id: &ObjectId) -> Result<bool, AppError> {
        Err(AppError::StorageError("connection refused".into()))
    }
}

fn unavailable_app() -> Router {
    create_router(FavoriteService::new(Arc::new(UnavailableRepository)))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, value)
}

fn bitcoin() -> Value {
    json!({
        "name": "Bitcoin",
        "price": 50000,
        "marketCap": 900000000000u64,
        "change24h": 2.5
    })
}

#[tokio::test]
async fn create_list_delete_round_trip() {
    let app = app();

    let (status, created) = send(&app, Method::POST, "/api/favorites", Some(bitcoin())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "Bitcoin");
    assert_eq!(created["price"], 50000.0);
    assert_eq!(created["marketCap"], 900000000000.0);
    assert_eq!(created["change24h"], 2.5);
    let id = created["id"].as_str().unwrap().to_string();

    let (status, list) = send(&app, Method::GET, "/api/favorites", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["id"], id.as_str());

    let (status, body) = send(&app, Method::DELETE, &format!("/api/favorites/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (_, list) = send(&app, Method::GET, "/api/favorites", None).await;
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn missing_fields_are_rejected_without_persisting() {
    let app = app();

    for field in ["name", "price", "marketCap", "change24h"] {
        let mut body = bitcoin();
        body.as_object_mut().unwrap().remove(field);

        let (status, error) = send(&app, Method::POST, "/api/favorites", Some(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "missing {}", field);
        assert_eq!(error["message"], "Error saving favorite");
        assert!(error["error"].as_str().unwrap().contains("Validation error"));
    }

    let (_, list) = send(&app, Method::GET, "/api/favorites", None).await;
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn wrongly_typed_field_is_a_validation_error() {
    let app = app();
    let mut body = bitcoin();
    body["price"] = json!("fifty thousand");

    let (status, error) = send(&app, Method::POST, "/api/favorites", Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["message"], "Error saving favorite");
    assert!(error["error"].is_string());
}

#[tokio::test]
async fn duplicate_name_conflicts() {
    let app = app();
    send(&app, Method::POST, "/api/favorites", Some(bitcoin())).await;

    let (status, error) = send(&app, Method::POST, "/api/favorites", Some(bitcoin())).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["message"], "Error saving favorite");

    let (_, list) = send(&app, Method::GET, "/api/favorites", None).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn deleting_unknown_ids_is_a_no_op() {
    let app = app();
    send(&app, Method::POST, "/api/favorites", Some(bitcoin())).await;

    let (status, _) = send(&app, Method::DELETE, "/api/favorites/65f000000000000000000001", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, Method::DELETE, "/api/favorites/not-an-id", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, list) = send(&app, Method::GET, "/api/favorites", None).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn storage_failures_are_server_errors_with_operation_messages() {
    let app = unavailable_app();

    let cases = [
        (Method::GET, "/api/favorites", None, "Error fetching favorites"),
        (Method::POST, "/api/favorites", Some(bitcoin()), "Error saving favorite"),
        (Method::DELETE, "/api/favorites/65f000000000000000000001", None, "Error deleting favorite"),
    ];

    for (method, uri, body, message) in cases {
        let (status, error) = send(&app, method.clone(), uri, body).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{} {}", method, uri);
        assert_eq!(error["message"], message);
        let detail = error["error"].as_str().unwrap();
        assert!(detail.contains("Storage error"), "{} {}: {}", method, uri, detail);
    }
}

#[tokio::test]
async fn invalid_body_is_rejected_before_reaching_a_failing_store() {
    let mut body = bitcoin();
    body.as_object_mut().unwrap().remove("price");

    let (status, error) = send(&unavailable_app(), Method::POST, "/api/favorites", Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["message"], "Error saving favorite");
}

#[tokio::test]
async fn list_preserves_insertion_order() {
    let app = app();
    for name in ["Ethereum", "Bitcoin", "Solana"] {
        let mut body = bitcoin();
        body["name"] = json!(name);
        send(&app, Method::POST, "/api/favorites", Some(body)).await;
    }

    let (_, list) = send(&app, Method::GET, "/api/favorites", None).await;
    let names: Vec<&str> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["name"].as_str().unwrap())
        .collect();

    assert_eq!(names, vec!["Ethereum", "Bitcoin", "Solana"]);
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/api/favorites")
                .header(header::ORIGIN, "http://localhost:3000")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );
}

#[tokio::test]
async fn health_check_reports_running() {
    let (status, body) = send(&app(), Method::GET, "/api/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
}
