use axum::{
  response::{IntoResponse, Response},
  Json,
};
use http::StatusCode;
use mongodb::error::{ErrorKind, WriteFailure};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// MongoDB server code for a unique index violation
const DUPLICATE_KEY_CODE: i32 = 11000;

#[derive(Error, Debug)]
pub enum AppError {
  #[error("Validation error: {0}")]
  ValidationError(String),

  #[error("Conflict: {0}")]
  ConflictError(String),

  #[error("Not found: {0}")]
  NotFoundError(String),

  #[error("Storage error: {0}")]
  StorageError(String),

  #[error("Network error: {0}")]
  NetworkError(String),

  #[error("Config error: {0}")]
  ConfigError(String),

  #[error("Internal server error: {0}")]
  InternalError(String),
}

impl AppError {
  pub fn status_code(&self) -> StatusCode {
      match self {
          AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
          AppError::ConflictError(_) => StatusCode::CONFLICT,
          AppError::NotFoundError(_) => StatusCode::NOT_FOUND,
          AppError::NetworkError(_) => StatusCode::BAD_GATEWAY,
          AppError::StorageError(_)
          | AppError::ConfigError(_)
          | AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
      }
  }

  /// Rebuilds the error kind from a status code and detail returned by the
  /// favorites service.
  pub fn from_status(status: StatusCode, detail: String) -> Self {
      match status {
          StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => Self::ValidationError(detail),
          StatusCode::CONFLICT => Self::ConflictError(detail),
          StatusCode::NOT_FOUND => Self::NotFoundError(detail),
          s if s.is_server_error() => Self::StorageError(detail),
          s => Self::NetworkError(format!("unexpected status {}: {}", s, detail)),
      }
  }
}

impl From<mongodb::error::Error> for AppError {
  fn from(err: mongodb::error::Error) -> Self {
      match err.kind.as_ref() {
          ErrorKind::Write(WriteFailure::WriteError(write_error))
              if write_error.code == DUPLICATE_KEY_CODE =>
          {
              Self::ConflictError(write_error.message.clone())
          }
          _ => Self::StorageError(err.to_string()),
      }
  }
}

impl From<bson::ser::Error> for AppError {
  fn from(err: bson::ser::Error) -> Self {
      Self::InternalError(format!("Failed to serialize document: {}", err))
  }
}

impl From<bson::de::Error> for AppError {
  fn from(err: bson::de::Error) -> Self {
      Self::StorageError(format!("Failed to deserialize document: {}", err))
  }
}

impl From<reqwest::Error> for AppError {
  fn from(err: reqwest::Error) -> Self {
      Self::NetworkError(err.to_string())
  }
}

/// JSON body of every failed favorites request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
  pub message: String,
  pub error: String,
}

/// An `AppError` paired with the human message for the operation that failed.
#[derive(Debug)]
pub struct ApiError {
  pub message: &'static str,
  pub source: AppError,
}

impl ApiError {
  pub fn new(message: &'static str, source: AppError) -> Self {
      Self { message, source }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
      let status = self.source.status_code();

      if status.is_server_error() {
          tracing::error!("{}: {}", self.message, self.source);
      } else {
          tracing::warn!("{}: {}", self.message, self.source);
      }

      let body = Json(ErrorBody {
          message: self.message.to_string(),
          error: self.source.to_string(),
      });

      (status, body).into_response()
  }
}

impl IntoResponse for AppError {
  fn into_response(self) -> Response {
      ApiError::new("Request failed", self).into_response()
  }
}
