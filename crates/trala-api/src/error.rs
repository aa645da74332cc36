//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use trala_core::Error as ContactError;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  /// The request body could not be read as a contact payload at all.
  #[error("bad request: {0}")]
  BadRequest(String),

  #[error(transparent)]
  Contact(#[from] ContactError),
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, body) = match &self {
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, json!({ "error": m })),
      ApiError::Contact(e @ ContactError::Validation(errors)) => {
        let details: Vec<_> = errors
          .iter()
          .map(|fe| json!({ "field": fe.field, "message": fe.message }))
          .collect();
        (
          StatusCode::BAD_REQUEST,
          json!({ "error": e.to_string(), "fields": e.fields(), "details": details }),
        )
      }
      ApiError::Contact(e @ ContactError::Duplicate { .. }) => {
        (StatusCode::CONFLICT, json!({ "error": e.to_string() }))
      }
      ApiError::Contact(e @ ContactError::NotFound(_)) => {
        (StatusCode::NOT_FOUND, json!({ "error": e.to_string() }))
      }
      ApiError::Contact(e @ ContactError::Internal(_)) => {
        tracing::error!(error = %e, "contact store failure");
        (
          StatusCode::INTERNAL_SERVER_ERROR,
          json!({ "error": "internal server error" }),
        )
      }
    };
    (status, Json(body)).into_response()
  }
}
