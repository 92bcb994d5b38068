//! Boundary error type: every core error kind becomes a status code and a
//! JSON body with a `message`.

use std::fmt;

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

use crate::catalog::StoreError;
use crate::mutation::{MutationError, ValidationError};
use crate::query::QueryError;

/// Generic message for faults that must not leak internals.
pub const INTERNAL_ERROR_MESSAGE: &str = "Something went wrong on the server!";

#[derive(Debug)]
pub enum ApiError {
    /// Unknown brand or car.
    Query(QueryError),
    /// New car rejected.
    Validation(ValidationError),
    /// Body could not be read as a JSON object.
    BadRequest(String),
    /// No route matched.
    RouteNotFound(String),
    /// Anything else. Logged, never shown to the client.
    Internal(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Query(e) => write!(f, "{}", e),
            ApiError::Validation(e) => write!(f, "{}", e),
            ApiError::BadRequest(msg) => write!(f, "{}", msg),
            ApiError::RouteNotFound(path) => write!(f, "Route not found: {}", path),
            ApiError::Internal(msg) => write!(f, "internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// Map this error to an HTTP status code.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Query(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::RouteNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            ApiError::Query(e @ QueryError::CarNotFound { .. }) => {
                json!({ "success": false, "message": e.to_string() })
            }
            ApiError::Validation(e) => json!({
                "message": e.to_string(),
                "missing": e.missing,
                "invalid": e.invalid,
            }),
            ApiError::Internal(msg) => {
                error!(error = %msg, "request failed");
                json!({ "message": INTERNAL_ERROR_MESSAGE })
            }
            other => json!({ "message": other.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}

impl From<QueryError> for ApiError {
    fn from(err: QueryError) -> Self {
        ApiError::Query(err)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<MutationError> for ApiError {
    fn from(err: MutationError) -> Self {
        match err {
            MutationError::Validation(e) => ApiError::Validation(e),
            MutationError::Store(e) => e.into(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(err: JsonRejection) -> Self {
        ApiError::BadRequest(err.body_text())
    }
}
