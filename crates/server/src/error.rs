//! Error types for the HTTP service.
//!
//! [`ApiError`] is what handlers return and maps onto a status code with a
//! JSON body. [`StorageError`] never reaches a client: storage failures are
//! logged and reported in the response's `storage` field instead.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tersa_core::TersaError;
use thiserror::Error;

/// Handler errors.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request body named neither a URL nor any text.
    #[error("Either 'url' or 'text' is required")]
    MissingInput,

    /// The body is not JSON of the expected shape.
    #[error("Invalid request body: {}", .0.body_text())]
    InvalidBody(#[from] JsonRejection),

    /// No stored summary with this id.
    #[error("Summary not found")]
    NotFound,

    /// Pipeline or fetch failure.
    #[error(transparent)]
    Core(#[from] TersaError),

    /// A lookup against the summaries store failed.
    #[error("Storage unavailable: {0}")]
    Storage(#[from] StorageError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingInput => StatusCode::BAD_REQUEST,
            Self::InvalidBody(rejection) => rejection.status(),
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Core(e) if e.is_input_error() => StatusCode::BAD_REQUEST,
            Self::Core(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Storage(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "request rejected");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Persistence failures.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] tokio_postgres::Error),

    #[error("connection pool error: {0}")]
    Pool(#[from] deadpool_postgres::PoolError),

    #[error("pool setup failed: {0}")]
    PoolSetup(#[from] deadpool_postgres::CreatePoolError),

    #[error("archive I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("archive entry is malformed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Invalid server configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::MissingInput.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::Core(TersaError::NoContent).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::Core(TersaError::HttpStatus { status: 404 }).status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::Core(TersaError::Serialization("boom".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_config_error_message() {
        let err = ConfigError::Invalid { key: "TERSA_BIND", value: "nope".to_string() };
        assert_eq!(err.to_string(), "invalid value for TERSA_BIND: 'nope'");
    }
}
