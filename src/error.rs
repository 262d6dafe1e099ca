//! Application error types and their HTTP mapping

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::extractor::ExtractorError;

pub type Result<T> = std::result::Result<T, AppError>;

/// Errors surfaced to API clients.
///
/// Only two kinds reach the wire: client-input errors (400) and downstream
/// extractor failures (500, message passed through verbatim).
#[derive(Debug, Error)]
pub enum AppError {
    #[error("missing required parameter: {0}")]
    MissingParam(&'static str),

    #[error("{0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Extractor(#[from] ExtractorError),

    #[error(transparent)]
    Config(#[from] config::ConfigError),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingParam(_) | AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            // A link we cannot reduce to a probe target, or a filename we
            // refuse to hand to the probe, is client input, not a
            // downstream failure
            AppError::Extractor(ExtractorError::UnsupportedLink(_))
            | AppError::Extractor(ExtractorError::InvalidFilename(_)) => StatusCode::BAD_REQUEST,
            AppError::Extractor(_) | AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        if status.is_server_error() {
            error!(status = %status, error = %message, "request failed");
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}
