use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::store::InvalidTimestamp;

/// Request-level failures, one variant per response shape.
///
/// The write route answers in plain text, the read route in JSON, so each
/// variant renders its own body rather than sharing one format.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Timestamp was present and a string, but cannot form a storage key.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(#[from] InvalidTimestamp),
    /// Persisting an ingested reading failed. The cache was already updated
    /// and is deliberately not rolled back.
    #[error("Error saving sensor data")]
    Save(anyhow::Error),
    /// The fallback scan, file read, or parse of stored data failed.
    #[error("Error reading sensor data")]
    Read(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::InvalidTimestamp(e) => {
                (StatusCode::BAD_REQUEST, e.to_string()).into_response()
            }
            ApiError::Save(e) => {
                error!(error = %format_chain(&e), "Error saving sensor data");
                (StatusCode::INTERNAL_SERVER_ERROR, "Error saving sensor data")
                    .into_response()
            }
            ApiError::Read(e) => {
                error!(error = %format_chain(&e), "Error reading sensor data");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Error reading sensor data" })),
                )
                    .into_response()
            }
        }
    }
}

/// Render an error with its full context chain on one line.
fn format_chain(e: &anyhow::Error) -> String {
    format!("{e:#}")
}
