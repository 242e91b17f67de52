//! API error responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use pricegen_core::EngineError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors a handler can surface
#[derive(Debug, Error)]
pub enum ApiError {
    /// The price engine refused the request
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// JSON error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Request failed");

        let status = match &self {
            ApiError::Engine(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = ErrorResponse {
            success: false,
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
