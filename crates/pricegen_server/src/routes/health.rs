//! Health check endpoint
//!
//! Liveness probe for load balancers and the feed's consumers. Never touches
//! the price engine.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::AppState;

/// Service name reported by the health endpoint
pub const SERVICE_NAME: &str = "price-generator";

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Always "ok" while the process serves requests
    pub status: String,
    /// Service name
    pub service: String,
    /// Response instant
    pub timestamp: DateTime<Utc>,
    /// Server version
    pub version: String,
    /// Server uptime in seconds
    pub uptime_secs: u64,
    /// Deployment environment from the configuration
    pub environment: String,
}

/// Build the health routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_handler))
}

/// GET /health - Health check endpoint
async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
        service: SERVICE_NAME.to_string(),
        timestamp: Utc::now(),
        version: crate::VERSION.to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        environment: state.config.environment.to_string(),
    };

    (StatusCode::OK, Json(response))
}
