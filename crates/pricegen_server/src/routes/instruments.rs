//! Instrument table endpoint

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use pricegen_core::InstrumentDefinition;
use serde::{Deserialize, Serialize};

use super::AppState;

/// Response of GET /instruments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstrumentsResponse {
    pub success: bool,
    pub instruments: Vec<InstrumentDefinition>,
}

/// Build the instrument routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/instruments", get(instruments_handler))
}

/// GET /instruments - Static definitions in registry order
async fn instruments_handler(State(state): State<AppState>) -> impl IntoResponse {
    let instruments = {
        let engine = state.engine.lock().await;
        engine.registry().definitions().to_vec()
    };

    (
        StatusCode::OK,
        Json(InstrumentsResponse {
            success: true,
            instruments,
        }),
    )
}
