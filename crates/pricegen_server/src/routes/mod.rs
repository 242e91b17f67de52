//! Route modules for the price generator server
//!
//! This module contains endpoint group-specific routers:
//! - prices: Price generation endpoint
//! - instruments: Instrument table endpoint
//! - health: Liveness endpoint

pub mod error;
pub mod health;
pub mod instruments;
pub mod prices;

use axum::Router;
use pricegen_core::PriceEngine;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Server configuration
    pub config: Arc<ServerConfig>,
    /// The single price engine; every `/prices` call advances it under the lock
    pub engine: Arc<Mutex<PriceEngine>>,
    /// Server start time for uptime calculation
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Create a new AppState
    pub fn new(config: Arc<ServerConfig>, engine: PriceEngine) -> Self {
        Self {
            config,
            engine: Arc::new(Mutex::new(engine)),
            start_time: std::time::Instant::now(),
        }
    }
}

/// Build the main application router by merging all route modules
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(health::routes())
        .merge(prices::routes())
        .merge(instruments::routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
