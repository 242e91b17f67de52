//! REST API server for the simulated FX price feed
//!
//! This crate wraps [`pricegen_core::PriceEngine`] in a small HTTP service:
//! `GET /prices` advances and returns every instrument, `GET /instruments`
//! lists the static table, and `GET /health` is a liveness probe. Any origin
//! may call it.

pub mod config;
pub mod routes;
pub mod server;

pub use pricegen_core;

/// Server version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
