//! Price generation endpoint
//!
//! Every request advances every instrument by one step. Two requests never
//! see the same prices.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use chrono::{DateTime, Utc};
use pricegen_core::PriceQuote;
use serde::{Deserialize, Serialize};

use super::error::ApiError;
use super::AppState;

/// Response of GET /prices
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricesResponse {
    pub success: bool,
    /// One quote per instrument, in registry order
    pub prices: Vec<PriceQuote>,
    pub timestamp: DateTime<Utc>,
}

/// Build the price routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/prices", get(prices_handler))
}

/// GET /prices - Generate the next price of every instrument
async fn prices_handler(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let prices = {
        let mut engine = state.engine.lock().await;
        engine.generate_all()?
    };

    tracing::debug!(count = prices.len(), "Prices generated");

    let response = PricesResponse {
        success: true,
        prices,
        timestamp: Utc::now(),
    };
    Ok((StatusCode::OK, Json(response)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_support::seeded_state;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    async fn fetch(router: Router) -> PricesResponse {
        let response = router
            .oneshot(Request::builder().uri("/prices").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_prices_one_entry_per_instrument_in_order() {
        let router = routes().with_state(seeded_state(1));
        let response = fetch(router).await;

        assert!(response.success);
        let ids: Vec<&str> = response.prices.iter().map(|p| p.instrument.as_str()).collect();
        assert_eq!(ids, vec!["EUR/USD", "ARG/USD", "ARG/EUR"]);
        assert!(response.prices.iter().all(|p| p.price > 0.0));
    }

    #[tokio::test]
    async fn test_prices_advance_on_every_call() {
        let state = seeded_state(2);
        let router = routes().with_state(state.clone());

        for _ in 0..4 {
            fetch(router.clone()).await;
        }

        let engine = state.engine.lock().await;
        for id in engine.list_instruments() {
            let s = engine.state(id).unwrap();
            assert_eq!(s.event_counter, 4);
            assert_eq!(s.price_history.len(), 5);
        }
    }

    #[tokio::test]
    async fn test_prices_match_seeded_engine() {
        let router = routes().with_state(seeded_state(3));
        let response = fetch(router).await;

        let mut reference = pricegen_core::PriceEngine::seeded(3);
        let expected: Vec<f64> = reference
            .generate_all()
            .unwrap()
            .into_iter()
            .map(|q| q.price)
            .collect();
        let got: Vec<f64> = response.prices.into_iter().map(|q| q.price).collect();
        assert_eq!(got, expected);
    }

    #[tokio::test]
    async fn test_prices_wire_shape() {
        let router = routes().with_state(seeded_state(5));
        let response = router
            .oneshot(Request::builder().uri("/prices").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["success"], true);
        assert!(json["timestamp"].is_string());
        let first = &json["prices"][0];
        assert_eq!(first["instrument"], "EUR/USD");
        assert!(first["price"].is_f64());
        assert!(DateTime::parse_from_rfc3339(first["timestamp"].as_str().unwrap()).is_ok());
    }

    #[tokio::test]
    async fn test_prices_rejects_post() {
        let router = routes().with_state(seeded_state(1));
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/prices")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
