//! HTTP surface for the relay.
//!
//! `POST /api` triggers a status resolution for a flight and returns the
//! human label plus the wire code; `GET /oracles-index` exposes every
//! reporter's index assignment.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use aerosure_types::{AccountId, FlightCode, FlightKey, Timestamp};

use crate::error::RelayError;
use crate::relay::OracleRelay;

/// `POST /api` request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusRequest {
    pub flight_number: String,
    pub airline_address: String,
    pub timestamp: u64,
}

/// `POST /api` response body.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    /// Human label, e.g. "Late Airline".
    pub result: String,
    /// Wire code, e.g. 20.
    pub status: u8,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    message: String,
}

/// Build the relay router.
pub fn router(relay: Arc<OracleRelay>) -> Router {
    Router::new()
        .route("/api", post(resolve_status))
        .route("/oracles-index", get(oracles_index))
        .layer(CorsLayer::permissive())
        .with_state(relay)
}

/// Bind and serve the relay API.
pub async fn serve(relay: Arc<OracleRelay>, port: u16) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!(port, "relay HTTP API listening");
    axum::serve(listener, router(relay)).await
}

async fn resolve_status(
    State(relay): State<Arc<OracleRelay>>,
    Json(request): Json<StatusRequest>,
) -> impl IntoResponse {
    let not_found = || {
        (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                message: "flight not found".into(),
            }),
        )
            .into_response()
    };

    if request.flight_number.is_empty() {
        return not_found();
    }
    let Some(airline) = AccountId::parse(request.airline_address) else {
        return not_found();
    };
    let key = FlightKey::new(
        airline,
        FlightCode::new(request.flight_number),
        Timestamp::new(request.timestamp),
    );

    match relay.resolve_flight(&key).await {
        Ok(status) => Json(StatusResponse {
            result: status.label().to_string(),
            status: status.code(),
        })
        .into_response(),
        Err(RelayError::FlightNotFound) => not_found(),
        Err(e) => {
            tracing::warn!(flight = %key, error = %e, "resolution failed");
            (
                StatusCode::PAYMENT_REQUIRED,
                Json(ErrorResponse {
                    message: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

async fn oracles_index(State(relay): State<Arc<OracleRelay>>) -> impl IntoResponse {
    Json(relay.index_map().await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aerosure_app::SuretyApp;
    use aerosure_types::{Amount, PoolParams};
    use axum::body::Body;
    use axum::http::Request;
    use std::time::Duration;
    use tokio::sync::RwLock;
    use tower::ServiceExt;

    use crate::relay::RelayConfig;

    fn acct(name: &str) -> AccountId {
        AccountId::new(format!("aero_{name}"))
    }

    async fn test_relay() -> (Arc<OracleRelay>, FlightKey) {
        let owner = acct("owner");
        let mut app = SuretyApp::new(
            owner.clone(),
            acct("a1"),
            "JT Air",
            [42u8; 32],
            PoolParams::default(),
        );
        app.seed_account(acct("a1"), Amount::from_aero(100), &owner).unwrap();
        app.fund_airline(&acct("a1"), Amount::from_aero(30)).unwrap();
        let key = app
            .register_flight(
                FlightCode::new("ND1309"),
                Timestamp::new(1_637_415_493),
                Amount::from_aero(20),
                &acct("a1"),
            )
            .unwrap();

        let app = Arc::new(RwLock::new(app));
        let relay = OracleRelay::bootstrap(
            Arc::clone(&app),
            &owner,
            RelayConfig {
                reporter_count: 60,
                quorum_deadline: Duration::from_secs(10),
            },
        )
        .await
        .unwrap();
        (Arc::new(relay), key)
    }

    fn api_request(flight: &str, airline: &str, timestamp: u64) -> Request<Body> {
        let body = serde_json::json!({
            "flightNumber": flight,
            "airlineAddress": airline,
            "timestamp": timestamp,
        });
        Request::builder()
            .method("POST")
            .uri("/api")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn post_api_resolves_and_reports_status() {
        let (relay, key) = test_relay().await;
        let app = router(relay);

        let response = app
            .oneshot(api_request("ND1309", "aero_a1", 1_637_415_493))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        let expected = OracleRelay::observed_status(&key);
        assert_eq!(parsed["status"], expected.code());
        assert_eq!(parsed["result"], expected.label());
    }

    #[tokio::test]
    async fn post_api_unknown_flight_is_404() {
        let (relay, _) = test_relay().await;
        let app = router(relay);

        let response = app
            .oneshot(api_request("XX000", "aero_a1", 1))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn post_api_bad_airline_address_is_404() {
        let (relay, _) = test_relay().await;
        let app = router(relay);

        let response = app
            .oneshot(api_request("ND1309", "not-an-identity", 1))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn oracles_index_lists_every_reporter() {
        let (relay, _) = test_relay().await;
        let app = router(relay);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/oracles-index")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        let map = parsed.as_object().unwrap();
        assert_eq!(map.len(), 60);
        for indexes in map.values() {
            assert_eq!(indexes.as_array().unwrap().len(), 3);
        }
    }
}
