// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use std::time::Duration;

use fa_api_contract::*;
use fa_client_api::{FarmApi, FarmApiError};
use fa_mock_server::{spawn_ephemeral, AppState, MockBackendOptions};
use fa_rest_client::{RestClient, RestClientError};
use pretty_assertions::assert_eq;

async fn client_with(options: MockBackendOptions) -> RestClient {
    let (base, _handle) = spawn_ephemeral(AppState::new(options)).await.expect("spawn mock backend");
    RestClient::from_url(&base, Duration::from_secs(10)).expect("client")
}

/// Serve a fixed set of raw replies under `/api` and return the base URL
async fn raw_backend(router: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move { axum::serve(listener, router).await });
    format!("http://{addr}/api/")
}

fn yield_request() -> YieldPredictionRequest {
    YieldPredictionRequest {
        crop: "Wheat".to_string(),
        state: "Punjab".to_string(),
        season: "Rabi".to_string(),
        area: 2.0,
        fertilizer: 120.0,
        pesticide: 4.0,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_health_and_lists() {
    let client = client_with(MockBackendOptions::default()).await;

    assert_eq!(client.health().await.unwrap().state(), "ok");
    assert!(client.available_states().await.unwrap().contains(&"Punjab".to_string()));
    assert!(client.available_crops().await.unwrap().contains(&"Rice".to_string()));
    assert_eq!(
        client.disease_supported_crops().await.unwrap(),
        vec!["Apple", "Corn", "Grape", "Potato", "Tomato"]
    );
}

#[tokio::test]
async fn test_recommend_crops() {
    let client = client_with(MockBackendOptions::default()).await;
    let request = CropRecommendationRequest {
        region: "Punjab".to_string(),
        soil_type: Some("Black".to_string()),
        season: Some("Rabi (Winter)".to_string()),
        ..Default::default()
    };

    let recommendations = client.recommend_crops(&request).await.unwrap();
    assert_eq!(recommendations.len(), 5);
    assert_eq!(recommendations[0].name, "Wheat");
    assert_eq!(recommendations[0].expected_yield.to_string(), "3-4 tons/ha");
    assert!(recommendations[0].confidence_percent().is_some());
}

#[tokio::test]
async fn test_server_error_message_is_surfaced() {
    let client = client_with(MockBackendOptions::default()).await;

    let err = client.predict_yield(&yield_request()).await.unwrap_err();
    match err {
        RestClientError::Server { status, message } => {
            assert_eq!(status.as_u16(), 400);
            assert_eq!(message, "Model not trained. Please train the model first.");
        }
        other => panic!("unexpected error: {other:?}"),
    }

    let report = client.train_yield_model().await.unwrap();
    assert_eq!(report.message.as_deref(), Some("Model trained successfully"));
    assert!(report.metrics.contains_key("r2_score"));
    assert!(client.yield_model_status().await.unwrap().is_trained);

    let prediction = client.predict_yield(&yield_request()).await.unwrap();
    assert_eq!(prediction.unit.as_deref(), Some("tonnes/hectare"));
    assert!(prediction.details.contains_key("total_production"));
}

#[tokio::test]
async fn test_disease_prediction_round_trip() {
    let client = client_with(MockBackendOptions::default()).await;
    let image = LeafImage::new("leaf.png", vec![1, 2, 3]);

    let err = FarmApiError::from(client.predict_disease(&image).await.unwrap_err());
    assert_eq!(
        err,
        FarmApiError::Server {
            status: 503,
            message: "Model not loaded. Please load the model first.".to_string()
        }
    );

    let loaded = client.load_disease_model().await.unwrap();
    assert_eq!(loaded.success, Some(true));
    assert!(client.disease_model_status().await.unwrap().is_loaded);

    let diagnosis = client.predict_disease(&image).await.unwrap();
    assert_eq!(diagnosis.prediction.crop, "Potato");
    assert_eq!(diagnosis.prediction.disease, "Early Blight");
    assert_eq!(diagnosis.severity(), Severity::Severe);
}

#[tokio::test]
async fn test_trait_object_dispatch() {
    let client = client_with(MockBackendOptions {
        yield_model_trained: true,
        disease_model_loaded: true,
    })
    .await;
    let api: &dyn FarmApi = &client;

    assert!(api.yield_model_status().await.unwrap().is_trained);
    assert!(api.predict_yield(&yield_request()).await.unwrap().predicted_yield > 0.0);
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_failure() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client =
        RestClient::from_url(&format!("http://{addr}/api/"), Duration::from_secs(2)).unwrap();
    let err: FarmApiError = client.health().await.unwrap_err().into();
    assert!(err.is_connection_failure(), "{err:?}");
    assert_eq!(err.user_message("Failed to connect to server"), "Failed to connect to server");
}

#[tokio::test]
async fn test_error_status_without_reason_uses_endpoint_message() {
    use axum::{http::StatusCode, routing::get, Json, Router};

    let router = Router::new().nest(
        "/api",
        Router::new()
            .route("/status", get(|| async { (StatusCode::BAD_GATEWAY, "Bad Gateway") }))
            .route(
                "/available-crops",
                get(|| async {
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(serde_json::json!({ "detail": "dataset missing" })),
                    )
                }),
            )
            .route(
                "/available-states",
                get(|| async {
                    (StatusCode::UNPROCESSABLE_ENTITY, Json(serde_json::json!({ "message": "bad query" })))
                }),
            ),
    );
    let client = RestClient::from_url(&raw_backend(router).await, Duration::from_secs(5)).unwrap();

    let err: FarmApiError = client.yield_model_status().await.unwrap_err().into();
    assert_eq!(
        err,
        FarmApiError::Server {
            status: 502,
            message: "Failed to fetch model status".to_string()
        }
    );

    let err = client.available_crops().await.unwrap_err();
    assert_eq!(err.status().map(|s| s.as_u16()), Some(500));
    assert_eq!(err.to_string(), "Failed to fetch available crops");

    let err = client.available_states().await.unwrap_err();
    assert_eq!(err.to_string(), "bad query");
}

#[tokio::test]
async fn test_success_status_with_non_json_body_is_invalid_response() {
    use axum::{routing::get, Router};

    let router = Router::new().nest(
        "/api",
        Router::new().route("/health", get(|| async { "<html>maintenance</html>" })),
    );
    let client = RestClient::from_url(&raw_backend(router).await, Duration::from_secs(5)).unwrap();

    let err: FarmApiError = client.health().await.unwrap_err().into();
    assert!(matches!(err, FarmApiError::InvalidResponse(_)), "{err:?}");
    assert!(!err.is_connection_failure());
    assert_eq!(err.user_message("Failed to connect to server"), "Failed to connect to server");
}
