// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use fa_mock_server::{spawn_ephemeral, AppState, MockBackendOptions};
use pretty_assertions::assert_eq;
use reqwest::{multipart, Client, StatusCode};
use serde_json::{json, Value};

async fn spawn(options: MockBackendOptions) -> String {
    let (base, _handle) = spawn_ephemeral(AppState::new(options)).await.expect("spawn mock backend");
    base
}

fn image_form(file_name: &str, mime: &str, bytes: Vec<u8>) -> multipart::Form {
    let part = multipart::Part::bytes(bytes).file_name(file_name.to_string()).mime_str(mime).unwrap();
    multipart::Form::new().part("image", part)
}

#[tokio::test]
async fn health_and_catalog_routes_respond() {
    let base = spawn(MockBackendOptions::default()).await;
    let client = Client::new();

    let health: Value = client.get(format!("{base}health")).send().await.unwrap().json().await.unwrap();
    assert_eq!(health["status"], "ok");

    let states: Value =
        client.get(format!("{base}available-states")).send().await.unwrap().json().await.unwrap();
    assert!(states["states"].as_array().unwrap().iter().any(|s| s == "Punjab"));

    let crops: Value = client
        .get(format!("{base}disease-detection/supported-crops"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(crops["supported_crops"].as_array().unwrap().iter().any(|c| c == "Tomato"));
}

#[tokio::test]
async fn recommend_without_region_reports_failure_envelope() {
    let base = spawn(MockBackendOptions::default()).await;
    let response = Client::new()
        .post(format!("{base}recommend-crops"))
        .json(&json!({ "area": 2.0 }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "success": false, "recommendations": [], "error": "Region is required" }));
}

#[tokio::test]
async fn recommend_ranks_soil_and_season_matches_first() {
    let base = spawn(MockBackendOptions::default()).await;
    let body: Value = Client::new()
        .post(format!("{base}recommend-crops"))
        .json(&json!({
            "region": "Punjab",
            "area": 2.0,
            "fertilizer": 50,
            "pesticide": 10,
            "soilType": "Black",
            "season": "Rabi (Winter)"
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["success"], true);
    let recommendations = body["recommendations"].as_array().unwrap();
    assert_eq!(recommendations.len(), 5);
    assert_eq!(recommendations[0]["name"], "Wheat");
    assert!(recommendations[0]["expectedYield"].is_string());
}

#[tokio::test]
async fn predict_yield_requires_training() {
    let base = spawn(MockBackendOptions::default()).await;
    let client = Client::new();
    let request = json!({
        "crop": "Rice",
        "state": "Punjab",
        "season": "Kharif",
        "area": 2.0,
        "fertilizer": 100.0,
        "pesticide": 5.0
    });

    let response = client.post(format!("{base}predict-yield")).json(&request).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Model not trained. Please train the model first.");

    let trained: Value = client.post(format!("{base}train")).send().await.unwrap().json().await.unwrap();
    assert_eq!(trained["message"], "Model trained successfully");

    let status: Value = client.get(format!("{base}status")).send().await.unwrap().json().await.unwrap();
    assert_eq!(status["is_trained"], true);

    let prediction: Value =
        client.post(format!("{base}predict-yield")).json(&request).send().await.unwrap().json().await.unwrap();
    assert_eq!(prediction["unit"], "tonnes/hectare");
    assert!(prediction["predicted_yield"].as_f64().unwrap() > 2.6);
}

#[tokio::test]
async fn malformed_json_bodies_get_failure_envelope() {
    let base = spawn(MockBackendOptions {
        yield_model_trained: true,
        ..Default::default()
    })
    .await;
    let client = Client::new();

    let response = client
        .post(format!("{base}predict-yield"))
        .json(&json!({ "crop": "Rice" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("state"));

    let response = client
        .post(format!("{base}recommend-crops"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn predict_disease_rejects_non_images() {
    let base = spawn(MockBackendOptions {
        disease_model_loaded: true,
        ..Default::default()
    })
    .await;

    let response = Client::new()
        .post(format!("{base}disease-detection/predict"))
        .multipart(image_form("notes.txt", "text/plain", b"not a leaf".to_vec()))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Please select an image file (JPEG, PNG, etc.)");
}

#[tokio::test]
async fn predict_disease_needs_loaded_model() {
    let base = spawn(MockBackendOptions::default()).await;
    let client = Client::new();

    let response = client
        .post(format!("{base}disease-detection/predict"))
        .multipart(image_form("leaf.png", "image/png", vec![1, 2, 3]))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let loaded: Value = client
        .post(format!("{base}disease-detection/load-model"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(loaded["success"], true);

    let body: Value = client
        .post(format!("{base}disease-detection/predict"))
        .multipart(image_form("leaf.png", "image/png", vec![1, 2, 3]))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["success"], true);
    // Bytes sum to 6: the sixth-modulo profile is Potato / Early Blight.
    assert_eq!(body["prediction"]["disease"], "Early Blight");
    assert_eq!(body["prediction"]["confidence"], 78.5);
    assert!(!body["treatment"].as_array().unwrap().is_empty());
}
