// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Mock client implementing the FarmApi trait for testing
//!
//! This crate provides an in-memory implementation of [`FarmApi`] that
//! answers with canned data and never touches the network. Failures can be
//! injected per endpoint, and every call is recorded so tests can assert on
//! what a flow actually requested.

use async_trait::async_trait;
use fa_api_contract::validation::{
    validate_leaf_image, validate_recommendation_request, validate_yield_request,
};
use fa_api_contract::*;
use fa_client_api::{FarmApi, FarmApiError, FarmApiResult};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
struct MockData {
    states: Vec<String>,
    crops: Vec<String>,
    disease_crops: Vec<String>,
    recommendations: Vec<CropRecommendation>,
    diagnosis: DiseaseDiagnosis,
    predicted_yield: f64,
    yield_trained: bool,
    disease_loaded: bool,
    failures: HashMap<Endpoint, FarmApiError>,
}

impl Default for MockData {
    fn default() -> Self {
        Self {
            states: strings(&["Karnataka", "Punjab", "Tamil Nadu"]),
            crops: strings(&["Maize", "Rice", "Wheat"]),
            disease_crops: strings(&["Potato", "Tomato"]),
            recommendations: vec![
                recommendation("Rice", 92.0, Some(0.83), YieldFigure::Text("2.5-3.5 tons/ha".into())),
                recommendation("Maize", 81.5, Some(0.0), YieldFigure::Number(2.8)),
                recommendation("Cotton", 64.0, None, YieldFigure::Text("1.5-2 tons/ha".into())),
            ],
            diagnosis: DiseaseDiagnosis {
                prediction: DiseasePrediction {
                    crop: "Tomato".to_string(),
                    disease: "Late Blight".to_string(),
                    confidence: 94.2,
                },
                treatment: strings(&[
                    "Remove and destroy infected leaves",
                    "Spray copper oxychloride every 7-10 days",
                ]),
            },
            predicted_yield: 3.25,
            yield_trained: true,
            disease_loaded: true,
            failures: HashMap::new(),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn recommendation(
    name: &str,
    suitability: f64,
    confidence: Option<f64>,
    expected_yield: YieldFigure,
) -> CropRecommendation {
    CropRecommendation {
        name: name.to_string(),
        suitability,
        confidence,
        expected_yield,
        tips: format!("Follow local extension advice for {}.", name.to_lowercase()),
    }
}

/// Mock client implementing the FarmApi trait
#[derive(Debug, Clone, Default)]
pub struct MockFarmClient {
    data: Arc<RwLock<MockData>>,
    calls: Arc<RwLock<Vec<Endpoint>>>,
    /// Simulated latency per call
    delay_ms: u64,
}

impl MockFarmClient {
    /// Create a mock client with canned data and both models ready
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock client with custom delay
    pub fn with_delay(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            ..Self::new()
        }
    }

    /// Create a mock client whose models are not trained or loaded yet
    pub fn with_cold_models() -> Self {
        let data = MockData {
            yield_trained: false,
            disease_loaded: false,
            ..Default::default()
        };
        Self {
            data: Arc::new(RwLock::new(data)),
            ..Self::new()
        }
    }

    /// Make every call to `endpoint` fail with `error` until cleared
    pub async fn fail(&self, endpoint: Endpoint, error: FarmApiError) {
        self.data.write().await.failures.insert(endpoint, error);
    }

    pub async fn clear_failure(&self, endpoint: Endpoint) {
        self.data.write().await.failures.remove(&endpoint);
    }

    pub async fn set_states(&self, states: Vec<String>) {
        self.data.write().await.states = states;
    }

    pub async fn set_recommendations(&self, recommendations: Vec<CropRecommendation>) {
        self.data.write().await.recommendations = recommendations;
    }

    pub async fn set_diagnosis(&self, diagnosis: DiseaseDiagnosis) {
        self.data.write().await.diagnosis = diagnosis;
    }

    /// Endpoints called so far, in order
    pub async fn calls(&self) -> Vec<Endpoint> {
        self.calls.read().await.clone()
    }

    pub async fn call_count(&self, endpoint: Endpoint) -> usize {
        self.calls.read().await.iter().filter(|e| **e == endpoint).count()
    }

    /// Record the call, apply the delay and any injected failure
    async fn enter(&self, endpoint: Endpoint) -> FarmApiResult<()> {
        self.calls.write().await.push(endpoint);
        if self.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        }
        match self.data.read().await.failures.get(&endpoint) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl FarmApi for MockFarmClient {
    async fn health(&self) -> FarmApiResult<HealthStatus> {
        self.enter(Endpoint::Health).await?;
        Ok(HealthStatus {
            status: "ok".to_string(),
            details: Default::default(),
        })
    }

    async fn yield_model_status(&self) -> FarmApiResult<YieldModelStatus> {
        self.enter(Endpoint::YieldModelStatus).await?;
        Ok(YieldModelStatus {
            is_trained: self.data.read().await.yield_trained,
            details: Default::default(),
        })
    }

    async fn available_crops(&self) -> FarmApiResult<Vec<String>> {
        self.enter(Endpoint::AvailableCrops).await?;
        Ok(self.data.read().await.crops.clone())
    }

    async fn available_states(&self) -> FarmApiResult<Vec<String>> {
        self.enter(Endpoint::AvailableStates).await?;
        Ok(self.data.read().await.states.clone())
    }

    async fn train_yield_model(&self) -> FarmApiResult<TrainingReport> {
        self.enter(Endpoint::TrainYieldModel).await?;
        self.data.write().await.yield_trained = true;
        let mut metrics = serde_json::Map::new();
        metrics.insert("r2_score".to_string(), serde_json::json!(0.9));
        Ok(TrainingReport {
            message: Some("Model trained successfully".to_string()),
            metrics,
        })
    }

    async fn predict_yield(
        &self,
        request: &YieldPredictionRequest,
    ) -> FarmApiResult<YieldPrediction> {
        validate_yield_request(request)?;
        self.enter(Endpoint::PredictYield).await?;
        let data = self.data.read().await;
        if !data.yield_trained {
            return Err(FarmApiError::Server {
                status: 400,
                message: "Model not trained. Please train the model first.".to_string(),
            });
        }
        Ok(YieldPrediction {
            predicted_yield: data.predicted_yield,
            unit: Some("tonnes/hectare".to_string()),
            details: Default::default(),
        })
    }

    async fn recommend_crops(
        &self,
        request: &CropRecommendationRequest,
    ) -> FarmApiResult<Vec<CropRecommendation>> {
        validate_recommendation_request(request)?;
        self.enter(Endpoint::RecommendCrops).await?;
        Ok(self.data.read().await.recommendations.clone())
    }

    async fn disease_model_status(&self) -> FarmApiResult<DiseaseModelStatus> {
        self.enter(Endpoint::DiseaseModelStatus).await?;
        Ok(DiseaseModelStatus {
            is_loaded: self.data.read().await.disease_loaded,
            details: Default::default(),
        })
    }

    async fn load_disease_model(&self) -> FarmApiResult<ModelLoadResponse> {
        self.enter(Endpoint::LoadDiseaseModel).await?;
        self.data.write().await.disease_loaded = true;
        Ok(ModelLoadResponse {
            success: Some(true),
            message: Some("Model loaded successfully".to_string()),
            details: Default::default(),
        })
    }

    async fn disease_supported_crops(&self) -> FarmApiResult<Vec<String>> {
        self.enter(Endpoint::DiseaseSupportedCrops).await?;
        Ok(self.data.read().await.disease_crops.clone())
    }

    async fn predict_disease(&self, image: &LeafImage) -> FarmApiResult<DiseaseDiagnosis> {
        validate_leaf_image(image)?;
        self.enter(Endpoint::PredictDisease).await?;
        let data = self.data.read().await;
        if !data.disease_loaded {
            return Err(FarmApiError::Server {
                status: 503,
                message: "Model not loaded. Please load the model first.".to_string(),
            });
        }
        Ok(data.diagnosis.clone())
    }
}
