// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! REST API client for the farmer-assist prediction backend
//!
//! Every call goes through a single request/response path: validate the
//! request, send it, and turn non-2xx statuses and `success: false`
//! envelopes into typed errors carrying the backend's reason (or the
//! endpoint's fallback message when the backend gives none).
//!
//! [`RestClient`] also implements [`FarmApi`] so the page flows can use it
//! interchangeably with the in-memory mock client.

pub mod client;
pub mod error;
pub mod network_config;

pub use client::*;
pub use error::*;
pub use network_config::NetworkConfig;

use async_trait::async_trait;
use fa_api_contract::*;
use fa_client_api::{FarmApi, FarmApiResult};

#[async_trait]
impl FarmApi for client::RestClient {
    async fn health(&self) -> FarmApiResult<HealthStatus> {
        Ok(self.health().await?)
    }

    async fn yield_model_status(&self) -> FarmApiResult<YieldModelStatus> {
        Ok(self.yield_model_status().await?)
    }

    async fn available_crops(&self) -> FarmApiResult<Vec<String>> {
        Ok(self.available_crops().await?)
    }

    async fn available_states(&self) -> FarmApiResult<Vec<String>> {
        Ok(self.available_states().await?)
    }

    async fn train_yield_model(&self) -> FarmApiResult<TrainingReport> {
        Ok(self.train_yield_model().await?)
    }

    async fn predict_yield(
        &self,
        request: &YieldPredictionRequest,
    ) -> FarmApiResult<YieldPrediction> {
        Ok(self.predict_yield(request).await?)
    }

    async fn recommend_crops(
        &self,
        request: &CropRecommendationRequest,
    ) -> FarmApiResult<Vec<CropRecommendation>> {
        Ok(self.recommend_crops(request).await?)
    }

    async fn disease_model_status(&self) -> FarmApiResult<DiseaseModelStatus> {
        Ok(self.disease_model_status().await?)
    }

    async fn load_disease_model(&self) -> FarmApiResult<ModelLoadResponse> {
        Ok(self.load_disease_model().await?)
    }

    async fn disease_supported_crops(&self) -> FarmApiResult<Vec<String>> {
        Ok(self.disease_supported_crops().await?)
    }

    async fn predict_disease(&self, image: &LeafImage) -> FarmApiResult<DiseaseDiagnosis> {
        Ok(self.predict_disease(image).await?)
    }
}
