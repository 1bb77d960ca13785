// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Client abstraction over the prediction backend
//!
//! The page flows in `fa-core` are written against [`FarmApi`] so they can be
//! driven by the real REST client or by the in-memory mock client.

use async_trait::async_trait;
use fa_api_contract::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors surfaced by any [`FarmApi`] implementation
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "kebab-case")]
pub enum FarmApiError {
    /// The backend could not be reached (connection refused, DNS, timeout)
    #[error("Failed to connect to server: {0}")]
    Transport(String),

    /// The backend answered with a non-success HTTP status
    #[error("{message}")]
    Server { status: u16, message: String },

    /// The backend answered `success: false`
    #[error("{0}")]
    Rejected(String),

    /// The response did not match the contract
    #[error("Unexpected response from server: {0}")]
    InvalidResponse(String),

    /// The request failed client-side validation and was never sent
    #[error("{0}")]
    Validation(String),
}

impl FarmApiError {
    /// Whether the failure happened before the backend produced an answer
    pub fn is_connection_failure(&self) -> bool {
        matches!(self, FarmApiError::Transport(_))
    }

    /// Message for display next to a form: the backend's reason when it gave
    /// one, otherwise `connect_failure`
    pub fn user_message(&self, connect_failure: &str) -> String {
        match self {
            FarmApiError::Transport(_) | FarmApiError::InvalidResponse(_) => {
                connect_failure.to_string()
            }
            FarmApiError::Server { message, .. } => message.clone(),
            FarmApiError::Rejected(message) | FarmApiError::Validation(message) => message.clone(),
        }
    }
}

impl From<ApiContractError> for FarmApiError {
    fn from(err: ApiContractError) -> Self {
        FarmApiError::Validation(err.to_string())
    }
}

pub type FarmApiResult<T> = Result<T, FarmApiError>;

/// One method per backend endpoint
#[async_trait]
pub trait FarmApi: Send + Sync {
    async fn health(&self) -> FarmApiResult<HealthStatus>;

    async fn yield_model_status(&self) -> FarmApiResult<YieldModelStatus>;

    async fn available_crops(&self) -> FarmApiResult<Vec<String>>;

    async fn available_states(&self) -> FarmApiResult<Vec<String>>;

    async fn train_yield_model(&self) -> FarmApiResult<TrainingReport>;

    async fn predict_yield(&self, request: &YieldPredictionRequest)
        -> FarmApiResult<YieldPrediction>;

    async fn recommend_crops(
        &self,
        request: &CropRecommendationRequest,
    ) -> FarmApiResult<Vec<CropRecommendation>>;

    async fn disease_model_status(&self) -> FarmApiResult<DiseaseModelStatus>;

    async fn load_disease_model(&self) -> FarmApiResult<ModelLoadResponse>;

    async fn disease_supported_crops(&self) -> FarmApiResult<Vec<String>>;

    async fn predict_disease(&self, image: &LeafImage) -> FarmApiResult<DiseaseDiagnosis>;
}
