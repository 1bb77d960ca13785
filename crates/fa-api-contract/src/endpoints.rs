// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Endpoint table of the prediction backend
//!
//! Every call the clients make is described by one [`Endpoint`]: the HTTP
//! method, the path relative to the API base URL, and the message shown to
//! the user when the backend fails without explaining why.

use serde::{Deserialize, Serialize};

/// Default base URL of the hosted backend
pub const DEFAULT_API_BASE_URL: &str = "https://farmer-assist-backend.onrender.com/api/";

/// Multipart field name carrying the leaf image
pub const IMAGE_FIELD: &str = "image";

/// HTTP method used by an endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointMethod {
    Get,
    Post,
}

/// Backend operations consumed by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Endpoint {
    Health,
    YieldModelStatus,
    AvailableCrops,
    AvailableStates,
    TrainYieldModel,
    PredictYield,
    RecommendCrops,
    DiseaseModelStatus,
    LoadDiseaseModel,
    DiseaseSupportedCrops,
    PredictDisease,
}

impl Endpoint {
    pub const ALL: [Endpoint; 11] = [
        Endpoint::Health,
        Endpoint::YieldModelStatus,
        Endpoint::AvailableCrops,
        Endpoint::AvailableStates,
        Endpoint::TrainYieldModel,
        Endpoint::PredictYield,
        Endpoint::RecommendCrops,
        Endpoint::DiseaseModelStatus,
        Endpoint::LoadDiseaseModel,
        Endpoint::DiseaseSupportedCrops,
        Endpoint::PredictDisease,
    ];

    /// Path relative to the API base URL (no leading slash)
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Health => "health",
            Endpoint::YieldModelStatus => "status",
            Endpoint::AvailableCrops => "available-crops",
            Endpoint::AvailableStates => "available-states",
            Endpoint::TrainYieldModel => "train",
            Endpoint::PredictYield => "predict-yield",
            Endpoint::RecommendCrops => "recommend-crops",
            Endpoint::DiseaseModelStatus => "disease-detection/status",
            Endpoint::LoadDiseaseModel => "disease-detection/load-model",
            Endpoint::DiseaseSupportedCrops => "disease-detection/supported-crops",
            Endpoint::PredictDisease => "disease-detection/predict",
        }
    }

    pub fn method(self) -> EndpointMethod {
        match self {
            Endpoint::TrainYieldModel
            | Endpoint::PredictYield
            | Endpoint::RecommendCrops
            | Endpoint::LoadDiseaseModel
            | Endpoint::PredictDisease => EndpointMethod::Post,
            _ => EndpointMethod::Get,
        }
    }

    /// Message used when the backend fails without an error body
    pub fn failure_message(self) -> &'static str {
        match self {
            Endpoint::Health => "Backend is not responding",
            Endpoint::YieldModelStatus | Endpoint::DiseaseModelStatus => {
                "Failed to fetch model status"
            }
            Endpoint::AvailableCrops => "Failed to fetch available crops",
            Endpoint::AvailableStates => "Failed to fetch available states",
            Endpoint::TrainYieldModel => "Training failed",
            Endpoint::PredictYield | Endpoint::PredictDisease => "Prediction failed",
            Endpoint::RecommendCrops => "Error getting recommendations",
            Endpoint::LoadDiseaseModel => "Failed to load model",
            Endpoint::DiseaseSupportedCrops => "Failed to fetch supported crops",
        }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn paths_are_relative_and_unique() {
        let mut seen = HashSet::new();
        for endpoint in Endpoint::ALL {
            assert!(!endpoint.path().starts_with('/'), "{endpoint:?} must be relative");
            assert!(seen.insert(endpoint.path()), "duplicate path {}", endpoint.path());
        }
    }

    #[test]
    fn predictions_are_posts() {
        assert_eq!(Endpoint::PredictDisease.method(), EndpointMethod::Post);
        assert_eq!(Endpoint::PredictYield.method(), EndpointMethod::Post);
        assert_eq!(Endpoint::RecommendCrops.method(), EndpointMethod::Post);
        assert_eq!(Endpoint::AvailableStates.method(), EndpointMethod::Get);
    }

    #[test]
    fn base_url_ends_with_slash() {
        assert!(DEFAULT_API_BASE_URL.ends_with('/'));
    }
}
