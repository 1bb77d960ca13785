// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! API contract types for the prediction backend

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

/// Parameters collected by the crop recommendation form
///
/// Missing fields take the form defaults when deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct CropRecommendationRequest {
    /// Region or state; the backend treats it as the state column
    #[validate(length(min = 1, message = "Please select a region"))]
    pub region: String,
    /// Cultivated area in hectares
    #[validate(range(min = 0.1, message = "Area must be at least 0.1 hectares"))]
    pub area: f64,
    /// Fertilizer in kilograms
    #[validate(range(min = 0.0, message = "Fertilizer cannot be negative"))]
    pub fertilizer: f64,
    /// Pesticide in litres
    #[validate(range(min = 0.0, message = "Pesticide cannot be negative"))]
    pub pesticide: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub soil_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub season: Option<String>,
}

impl Default for CropRecommendationRequest {
    fn default() -> Self {
        Self {
            region: String::new(),
            area: 1.0,
            fertilizer: 50.0,
            pesticide: 10.0,
            soil_type: None,
            season: None,
        }
    }
}

/// Response envelope of `recommend-crops`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropRecommendationResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub recommendations: Vec<CropRecommendation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A single recommended crop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropRecommendation {
    pub name: String,
    /// Suitability score in percent
    #[serde(default)]
    pub suitability: f64,
    /// Model confidence in `[0, 1]`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub expected_yield: YieldFigure,
    #[serde(default)]
    pub tips: String,
}

impl CropRecommendation {
    /// Confidence as a percentage with one decimal, omitted when absent or zero
    pub fn confidence_percent(&self) -> Option<String> {
        self.confidence
            .filter(|c| *c != 0.0 && c.is_finite())
            .map(|c| format!("{:.1}%", c * 100.0))
    }
}

/// Expected yield as reported by the backend: either prose ("3-4 tons/ha")
/// or a bare number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum YieldFigure {
    Number(f64),
    Text(String),
}

impl Default for YieldFigure {
    fn default() -> Self {
        YieldFigure::Text(String::new())
    }
}

impl std::fmt::Display for YieldFigure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            YieldFigure::Number(n) => f.write_str(&display_number(*n)),
            YieldFigure::Text(s) => f.write_str(s),
        }
    }
}

/// Parameters of the yield estimate form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct YieldPredictionRequest {
    #[validate(length(min = 1, message = "Please select a crop"))]
    pub crop: String,
    #[validate(length(min = 1, message = "Please select a state"))]
    pub state: String,
    #[validate(length(min = 1, message = "Please select a season"))]
    pub season: String,
    #[validate(range(min = 0.1, message = "Area must be at least 0.1 hectares"))]
    pub area: f64,
    #[validate(range(min = 0.0, message = "Fertilizer cannot be negative"))]
    pub fertilizer: f64,
    #[validate(range(min = 0.0, message = "Pesticide cannot be negative"))]
    pub pesticide: f64,
    /// Annual rainfall in millimetres
    #[validate(range(min = 0.0, message = "Rainfall cannot be negative"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annual_rainfall: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crop_year: Option<u16>,
}

impl Default for YieldPredictionRequest {
    fn default() -> Self {
        Self {
            crop: String::new(),
            state: String::new(),
            season: String::new(),
            area: 1.0,
            fertilizer: 50.0,
            pesticide: 10.0,
            annual_rainfall: None,
            crop_year: None,
        }
    }
}

/// Result of `predict-yield`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YieldPrediction {
    #[serde(alias = "prediction", alias = "yield")]
    pub predicted_yield: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Any further fields the backend reports (production totals, inputs echo)
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

/// Response envelope of `disease-detection/predict`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiseaseDiagnosisResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prediction: Option<DiseasePrediction>,
    #[serde(default)]
    pub treatment: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Classifier output for a leaf image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiseasePrediction {
    pub crop: String,
    pub disease: String,
    /// Confidence in percent, as reported
    pub confidence: f64,
}

/// A successful diagnosis: prediction plus treatment advice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiseaseDiagnosis {
    pub prediction: DiseasePrediction,
    pub treatment: Vec<String>,
}

impl DiseaseDiagnosis {
    pub fn severity(&self) -> crate::Severity {
        crate::Severity::of_disease(&self.prediction.disease)
    }
}

/// Responses that wrap their payload in a `success` flag
pub trait SuccessEnvelope {
    type Payload;

    /// Unwrap the payload, or return the backend's error string (if any)
    fn into_payload(self) -> Result<Self::Payload, Option<String>>;
}

impl SuccessEnvelope for CropRecommendationResponse {
    type Payload = Vec<CropRecommendation>;

    fn into_payload(self) -> Result<Self::Payload, Option<String>> {
        if self.success {
            Ok(self.recommendations)
        } else {
            Err(self.error)
        }
    }
}

impl SuccessEnvelope for DiseaseDiagnosisResponse {
    type Payload = DiseaseDiagnosis;

    fn into_payload(self) -> Result<Self::Payload, Option<String>> {
        match (self.success, self.prediction) {
            (true, Some(prediction)) => Ok(DiseaseDiagnosis {
                prediction,
                treatment: self.treatment,
            }),
            (true, None) => Err(Some("Response did not include a prediction".to_string())),
            (false, _) => Err(self.error),
        }
    }
}

/// `health` response
///
/// Any 2xx reply counts as healthy; `status` is informational only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    #[serde(default)]
    pub status: String,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl HealthStatus {
    /// Reported status, or `unknown` when the backend did not send one
    pub fn state(&self) -> &str {
        if self.status.is_empty() {
            "unknown"
        } else {
            &self.status
        }
    }
}

/// `status` response of the yield model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct YieldModelStatus {
    #[serde(default, alias = "model_trained")]
    pub is_trained: bool,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

/// `disease-detection/status` response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiseaseModelStatus {
    #[serde(default)]
    pub is_loaded: bool,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

/// `disease-detection/load-model` response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelLoadResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

/// `train` response; the metrics it carries are model specific
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub metrics: Map<String, Value>,
}

/// `available-states` response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateList {
    #[serde(default)]
    pub states: Vec<String>,
}

/// `available-crops` and `disease-detection/supported-crops` response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CropList {
    #[serde(default, alias = "supported_crops")]
    pub crops: Vec<String>,
}

/// Render a number without a trailing `.0` and with at most two decimals
pub fn display_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{:.0}", n)
    } else {
        let s = format!("{:.2}", n);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}
