// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Error types for API contract validation and parsing

use thiserror::Error;

/// Errors that can occur during API contract validation and parsing
#[derive(Debug, Error)]
pub enum ApiContractError {
    /// Field-level validation failed; the message is the first human-readable
    /// reason, in field order.
    #[error("{0}")]
    Validation(String),

    #[error("Please select an image first")]
    MissingImage,

    #[error("Please select an image file (JPEG, PNG, etc.)")]
    NotAnImage { content_type: String },

    #[error("Image size should be less than 10MB")]
    ImageTooLarge { size: usize },

    #[error("Invalid soil type: {0}")]
    InvalidSoilType(String),

    #[error("Invalid season: {0}")]
    InvalidSeason(String),
}

impl From<validator::ValidationErrors> for ApiContractError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiContractError::Validation(crate::validation::first_message(&errors))
    }
}

/// Error body returned by the backend on failure.
///
/// The backend is not consistent: most endpoints use `error`, a few use
/// `message`. Both are accepted.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ApiErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApiErrorBody {
    /// Construct an error body carrying `error`
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            message: None,
        }
    }

    /// Best available human-readable reason, if any
    pub fn reason(&self) -> Option<&str> {
        self.error
            .as_deref()
            .or(self.message.as_deref())
            .filter(|s| !s.trim().is_empty())
    }
}
