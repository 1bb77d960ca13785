// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Error types for the REST client

use fa_api_contract::ApiContractError;
use fa_client_api::FarmApiError;
use reqwest::StatusCode;
use thiserror::Error;

/// REST client result type
pub type RestClientResult<T> = Result<T, RestClientError>;

/// REST client error types
#[derive(Debug, Error)]
pub enum RestClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("URL parsing failed: {0}")]
    Url(#[from] url::ParseError),

    /// Non-2xx status; `message` is the backend's reason or the endpoint fallback
    #[error("{message}")]
    Server { status: StatusCode, message: String },

    /// 2xx response carrying `success: false`
    #[error("{0}")]
    Rejected(String),

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error(transparent)]
    Validation(#[from] ApiContractError),
}

impl RestClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            RestClientError::Server { status, .. } => Some(*status),
            RestClientError::Http(err) => err.status(),
            _ => None,
        }
    }
}

impl From<RestClientError> for FarmApiError {
    fn from(err: RestClientError) -> Self {
        match err {
            RestClientError::Http(err) if err.is_decode() => {
                FarmApiError::InvalidResponse(err.to_string())
            }
            RestClientError::Http(err) => FarmApiError::Transport(err.to_string()),
            RestClientError::Url(err) => FarmApiError::Transport(err.to_string()),
            RestClientError::UnexpectedResponse(text) => FarmApiError::InvalidResponse(text),
            RestClientError::Server { status, message } => FarmApiError::Server {
                status: status.as_u16(),
                message,
            },
            RestClientError::Rejected(message) => FarmApiError::Rejected(message),
            RestClientError::Validation(err) => FarmApiError::Validation(err.to_string()),
        }
    }
}
