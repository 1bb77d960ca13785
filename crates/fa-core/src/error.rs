// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use fa_client_api::FarmApiError;
use std::path::PathBuf;
use thiserror::Error;

/// Failure of a flow step. The display text is what the page shows.
#[derive(Debug, Error)]
pub enum FlowError {
    /// Rejected before any request was sent
    #[error("{0}")]
    Invalid(String),

    #[error("{message}")]
    Request {
        message: String,
        #[source]
        source: FarmApiError,
    },

    #[error("Could not read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FlowError {
    pub(crate) fn request(source: FarmApiError, connect_failure: &str) -> Self {
        FlowError::Request {
            message: source.user_message(connect_failure),
            source,
        }
    }
}

pub type FlowResult<T> = Result<T, FlowError>;
