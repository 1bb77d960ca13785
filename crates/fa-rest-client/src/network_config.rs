// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Network configuration types

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// The hosted backend sleeps when idle and can take close to a minute to wake.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Network configuration, read from the `api-base-url` and
/// `request-timeout-secs` configuration keys
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Prediction API base URL, including the `/api/` segment
    #[serde(rename = "api-base-url", default)]
    pub api_base_url: Option<String>,

    #[serde(rename = "request-timeout-secs", default)]
    pub request_timeout_secs: Option<u64>,
}

impl NetworkConfig {
    pub fn base_url(&self) -> &str {
        self.api_base_url.as_deref().unwrap_or(fa_api_contract::DEFAULT_API_BASE_URL)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS))
    }
}
