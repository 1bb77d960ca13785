// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Schema root definition for configuration validation.
//!
//! This type describes the canonical shape of a configuration file. It is used
//! only for schema generation and validation; consumers read their own typed
//! views through [`crate::extract`].

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The root configuration schema that defines the shape of all possible configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
#[serde(deny_unknown_fields)]
pub struct SchemaRoot {
    /// Base URL of the prediction API, including the `/api/` path
    pub api_base_url: Option<String>,
    /// Per-request timeout in seconds
    #[schemars(range(min = 1))]
    pub request_timeout_secs: Option<u64>,
    pub log_level: Option<LogLevelName>,
    pub log_format: Option<LogFormatName>,
    pub output: Option<OutputName>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum LogLevelName {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum LogFormatName {
    Plaintext,
    Json,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum OutputName {
    Text,
    Json,
}

/// JSON Schema document for [`SchemaRoot`]
pub fn schema_json() -> anyhow::Result<serde_json::Value> {
    let rs = schemars::schema_for!(SchemaRoot);
    Ok(serde_json::to_value(rs)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_lists_every_key() {
        let schema = schema_json().unwrap();
        let props = schema["properties"].as_object().unwrap();
        for key in ["api-base-url", "request-timeout-secs", "log-level", "log-format", "output"] {
            assert!(props.contains_key(key), "missing {key}");
        }
        assert_eq!(schema["additionalProperties"], false);
    }
}
