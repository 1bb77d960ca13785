// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Root configuration struct and loading for the farmer-assist CLI.
//!
//! Subsystem configurations are flattened into one struct. The configuration
//! is loaded once at startup and handed to subsystems as typed values.

use anyhow::Result;
use fa_config::{load_all, paths, Resolved};
use fa_logging::logging_config::LoggingConfig;
use fa_rest_client::network_config::NetworkConfig;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

use crate::render::OutputFormat;

/// Root configuration struct that composes all subsystem configurations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(flatten)]
    pub network: NetworkConfig,

    #[serde(flatten)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub output: Option<OutputFormat>,
}

/// Load every configuration layer with the given flag overrides
pub fn load_resolved(config_file: Option<&Path>, flags: &[(&str, Value)]) -> Result<Resolved> {
    let paths = paths::discover_paths(config_file.map(Path::to_path_buf));
    load_all(&paths, flags)
}

/// Load and extract the typed configuration
pub fn load_config(config_file: Option<&Path>, flags: &[(&str, Value)]) -> Result<Config> {
    let resolved = load_resolved(config_file, flags)?;
    fa_config::extract::get(&resolved.json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn config_file_and_flags_combine() {
        let dir = tempfile::tempdir().unwrap();
        std::env::set_var("FA_HOME", dir.path());
        let file = dir.path().join("cli.toml");
        std::fs::write(
            &file,
            r#"
            api-base-url = "http://localhost:5000/api/"
            request-timeout-secs = 15
            log-level = "debug"
            output = "json"
        "#,
        )
        .unwrap();

        let flags = [("request-timeout-secs", serde_json::json!(3))];
        let config = load_config(Some(&file), &flags);
        std::env::remove_var("FA_HOME");

        let config = config.unwrap();
        assert_eq!(config.network.base_url(), "http://localhost:5000/api/");
        assert_eq!(config.network.request_timeout_secs, Some(3));
        assert_eq!(config.logging.level, Some(fa_logging::CliLogLevel::Debug));
        assert_eq!(config.output, Some(OutputFormat::Json));
    }

    #[test]
    #[serial]
    fn empty_configuration_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::env::set_var("FA_HOME", dir.path());
        let config = load_config(None, &[]);
        std::env::remove_var("FA_HOME");

        let config = config.unwrap();
        assert_eq!(config.network.base_url(), fa_api_contract::DEFAULT_API_BASE_URL);
        assert_eq!(config.output, None);
    }
}
