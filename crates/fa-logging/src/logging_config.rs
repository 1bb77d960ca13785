// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Logging configuration types

use crate::{CliLogLevel, LogFormat};
use serde::{Deserialize, Serialize};

/// Logging section of the configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Logging verbosity level
    #[serde(rename = "log-level", default)]
    pub level: Option<CliLogLevel>,
    /// Output format for log lines
    #[serde(rename = "log-format", default)]
    pub format: Option<LogFormat>,
}
