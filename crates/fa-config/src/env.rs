// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Environment variable overlay functionality

use anyhow::Result;
use serde_json::Value as J;

/// Variables under the `FA_` prefix that select config locations rather than values
const LOCATION_KEYS: &[&str] = &["home"];

/// Create JSON overlay from FA_* environment variables
pub fn env_overlay() -> Result<J> {
    // FA_REQUEST_TIMEOUT_SECS -> "request-timeout-secs"
    let built = config::Config::builder()
        .add_source(
            config::Environment::with_prefix("FA")
                .prefix_separator("_")
                .convert_case(config::Case::Kebab)
                .try_parsing(true),
        )
        .build()?;

    let mut map = built.try_deserialize::<serde_json::Map<String, J>>()?;
    for key in LOCATION_KEYS {
        map.remove(*key);
    }
    Ok(J::Object(map))
}

/// Create JSON overlay from CLI flag values keyed by dotted path
pub fn flags_overlay(pairs: &[(&str, J)]) -> J {
    let mut root = serde_json::json!({});
    for (k, v) in pairs {
        crate::merge::insert_dotted(&mut root, k, v.clone());
    }
    root
}
