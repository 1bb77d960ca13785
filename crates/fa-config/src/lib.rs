// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Configuration engine with schema validation, merging, and provenance tracking.
//!
//! Configuration is loaded from TOML files, `FA_*` environment variables and
//! command-line flags. All layers are merged as `serde_json::Value` so the
//! engine stays field-agnostic; typed views are extracted at the end with
//! [`extract::get`].

pub mod env;
pub mod extract;
pub mod loader;
pub mod merge;
pub mod paths;
pub mod provenance;
pub mod schema;

pub use provenance::{Scope, Scope::*};
pub use schema::SchemaRoot;

use anyhow::{Context, Result};
use serde_json::Value as J;

/// Final resolved configuration with provenance information
#[derive(Debug)]
pub struct Resolved {
    /// Final merged JSON configuration
    pub json: J,
    /// Provenance tracking for all configuration values
    pub provenance: provenance::Provenance,
}

/// Load and merge all configuration layers according to precedence rules
///
/// Precedence order: system < user < env < cli-config < flags
///
/// A missing file is skipped. A present but malformed or schema-violating
/// file is an error, and so are schema-violating environment or flag values.
pub fn load_all(paths: &paths::Paths, flag_sets: &[(&str, J)]) -> Result<Resolved> {
    let mut prov = provenance::Provenance::default();
    let mut json = serde_json::json!({});

    let system_layer = read_if_exists(Some(&paths.system), System)?;
    let user_layer = read_if_exists(Some(&paths.user), User)?;
    let env_layer = env::env_overlay()?;
    loader::validate_against_schema(&env_layer).context("validating FA_* environment")?;
    let cli_config_layer = read_if_exists(paths.cli_config.as_ref(), CliConfig)?;
    let flags_layer = env::flags_overlay(flag_sets);
    loader::validate_against_schema(&flags_layer).context("validating command-line flags")?;

    let layers = [
        (system_layer.as_ref().map(|l| &l.json), System),
        (user_layer.as_ref().map(|l| &l.json), User),
        (Some(&env_layer), Env),
        (cli_config_layer.as_ref().map(|l| &l.json), CliConfig),
        (Some(&flags_layer), Flags),
    ];

    for (layer, scope) in layers {
        if let Some(layer) = layer {
            merge::merge_two_json(&mut json, layer.clone());
            record_layer_provenance(layer, scope, &mut prov, "");
        }
    }

    Ok(Resolved {
        json,
        provenance: prov,
    })
}

fn read_if_exists(
    path: Option<&std::path::PathBuf>,
    scope: Scope,
) -> Result<Option<loader::Layer>> {
    match path {
        Some(p) if p.exists() => Ok(Some(loader::read_layer_from_file(p, scope)?)),
        _ => Ok(None),
    }
}

/// Record provenance for all values in a layer
fn record_layer_provenance(
    layer: &J,
    scope: Scope,
    prov: &mut provenance::Provenance,
    prefix: &str,
) {
    match layer {
        J::Object(obj) => {
            for (k, v) in obj {
                let pfx = if prefix.is_empty() {
                    k.clone()
                } else {
                    format!("{}.{}", prefix, k)
                };
                record_layer_provenance(v, scope, prov, &pfx);
            }
        }
        J::Null => {}
        _ => {
            prov.winner.insert(prefix.to_string(), scope);
            prov.changes.entry(prefix.to_string()).or_default().push((scope, layer.clone()));
        }
    }
}
