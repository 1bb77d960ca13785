// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only
#![allow(clippy::disallowed_methods)] // CLI commands intentionally print to stdout/stderr

//! Configuration inspection commands
use anyhow::Result;
use clap::Subcommand;
use fa_config::{provenance::Provenance, Resolved};
use serde_json::Value;

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Show current configuration values
    Show {
        /// Show configuration for specific key
        key: Option<String>,
        /// Show origin information for each value
        #[arg(long)]
        show_origin: bool,
    },
    /// Get the value of a configuration key
    Get {
        /// Configuration key to get
        key: String,
    },
    /// Explain where a configuration value comes from
    Explain {
        /// Configuration key to explain
        key: String,
    },
}

impl ConfigCommands {
    pub fn run(self, resolved: &Resolved) -> Result<()> {
        let output = match self {
            ConfigCommands::Show { key, show_origin } => {
                show_config(resolved, key.as_deref(), show_origin)
            }
            ConfigCommands::Get { key } => match get_nested_value(&resolved.json, &key) {
                Some(value) => format!("{}\n", value),
                None => anyhow::bail!("Configuration key '{}' not found", key),
            },
            ConfigCommands::Explain { key } => explain_config(resolved, &key)?,
        };
        print!("{}", output);
        Ok(())
    }
}

fn show_config(resolved: &Resolved, key_filter: Option<&str>, show_origin: bool) -> String {
    let mut out = String::new();
    match key_filter {
        Some(filter) => match get_nested_value(&resolved.json, filter) {
            Some(value) => {
                out.push_str(&format_entry(filter, &value, show_origin, &resolved.provenance))
            }
            None => out.push_str(&format!("Configuration key '{}' not found\n", filter)),
        },
        None => print_json_with_provenance(
            &resolved.json,
            "",
            show_origin,
            &resolved.provenance,
            &mut out,
        ),
    }
    if out.is_empty() {
        out.push_str("No configuration values set; built-in defaults apply\n");
    }
    out
}

fn explain_config(resolved: &Resolved, key: &str) -> Result<String> {
    let Some(scope) = resolved.provenance.origin_of(key) else {
        anyhow::bail!("Configuration key '{}' not found", key);
    };

    let mut out = format!("Configuration key: {}\nWinning scope: {}\n", key, scope);
    if let Some(changes) = resolved.provenance.changes.get(key) {
        out.push_str("Change history:\n");
        for (change_scope, value) in changes {
            out.push_str(&format!("  {}: {}\n", change_scope, value));
        }
    }
    Ok(out)
}

fn get_nested_value(json: &Value, path: &str) -> Option<String> {
    let mut current = json;
    for part in path.split('.') {
        current = current.get(part)?;
    }
    Some(format!("{}", current))
}

fn format_entry(key: &str, value: &str, show_origin: bool, provenance: &Provenance) -> String {
    match provenance.origin_of(key) {
        Some(scope) if show_origin => format!("{}={} (from {})\n", key, value, scope),
        _ => format!("{}={}\n", key, value),
    }
}

fn print_json_with_provenance(
    json: &Value,
    prefix: &str,
    show_origin: bool,
    provenance: &Provenance,
    out: &mut String,
) {
    match json {
        Value::Object(obj) => {
            for (key, value) in obj {
                let full_key = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                print_json_with_provenance(value, &full_key, show_origin, provenance, out);
            }
        }
        Value::Null => {}
        _ => out.push_str(&format_entry(prefix, &json.to_string(), show_origin, provenance)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fa_config::Scope;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn resolved() -> Resolved {
        let mut provenance = Provenance::default();
        provenance.winner.insert("api-base-url".into(), Scope::Flags);
        provenance.winner.insert("request-timeout-secs".into(), Scope::User);
        provenance.changes.insert(
            "api-base-url".into(),
            vec![
                (Scope::User, json!("http://user/api/")),
                (Scope::Flags, json!("http://flag/api/")),
            ],
        );
        Resolved {
            json: json!({
                "api-base-url": "http://flag/api/",
                "request-timeout-secs": 30
            }),
            provenance,
        }
    }

    #[test]
    fn show_with_origin() {
        assert_eq!(
            show_config(&resolved(), None, true),
            "api-base-url=\"http://flag/api/\" (from flags)\nrequest-timeout-secs=30 (from user)\n"
        );
        assert_eq!(
            show_config(&resolved(), Some("request-timeout-secs"), false),
            "request-timeout-secs=30\n"
        );
    }

    #[test]
    fn explain_lists_history() {
        assert_eq!(
            explain_config(&resolved(), "api-base-url").unwrap(),
            "Configuration key: api-base-url\nWinning scope: flags\nChange history:\n  \
             user: \"http://user/api/\"\n  flags: \"http://flag/api/\"\n"
        );
        assert!(explain_config(&resolved(), "output").is_err());
    }

    #[test]
    fn empty_configuration_mentions_defaults() {
        let resolved = Resolved {
            json: json!({}),
            provenance: Provenance::default(),
        };
        assert_eq!(
            show_config(&resolved, None, false),
            "No configuration values set; built-in defaults apply\n"
        );
    }
}
