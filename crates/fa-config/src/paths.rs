// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Configuration file path discovery

use std::path::PathBuf;

const APP_DIR: &str = "farmer-assist";
const CONFIG_FILE: &str = "config.toml";

/// Configuration file paths for different scopes
#[derive(Debug, Clone)]
pub struct Paths {
    pub system: PathBuf,
    pub user: PathBuf,
    pub cli_config: Option<PathBuf>,
}

/// Discover configuration file paths for the current environment
pub fn discover_paths(cli_config: Option<PathBuf>) -> Paths {
    Paths {
        system: get_system_config_path(),
        user: get_user_config_path(),
        cli_config,
    }
}

/// Get system configuration path based on platform
fn get_system_config_path() -> PathBuf {
    if cfg!(target_os = "macos") {
        PathBuf::from("/Library/Application Support").join(APP_DIR).join(CONFIG_FILE)
    } else if cfg!(target_os = "windows") {
        PathBuf::from(std::env::var("ProgramData").unwrap_or_else(|_| "C:\\ProgramData".into()))
            .join(APP_DIR)
            .join(CONFIG_FILE)
    } else {
        PathBuf::from("/etc").join(APP_DIR).join(CONFIG_FILE)
    }
}

/// Get user configuration path based on platform and FA_HOME
fn get_user_config_path() -> PathBuf {
    if let Ok(fa_home) = std::env::var("FA_HOME") {
        return PathBuf::from(fa_home).join(CONFIG_FILE);
    }

    let home = || PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| "/tmp".into()));
    if cfg!(target_os = "macos") {
        home().join("Library").join("Application Support").join(APP_DIR).join(CONFIG_FILE)
    } else if cfg!(target_os = "windows") {
        PathBuf::from(std::env::var("APPDATA").unwrap_or_else(|_| "C:\\".into()))
            .join(APP_DIR)
            .join(CONFIG_FILE)
    } else {
        std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| home().join(".config"))
            .join(APP_DIR)
            .join(CONFIG_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn fa_home_overrides_user_path() {
        std::env::set_var("FA_HOME", "/srv/fa");
        let paths = discover_paths(Some(PathBuf::from("extra.toml")));
        std::env::remove_var("FA_HOME");

        assert_eq!(paths.user, PathBuf::from("/srv/fa/config.toml"));
        assert_eq!(paths.cli_config, Some(PathBuf::from("extra.toml")));
        assert!(paths.system.ends_with("farmer-assist/config.toml"));
    }
}
