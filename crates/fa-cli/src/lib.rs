// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! farmer-assist command-line interface
//!
//! One subcommand per page operation of the farmer-assist app. Results go to
//! stdout (text or JSON); progress lines, logs and errors go to stderr.

use std::path::PathBuf;

use clap::Subcommand;
use fa_logging::CliLoggingArgs;
use fa_rest_client::RestClient;
use serde_json::Value;

pub use clap::Parser;

pub mod config;
pub mod config_commands;
pub mod disease;
pub mod health;
pub mod recommend;
pub mod render;
pub mod yield_estimate;

use render::OutputFormat;

/// What every backend command needs
pub struct Context {
    pub client: RestClient,
    pub output: OutputFormat,
}

#[derive(clap::Parser, Debug)]
#[command(
    name = "farmer-assist",
    about = "Crop recommendations, yield estimates and leaf disease detection",
    version,
    propagate_version = true
)]
pub struct Cli {
    /// Extra configuration file, layered above the user configuration
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Prediction API base URL (including /api/)
    #[arg(long = "api-url", global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Result format on stdout
    #[arg(long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    #[command(flatten)]
    pub logging: CliLoggingArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Recommend crops for a farm
    Recommend(recommend::RecommendArgs),
    /// List the regions available for recommendations
    Regions,
    /// Detect plant diseases from leaf images
    Disease {
        #[command(subcommand)]
        subcommand: disease::DiseaseCommands,
    },
    /// Estimate crop yields
    Yield {
        #[command(subcommand)]
        subcommand: yield_estimate::YieldCommands,
    },
    /// Check that the backend is up
    Health,
    /// Inspect the resolved configuration
    Config {
        #[command(subcommand)]
        subcommand: config_commands::ConfigCommands,
    },
}

impl Cli {
    /// Flags that override configuration keys, as (key, value) pairs
    pub fn flag_overrides(&self) -> anyhow::Result<Vec<(&'static str, Value)>> {
        let mut flags = Vec::new();
        if let Some(url) = &self.api_url {
            flags.push(("api-base-url", Value::String(url.clone())));
        }
        if let Some(timeout) = self.timeout {
            flags.push(("request-timeout-secs", Value::from(timeout)));
        }
        if let Some(output) = self.output {
            flags.push(("output", serde_json::to_value(output)?));
        }
        if let Some(level) = self.logging.log_level {
            flags.push(("log-level", Value::String(level.to_string())));
        }
        if let Some(format) = self.logging.log_format {
            flags.push(("log-format", Value::String(format.to_string())));
        }
        Ok(flags)
    }

    /// Resolve configuration, initialise logging and run the subcommand
    pub async fn run(self) -> anyhow::Result<()> {
        let flags = self.flag_overrides()?;
        let resolved = config::load_resolved(self.config.as_deref(), &flags)?;
        let config: config::Config = fa_config::extract::get(&resolved.json)?;

        self.logging.with_config_defaults(&config.logging).init("farmer-assist")?;
        tracing::debug!(api = %config.network.base_url(), "configuration resolved");

        if let Commands::Config { subcommand } = self.command {
            return subcommand.run(&resolved);
        }

        let ctx = Context {
            client: RestClient::from_config(&config.network)?,
            output: config.output.unwrap_or_default(),
        };
        match self.command {
            Commands::Recommend(args) => args.run(&ctx).await,
            Commands::Regions => recommend::run_regions(&ctx).await,
            Commands::Disease { subcommand } => subcommand.run(&ctx).await,
            Commands::Yield { subcommand } => subcommand.run(&ctx).await,
            Commands::Health => health::run(&ctx).await,
            Commands::Config { .. } => Ok(()),
        }
    }
}
