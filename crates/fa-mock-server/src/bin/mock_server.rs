// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Dedicated binary that runs the mock prediction backend

use clap::Parser;
use fa_logging::{CliLogLevel, CliLoggingArgs};
use fa_mock_server::{AppState, MockBackendOptions, Server, ServerConfig};
use std::net::SocketAddr;

#[derive(Parser, Debug)]
#[command(author, version, about = "farmer-assist prediction API (mock backend)")]
struct Args {
    /// Bind address for the server
    #[arg(short, long, default_value = "127.0.0.1:5000")]
    bind: SocketAddr,

    /// Disable permissive CORS headers
    #[arg(long)]
    no_cors: bool,

    /// Start with the yield model already trained
    #[arg(long)]
    trained: bool,

    /// Start with the disease model already loaded
    #[arg(long)]
    loaded: bool,

    #[command(flatten)]
    logging: CliLoggingArgs,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    args.logging.init_with_default_level("fa-mock-server", CliLogLevel::Info)?;

    tracing::info!("Starting farmer-assist mock backend");

    let config = ServerConfig {
        bind_addr: args.bind,
        enable_cors: !args.no_cors,
    };
    let state = AppState::new(MockBackendOptions {
        yield_model_trained: args.trained,
        disease_model_loaded: args.loaded,
    });

    Server::new(config, state).run().await
}
