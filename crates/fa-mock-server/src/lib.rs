// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Mock implementation of the farmer-assist prediction backend
//!
//! Serves the same routes as the hosted backend under `/api/`, with in-memory
//! model state, so the REST client and the CLI can be exercised without
//! network access.

pub mod error;
pub mod handlers;
pub mod server;
pub mod state;

pub use error::{ServerError, ServerResult};
pub use server::{spawn_ephemeral, Server, ServerConfig};
pub use state::{AppState, MockBackendOptions};
