// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! farmer-assist prediction API contract types and validation
//!
//! This crate defines the request and response shapes of the remote
//! prediction backend, the table of endpoints the clients call, and the
//! client-side validation applied before any request leaves the machine.
//! The types are shared between the REST client, the mock client, the
//! mock server and the CLI.

pub mod catalog;
pub mod endpoints;
pub mod error;
pub mod image;
pub mod types;
pub mod validation;

pub use catalog::*;
pub use endpoints::*;
pub use error::*;
pub use image::*;
pub use types::*;
