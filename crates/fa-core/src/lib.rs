// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Page flows of farmer-assist
//!
//! Each flow owns the state one page holds (form fields, fetched options,
//! the latest result and the error line) and drives the backend through a
//! [`fa_client_api::FarmApi`] implementation. A flow step is a single
//! request/response cycle; while it is awaited the page is "loading".

pub mod disease;
pub mod error;
pub mod preview;
pub mod recommendation;
pub mod yield_estimate;

pub use disease::DiseaseDetectionFlow;
pub use error::{FlowError, FlowResult};
pub use recommendation::{CropRecommendationFlow, RecommendationCard};
pub use yield_estimate::YieldEstimateFlow;

/// Error shown when the backend cannot be reached from the recommendation and yield pages
pub const CONNECT_FAILURE: &str = "Failed to connect to server";

/// Error shown when the backend cannot be reached from the disease page
pub const CONNECT_FAILURE_RETRY: &str = "Failed to connect to server. Please try again.";
