// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Shared state of the mock backend

use std::sync::Arc;
use tokio::sync::RwLock;

/// States offered by `available-states`
pub const STATES: [&str; 8] = [
    "Andhra Pradesh",
    "Bihar",
    "Gujarat",
    "Karnataka",
    "Maharashtra",
    "Punjab",
    "Tamil Nadu",
    "Uttar Pradesh",
];

/// Crops offered by `available-crops`, with a baseline yield in tonnes per hectare
pub const CROPS: [(&str, f64); 8] = [
    ("Rice", 2.6),
    ("Wheat", 3.1),
    ("Maize", 2.9),
    ("Cotton", 0.5),
    ("Sugarcane", 70.0),
    ("Soybean", 1.1),
    ("Potato", 22.0),
    ("Tomato", 24.0),
];

/// Crops the leaf classifier knows
pub const DISEASE_CROPS: [&str; 5] = ["Apple", "Corn", "Grape", "Potato", "Tomato"];

/// Model toggles of the mock backend
#[derive(Debug, Clone, Copy, Default)]
pub struct MockBackendOptions {
    pub yield_model_trained: bool,
    pub disease_model_loaded: bool,
}

#[derive(Debug, Default)]
struct Models {
    yield_trained: bool,
    disease_loaded: bool,
}

/// Application state shared by all handlers
#[derive(Debug, Clone, Default)]
pub struct AppState {
    models: Arc<RwLock<Models>>,
}

impl AppState {
    pub fn new(options: MockBackendOptions) -> Self {
        Self {
            models: Arc::new(RwLock::new(Models {
                yield_trained: options.yield_model_trained,
                disease_loaded: options.disease_model_loaded,
            })),
        }
    }

    pub async fn yield_trained(&self) -> bool {
        self.models.read().await.yield_trained
    }

    pub async fn mark_yield_trained(&self) {
        self.models.write().await.yield_trained = true;
    }

    pub async fn disease_loaded(&self) -> bool {
        self.models.read().await.disease_loaded
    }

    pub async fn mark_disease_loaded(&self) {
        self.models.write().await.disease_loaded = true;
    }
}
