// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only
#![allow(clippy::disallowed_methods)] // CLI commands intentionally print to stdout/stderr

//! `disease` commands

use std::path::PathBuf;

use anyhow::Result;
use clap::Subcommand;
use fa_core::DiseaseDetectionFlow;

use crate::{render, Context};

#[derive(Subcommand, Debug, Clone)]
pub enum DiseaseCommands {
    /// Upload a leaf image and print the diagnosis
    Predict {
        /// Image file (JPEG, PNG, ...; at most 10MB)
        image: PathBuf,
    },
    /// Show whether the disease model is loaded
    Status,
    /// Load the disease model on the backend
    LoadModel,
    /// List crops the disease model recognises
    Crops,
}

impl DiseaseCommands {
    pub async fn run(self, ctx: &Context) -> Result<()> {
        let mut flow = DiseaseDetectionFlow::new(ctx.client.clone());
        match self {
            DiseaseCommands::Predict { image } => {
                flow.select_path(&image).await?;
                if !flow.check_model_status().await {
                    tracing::warn!("disease model reports not loaded; prediction may fail");
                }
                eprintln!("Analyzing...");
                let diagnosis = flow.predict().await?;
                render::emit(ctx.output, diagnosis, render::diagnosis)
            }
            DiseaseCommands::Status => {
                let status = ctx.client.disease_model_status().await?;
                render::emit(ctx.output, &status, |s| {
                    render::model_state("Disease model", s.is_loaded, "loaded", "not loaded")
                })
            }
            DiseaseCommands::LoadModel => {
                eprintln!("Loading disease model...");
                let response = flow.load_model().await?;
                render::emit(ctx.output, &response, |r| {
                    format!("{}\n", r.message.as_deref().unwrap_or("Model loaded"))
                })
            }
            DiseaseCommands::Crops => {
                let crops = ctx.client.disease_supported_crops().await?;
                render::emit(ctx.output, crops.as_slice(), render::list)
            }
        }
    }
}
