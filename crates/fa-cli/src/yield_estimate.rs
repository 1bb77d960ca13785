// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only
#![allow(clippy::disallowed_methods)] // CLI commands intentionally print to stdout/stderr

//! `yield` commands

use anyhow::Result;
use clap::{Args, Subcommand};
use fa_api_contract::YieldPredictionRequest;
use fa_core::YieldEstimateFlow;

use crate::{render, Context};

#[derive(Subcommand, Debug, Clone)]
pub enum YieldCommands {
    /// Estimate the yield of a crop
    Predict(YieldPredictArgs),
    /// Train the yield model on the backend's dataset
    Train,
    /// List crops the yield model knows
    Crops,
    /// List states the yield model knows
    States,
    /// Show whether the yield model is trained
    Status,
}

#[derive(Args, Debug, Clone)]
pub struct YieldPredictArgs {
    #[arg(long)]
    pub crop: String,

    #[arg(long)]
    pub state: String,

    /// Season as labelled in the dataset (Kharif, Rabi, Whole Year, ...)
    #[arg(long)]
    pub season: String,

    /// Cultivated area in hectares
    #[arg(long, default_value_t = 1.0)]
    pub area: f64,

    /// Fertilizer in kilograms
    #[arg(long, default_value_t = 50.0)]
    pub fertilizer: f64,

    /// Pesticide in litres
    #[arg(long, default_value_t = 10.0)]
    pub pesticide: f64,

    /// Annual rainfall in millimetres
    #[arg(long)]
    pub rainfall: Option<f64>,

    #[arg(long)]
    pub year: Option<u16>,
}

impl From<YieldPredictArgs> for YieldPredictionRequest {
    fn from(args: YieldPredictArgs) -> Self {
        YieldPredictionRequest {
            crop: args.crop,
            state: args.state,
            season: args.season,
            area: args.area,
            fertilizer: args.fertilizer,
            pesticide: args.pesticide,
            annual_rainfall: args.rainfall,
            crop_year: args.year,
        }
    }
}

impl YieldCommands {
    pub async fn run(self, ctx: &Context) -> Result<()> {
        let mut flow = YieldEstimateFlow::new(ctx.client.clone());
        match self {
            YieldCommands::Predict(args) => {
                *flow.form_mut() = args.into();
                let prediction = flow.submit().await?;
                render::emit(ctx.output, prediction, render::yield_prediction)
            }
            YieldCommands::Train => {
                eprintln!("Training yield model, this can take a while...");
                let report = flow.train().await?;
                render::emit(ctx.output, &report, |r| {
                    format!("{}\n", r.message.as_deref().unwrap_or("Model trained"))
                })
            }
            YieldCommands::Crops => {
                let crops = ctx.client.available_crops().await?;
                render::emit(ctx.output, crops.as_slice(), render::list)
            }
            YieldCommands::States => {
                let states = ctx.client.available_states().await?;
                render::emit(ctx.output, states.as_slice(), render::list)
            }
            YieldCommands::Status => {
                let status = ctx.client.yield_model_status().await?;
                render::emit(ctx.output, &status, |s| {
                    render::model_state("Yield model", s.is_trained, "trained", "not trained")
                })
            }
        }
    }
}
