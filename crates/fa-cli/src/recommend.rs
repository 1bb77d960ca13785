// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only
#![allow(clippy::disallowed_methods)] // CLI commands intentionally print to stdout/stderr

//! `recommend` and `regions` commands

use anyhow::Result;
use clap::Args;
use fa_api_contract::{canonical_season, canonical_soil_type};
use fa_core::CropRecommendationFlow;

use crate::{render, Context};

/// Farm parameters for a crop recommendation
#[derive(Args, Debug, Clone)]
pub struct RecommendArgs {
    /// Region or state of the farm
    #[arg(long)]
    pub region: Option<String>,

    /// Cultivated area in hectares
    #[arg(long, default_value_t = 1.0)]
    pub area: f64,

    /// Fertilizer in kilograms
    #[arg(long, default_value_t = 50.0)]
    pub fertilizer: f64,

    /// Pesticide in litres
    #[arg(long, default_value_t = 10.0)]
    pub pesticide: f64,

    /// Soil type (Alluvial, Black, Red, Laterite, Desert, Mountain)
    #[arg(long)]
    pub soil_type: Option<String>,

    /// Season (Kharif, Rabi or Zaid)
    #[arg(long)]
    pub season: Option<String>,
}

impl RecommendArgs {
    pub async fn run(self, ctx: &Context) -> Result<()> {
        let mut flow = CropRecommendationFlow::new(ctx.client.clone());
        self.fill(flow.form_mut());

        eprintln!("Getting crop recommendations...");
        let cards = flow.submit().await?;
        render::emit(ctx.output, cards, render::recommendation_cards)
    }

    /// Copy the flags into the form, spelling soil and season the way the
    /// backend expects. Unknown names are passed through so validation can
    /// report them.
    fn fill(self, form: &mut fa_api_contract::CropRecommendationRequest) {
        form.region = self.region.unwrap_or_default();
        form.area = self.area;
        form.fertilizer = self.fertilizer;
        form.pesticide = self.pesticide;
        form.soil_type = self
            .soil_type
            .map(|s| canonical_soil_type(&s).map(str::to_string).unwrap_or(s));
        form.season = self.season.map(|s| canonical_season(&s).map(str::to_string).unwrap_or(s));
    }
}

/// List the regions offered by the recommendation form
pub async fn run_regions(ctx: &Context) -> Result<()> {
    let mut flow = CropRecommendationFlow::new(ctx.client.clone());
    let regions = flow.load_regions().await;
    render::emit(ctx.output, regions, render::list)
}
