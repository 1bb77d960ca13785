// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! `health` command

use anyhow::Result;

use crate::{render, Context};

pub async fn run(ctx: &Context) -> Result<()> {
    let status = ctx.client.health().await?;
    render::emit(ctx.output, &status, |s| {
        format!("Backend at {}: {}\n", ctx.client.base_url(), s.state())
    })
}
