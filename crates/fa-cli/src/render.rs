// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only
#![allow(clippy::disallowed_methods)] // CLI output goes to stdout

//! Text and JSON rendering of command results

use std::fmt::Write as _;

use anyhow::Result;
use fa_api_contract::*;
use fa_core::RecommendationCard;
use serde::{Deserialize, Serialize};

/// Output format for command results
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// The typed response as pretty-printed JSON
    Json,
}

/// Print `value` as JSON, or the text produced by `text`
pub fn emit<T: Serialize + ?Sized>(
    output: OutputFormat,
    value: &T,
    text: impl FnOnce(&T) -> String,
) -> Result<()> {
    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Text => print!("{}", text(value)),
    }
    Ok(())
}

pub fn recommendation_cards(cards: &[RecommendationCard]) -> String {
    if cards.is_empty() {
        return "No recommendations returned\n".to_string();
    }
    let mut out = String::from("Recommended crops\n");
    for card in cards {
        let crop = &card.recommendation;
        let _ = writeln!(out, "\n{} {}", card.icon, crop.name);
        let _ = write!(out, "   {}% suitable", display_number(crop.suitability));
        if let Some(confidence) = crop.confidence_percent() {
            let _ = write!(out, "  (confidence {})", confidence);
        }
        out.push('\n');
        let _ = writeln!(out, "   Expected yield: {}", crop.expected_yield);
        if !crop.tips.is_empty() {
            let _ = writeln!(out, "   Tips: {}", crop.tips);
        }
    }
    out
}

pub fn diagnosis(diagnosis: &DiseaseDiagnosis) -> String {
    let prediction = &diagnosis.prediction;
    let mut out = String::new();
    let _ = writeln!(out, "Detection result [{}]", diagnosis.severity());
    let _ = writeln!(out, "  Crop:       {}", prediction.crop);
    let _ = writeln!(out, "  Disease:    {}", prediction.disease);
    let _ = writeln!(out, "  Confidence: {}%", display_number(prediction.confidence));
    if !diagnosis.treatment.is_empty() {
        out.push_str("\nTreatment recommendations\n");
        for step in &diagnosis.treatment {
            let _ = writeln!(out, "  • {}", step);
        }
    }
    out
}

pub fn yield_prediction(prediction: &YieldPrediction) -> String {
    let unit = prediction.unit.as_deref().unwrap_or("tonnes/hectare");
    let mut out = format!(
        "Predicted yield: {} {}\n",
        display_number(prediction.predicted_yield),
        unit
    );
    for (key, value) in &prediction.details {
        let value = match value {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Number(n) => n.as_f64().map(display_number).unwrap_or_else(|| n.to_string()),
            other => other.to_string(),
        };
        let _ = writeln!(out, "  {}: {}", key.replace('_', " "), value);
    }
    out
}

pub fn list(items: &[String]) -> String {
    items.iter().map(|item| format!("{item}\n")).collect()
}

pub fn model_state(name: &str, ready: bool, ready_word: &str, idle_word: &str) -> String {
    format!("{}: {}\n", name, if ready { ready_word } else { idle_word })
}
