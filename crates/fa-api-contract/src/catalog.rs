// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Fixed option lists and display lookups used by the forms

use serde::{Deserialize, Serialize};

/// Soil types offered by the recommendation form
pub const SOIL_TYPES: [&str; 6] = ["Alluvial", "Black", "Red", "Laterite", "Desert", "Mountain"];

/// Cropping seasons offered by the forms
pub const SEASONS: [&str; 3] = ["Kharif (Monsoon)", "Rabi (Winter)", "Zaid (Summer)"];

/// Regions shown when the backend's state list is unavailable
pub const FALLBACK_REGIONS: [&str; 5] = [
    "North India",
    "South India",
    "West India",
    "East India",
    "Central India",
];

/// Diseases flagged as severe in diagnosis results
pub const SEVERE_DISEASES: [&str; 3] = ["Late Blight", "Early Blight", "Bacterial Spot"];

const DEFAULT_CROP_ICON: &str = "🌱";

/// Icon shown next to a recommended crop
pub fn crop_icon(crop_name: &str) -> &'static str {
    match crop_name {
        "Rice" | "Wheat" | "Barley" => "🌾",
        "Maize" | "Corn" => "🌽",
        "Cotton" => "🧵",
        "Sugarcane" => "🎋",
        "Soybean" => "🫘",
        "Potato" => "🥔",
        "Tomato" => "🍅",
        _ => DEFAULT_CROP_ICON,
    }
}

/// Severity badge of a diagnosis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Severe,
    Moderate,
}

impl Severity {
    pub fn of_disease(disease: &str) -> Self {
        if SEVERE_DISEASES.contains(&disease) {
            Severity::Severe
        } else {
            Severity::Moderate
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Severe => write!(f, "Severe"),
            Severity::Moderate => write!(f, "Moderate"),
        }
    }
}

/// Resolve user input to one of [`SOIL_TYPES`], ignoring case
pub fn canonical_soil_type(input: &str) -> Option<&'static str> {
    let needle = input.trim();
    SOIL_TYPES.iter().copied().find(|s| s.eq_ignore_ascii_case(needle))
}

/// Resolve user input to one of [`SEASONS`]
///
/// Accepts the full label or its leading word ("kharif", "rabi", "zaid").
pub fn canonical_season(input: &str) -> Option<&'static str> {
    let needle = input.trim();
    SEASONS.iter().copied().find(|s| {
        s.eq_ignore_ascii_case(needle)
            || s.split_whitespace().next().is_some_and(|w| w.eq_ignore_ascii_case(needle))
    })
}
