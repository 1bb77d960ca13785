// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Route handlers of the mock backend
//!
//! Responses are deterministic functions of the request so tests can assert
//! on them: recommendations are scored from soil and season affinity, yields
//! from a per-crop baseline, and diagnoses from the uploaded bytes.

use axum::{
    extract::{Multipart, State},
    Json,
};
use axum_extra::extract::WithRejection;
use fa_api_contract::validation::{validate_leaf_image, validate_yield_request};
use fa_api_contract::*;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::error::{ServerError, ServerResult};
use crate::state::{AppState, CROPS, DISEASE_CROPS, STATES};

struct CropProfile {
    name: &'static str,
    soils: &'static [&'static str],
    seasons: &'static [&'static str],
    expected_yield: &'static str,
    tips: &'static str,
}

const PROFILES: [CropProfile; 8] = [
    CropProfile {
        name: "Rice",
        soils: &["Alluvial", "Laterite"],
        seasons: &["Kharif (Monsoon)"],
        expected_yield: "2.5-3.5 tons/ha",
        tips: "Keep fields flooded during tillering and transplant seedlings at 20-25 days.",
    },
    CropProfile {
        name: "Wheat",
        soils: &["Alluvial", "Black"],
        seasons: &["Rabi (Winter)"],
        expected_yield: "3-4 tons/ha",
        tips: "Sow by mid November and irrigate at crown root initiation.",
    },
    CropProfile {
        name: "Maize",
        soils: &["Alluvial", "Red", "Black"],
        seasons: &["Kharif (Monsoon)", "Zaid (Summer)"],
        expected_yield: "2.5-3 tons/ha",
        tips: "Ensure good drainage; waterlogging at knee height stunts the crop.",
    },
    CropProfile {
        name: "Cotton",
        soils: &["Black"],
        seasons: &["Kharif (Monsoon)"],
        expected_yield: "1.5-2 tons/ha",
        tips: "Monitor for bollworm from flowering onwards.",
    },
    CropProfile {
        name: "Sugarcane",
        soils: &["Alluvial", "Black"],
        seasons: &["Kharif (Monsoon)", "Zaid (Summer)"],
        expected_yield: "60-80 tons/ha",
        tips: "Plant setts with three buds and earth up at 90 days.",
    },
    CropProfile {
        name: "Soybean",
        soils: &["Black", "Red"],
        seasons: &["Kharif (Monsoon)"],
        expected_yield: "1-1.5 tons/ha",
        tips: "Treat seed with rhizobium culture before sowing.",
    },
    CropProfile {
        name: "Potato",
        soils: &["Alluvial", "Mountain"],
        seasons: &["Rabi (Winter)"],
        expected_yield: "20-25 tons/ha",
        tips: "Use certified seed tubers and earth up twice.",
    },
    CropProfile {
        name: "Tomato",
        soils: &["Red", "Alluvial", "Laterite"],
        seasons: &["Rabi (Winter)", "Zaid (Summer)"],
        expected_yield: "20-30 tons/ha",
        tips: "Stake plants and avoid overhead irrigation to limit blight.",
    },
];

struct DiseaseProfile {
    crop: &'static str,
    disease: &'static str,
    treatment: &'static [&'static str],
}

const DISEASES: [DiseaseProfile; 5] = [
    DiseaseProfile {
        crop: "Tomato",
        disease: "Late Blight",
        treatment: &[
            "Remove and destroy infected leaves",
            "Spray mancozeb or copper oxychloride every 7-10 days",
            "Avoid overhead irrigation",
        ],
    },
    DiseaseProfile {
        crop: "Potato",
        disease: "Early Blight",
        treatment: &[
            "Apply chlorothalonil at first symptoms",
            "Rotate crops for at least two seasons",
        ],
    },
    DiseaseProfile {
        crop: "Tomato",
        disease: "Bacterial Spot",
        treatment: &["Use copper based bactericides", "Plant disease free seed"],
    },
    DiseaseProfile {
        crop: "Corn",
        disease: "Common Rust",
        treatment: &["Plant resistant hybrids", "Apply fungicide if infection is early"],
    },
    DiseaseProfile {
        crop: "Apple",
        disease: "Healthy",
        treatment: &["No treatment needed; continue regular monitoring"],
    },
];

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "service": "farmer-assist-mock" }))
}

pub async fn yield_model_status(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "is_trained": state.yield_trained().await,
        "model_type": "RandomForestRegressor",
    }))
}

pub async fn available_crops() -> Json<CropList> {
    Json(CropList {
        crops: CROPS.iter().map(|(name, _)| name.to_string()).collect(),
    })
}

pub async fn available_states() -> Json<StateList> {
    Json(StateList {
        states: STATES.iter().map(|s| s.to_string()).collect(),
    })
}

pub async fn train(State(state): State<AppState>) -> Json<Value> {
    state.mark_yield_trained().await;
    info!("yield model trained");
    Json(json!({
        "message": "Model trained successfully",
        "r2_score": 0.87,
        "mae": 0.42,
        "training_samples": 19689,
    }))
}

pub async fn predict_yield(
    State(state): State<AppState>,
    WithRejection(Json(request), _): WithRejection<Json<YieldPredictionRequest>, ServerError>,
) -> ServerResult<Json<YieldPrediction>> {
    if !state.yield_trained().await {
        return Err(ServerError::ModelNotTrained);
    }
    validate_yield_request(&request)?;

    let baseline = CROPS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(request.crop.trim()))
        .map(|(_, baseline)| *baseline)
        .ok_or_else(|| ServerError::BadRequest(format!("Unknown crop: {}", request.crop)))?;

    let fertilizer_per_ha = request.fertilizer / request.area;
    let mut predicted = baseline * (1.0 + fertilizer_per_ha.min(400.0) / 1000.0);
    if let Some(rainfall) = request.annual_rainfall {
        predicted *= (rainfall / 1200.0).clamp(0.6, 1.2);
    }
    let predicted = (predicted * 100.0).round() / 100.0;

    let mut details = serde_json::Map::new();
    details.insert("crop".to_string(), json!(request.crop));
    details.insert("state".to_string(), json!(request.state));
    details.insert(
        "total_production".to_string(),
        json!((predicted * request.area * 100.0).round() / 100.0),
    );

    Ok(Json(YieldPrediction {
        predicted_yield: predicted,
        unit: Some("tonnes/hectare".to_string()),
        details,
    }))
}

pub async fn recommend_crops(
    WithRejection(Json(request), _): WithRejection<Json<CropRecommendationRequest>, ServerError>,
) -> ServerResult<Json<CropRecommendationResponse>> {
    if request.region.trim().is_empty() {
        return Ok(Json(rejected("Region is required")));
    }
    if let Err(err) = fa_api_contract::validation::validate_recommendation_request(&request) {
        return Ok(Json(rejected(&err.to_string())));
    }

    let soil = request.soil_type.as_deref().and_then(canonical_soil_type);
    let season = request.season.as_deref().and_then(canonical_season);
    let region_bias = request.region.bytes().map(u32::from).sum::<u32>() % 7;

    let mut recommendations: Vec<CropRecommendation> = PROFILES
        .iter()
        .enumerate()
        .map(|(i, profile)| {
            let mut score = 50.0 + ((i as u32 + region_bias) % 7) as f64;
            if soil.is_some_and(|s| profile.soils.contains(&s)) {
                score += 25.0;
            }
            if season.is_some_and(|s| profile.seasons.contains(&s)) {
                score += 18.0;
            }
            CropRecommendation {
                name: profile.name.to_string(),
                suitability: score.min(99.0),
                confidence: Some((score.min(99.0) / 100.0 * 0.9 * 1000.0).round() / 1000.0),
                expected_yield: YieldFigure::Text(profile.expected_yield.to_string()),
                tips: profile.tips.to_string(),
            }
        })
        .collect();
    recommendations.sort_by(|a, b| b.suitability.total_cmp(&a.suitability));
    recommendations.truncate(5);

    debug!(region = %request.region, count = recommendations.len(), "recommendations computed");
    Ok(Json(CropRecommendationResponse {
        success: true,
        recommendations,
        error: None,
    }))
}

fn rejected(message: &str) -> CropRecommendationResponse {
    CropRecommendationResponse {
        success: false,
        recommendations: vec![],
        error: Some(message.to_string()),
    }
}

pub async fn disease_model_status(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "is_loaded": state.disease_loaded().await,
        "model": "plant-village-cnn",
    }))
}

pub async fn load_disease_model(State(state): State<AppState>) -> Json<ModelLoadResponse> {
    state.mark_disease_loaded().await;
    info!("disease model loaded");
    Json(ModelLoadResponse {
        success: Some(true),
        message: Some("Model loaded successfully".to_string()),
        details: Default::default(),
    })
}

pub async fn disease_supported_crops() -> Json<Value> {
    Json(json!({ "supported_crops": DISEASE_CROPS }))
}

pub async fn predict_disease(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ServerResult<Json<DiseaseDiagnosisResponse>> {
    let mut image = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field
            .content_type()
            .map(str::to_string)
            .unwrap_or_else(|| content_type_for(&file_name).to_string());
        let bytes = field.bytes().await?;
        image = Some(LeafImage::with_content_type(file_name, content_type, bytes.to_vec()));
    }

    let image = image.ok_or_else(|| ServerError::BadRequest("No image provided".to_string()))?;
    if image.size() == 0 {
        return Err(ServerError::BadRequest("Empty image".to_string()));
    }
    validate_leaf_image(&image)?;
    if !state.disease_loaded().await {
        return Err(ServerError::ModelNotLoaded);
    }

    let digest = image.bytes.iter().fold(0usize, |acc, b| acc.wrapping_add(usize::from(*b)));
    let profile = &DISEASES[digest % DISEASES.len()];
    let confidence = 75.0 + (image.size() % 25) as f64 + 0.5;

    debug!(file = %image.file_name, disease = profile.disease, "leaf classified");
    Ok(Json(DiseaseDiagnosisResponse {
        success: true,
        prediction: Some(DiseasePrediction {
            crop: profile.crop.to_string(),
            disease: profile.disease.to_string(),
            confidence,
        }),
        treatment: profile.treatment.iter().map(|t| t.to_string()).collect(),
        error: None,
    }))
}
