// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Validation helpers for API contract types

use crate::error::ApiContractError;
use crate::image::{LeafImage, MAX_IMAGE_BYTES};
use crate::types::*;
use validator::{Validate, ValidationErrors};

/// Validate a crop recommendation request
pub fn validate_recommendation_request(
    request: &CropRecommendationRequest,
) -> Result<(), ApiContractError> {
    if request.region.trim().is_empty() {
        return Err(ApiContractError::Validation("Please select a region".to_string()));
    }
    ensure_finite(&[
        ("area", request.area),
        ("fertilizer", request.fertilizer),
        ("pesticide", request.pesticide),
    ])?;
    request.validate()?;
    if let Some(soil) = request.soil_type.as_deref() {
        if crate::canonical_soil_type(soil).is_none() {
            return Err(ApiContractError::InvalidSoilType(soil.to_string()));
        }
    }
    if let Some(season) = request.season.as_deref() {
        if crate::canonical_season(season).is_none() {
            return Err(ApiContractError::InvalidSeason(season.to_string()));
        }
    }
    Ok(())
}

/// Validate a yield prediction request
///
/// Seasons are not restricted to [`crate::SEASONS`]: the yield dataset uses
/// its own labels ("Whole Year", "Autumn", ...).
pub fn validate_yield_request(request: &YieldPredictionRequest) -> Result<(), ApiContractError> {
    for (label, value) in [
        ("crop", &request.crop),
        ("state", &request.state),
        ("season", &request.season),
    ] {
        if value.trim().is_empty() {
            return Err(ApiContractError::Validation(format!("Please select a {}", label)));
        }
    }
    ensure_finite(&[
        ("area", request.area),
        ("fertilizer", request.fertilizer),
        ("pesticide", request.pesticide),
        ("annual_rainfall", request.annual_rainfall.unwrap_or(0.0)),
    ])?;
    request.validate()?;
    Ok(())
}

/// Validate an image picked for disease detection
pub fn validate_leaf_image(image: &LeafImage) -> Result<(), ApiContractError> {
    if !image.is_image() {
        return Err(ApiContractError::NotAnImage {
            content_type: image.content_type.clone(),
        });
    }
    if image.size() > MAX_IMAGE_BYTES {
        return Err(ApiContractError::ImageTooLarge { size: image.size() });
    }
    Ok(())
}

/// First human-readable message out of a validator error set
///
/// Fields are visited in name order so the reported message is stable.
pub fn first_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by_key(|(field, _)| field.to_string());
    for (field, errs) in fields {
        if let Some(err) = errs.first() {
            return match &err.message {
                Some(message) => message.to_string(),
                None => format!("Invalid value for {}", field),
            };
        }
    }
    "Invalid request".to_string()
}

fn ensure_finite(values: &[(&str, f64)]) -> Result<(), ApiContractError> {
    for (field, value) in values {
        if !value.is_finite() {
            return Err(ApiContractError::Validation(format!(
                "{} must be a number",
                field
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_recommendation() -> CropRecommendationRequest {
        CropRecommendationRequest {
            region: "Punjab".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_recommendation_request_valid() {
        assert!(validate_recommendation_request(&valid_recommendation()).is_ok());
    }

    #[test]
    fn test_validate_recommendation_request_missing_region() {
        let request = CropRecommendationRequest {
            region: "  ".to_string(),
            ..valid_recommendation()
        };
        let err = validate_recommendation_request(&request).unwrap_err();
        assert_eq!(err.to_string(), "Please select a region");
    }

    #[test]
    fn test_validate_recommendation_request_small_area() {
        let request = CropRecommendationRequest {
            area: 0.05,
            ..valid_recommendation()
        };
        let err = validate_recommendation_request(&request).unwrap_err();
        assert_eq!(err.to_string(), "Area must be at least 0.1 hectares");
    }

    #[test]
    fn test_validate_recommendation_request_negative_inputs() {
        let request = CropRecommendationRequest {
            pesticide: -1.0,
            ..valid_recommendation()
        };
        assert_eq!(
            validate_recommendation_request(&request).unwrap_err().to_string(),
            "Pesticide cannot be negative"
        );
    }

    #[test]
    fn test_validate_recommendation_request_nan() {
        let request = CropRecommendationRequest {
            fertilizer: f64::NAN,
            ..valid_recommendation()
        };
        assert!(validate_recommendation_request(&request).is_err());
    }

    #[test]
    fn test_validate_recommendation_request_unknown_soil() {
        let request = CropRecommendationRequest {
            soil_type: Some("Clay".to_string()),
            ..valid_recommendation()
        };
        assert!(matches!(
            validate_recommendation_request(&request),
            Err(ApiContractError::InvalidSoilType(_))
        ));
    }

    #[test]
    fn test_validate_yield_request() {
        let mut request = YieldPredictionRequest {
            crop: "Rice".to_string(),
            state: "Assam".to_string(),
            season: "Kharif".to_string(),
            ..Default::default()
        };
        assert!(validate_yield_request(&request).is_ok());

        request.annual_rainfall = Some(-3.0);
        assert_eq!(
            validate_yield_request(&request).unwrap_err().to_string(),
            "Rainfall cannot be negative"
        );

        request.annual_rainfall = None;
        request.crop.clear();
        assert_eq!(
            validate_yield_request(&request).unwrap_err().to_string(),
            "Please select a crop"
        );
    }

    #[test]
    fn test_validate_leaf_image_rejects_non_images() {
        let image = LeafImage::new("notes.txt", b"hello".to_vec());
        let err = validate_leaf_image(&image).unwrap_err();
        assert_eq!(err.to_string(), "Please select an image file (JPEG, PNG, etc.)");
    }

    #[test]
    fn test_validate_leaf_image_size_limit() {
        let at_limit = LeafImage::new("leaf.jpg", vec![0; MAX_IMAGE_BYTES]);
        assert!(validate_leaf_image(&at_limit).is_ok());

        let over = LeafImage::new("leaf.jpg", vec![0; MAX_IMAGE_BYTES + 1]);
        let err = validate_leaf_image(&over).unwrap_err();
        assert_eq!(err.to_string(), "Image size should be less than 10MB");
    }
}
