// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Crop recommendation page

use fa_api_contract::validation::validate_recommendation_request;
use fa_api_contract::*;
use fa_client_api::FarmApi;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{FlowError, FlowResult};
use crate::CONNECT_FAILURE;

/// A recommendation as rendered on the page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationCard {
    pub icon: &'static str,
    #[serde(flatten)]
    pub recommendation: CropRecommendation,
}

impl From<CropRecommendation> for RecommendationCard {
    fn from(recommendation: CropRecommendation) -> Self {
        Self {
            icon: crop_icon(&recommendation.name),
            recommendation,
        }
    }
}

/// State of the crop recommendation page
pub struct CropRecommendationFlow<C: FarmApi> {
    client: C,
    form: CropRecommendationRequest,
    regions: Vec<String>,
    cards: Vec<RecommendationCard>,
    error: Option<String>,
}

impl<C: FarmApi> CropRecommendationFlow<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            form: CropRecommendationRequest::default(),
            regions: Vec::new(),
            cards: Vec::new(),
            error: None,
        }
    }

    pub fn form(&self) -> &CropRecommendationRequest {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut CropRecommendationRequest {
        &mut self.form
    }

    pub fn regions(&self) -> &[String] {
        &self.regions
    }

    pub fn cards(&self) -> &[RecommendationCard] {
        &self.cards
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Fetch the selectable regions, falling back to the fixed list of
    /// regions when the backend fails or returns none. Never fails.
    pub async fn load_regions(&mut self) -> &[String] {
        self.regions = match self.client.available_states().await {
            Ok(states) if !states.is_empty() => states,
            Ok(_) => {
                warn!("backend returned no states, using fallback regions");
                fallback_regions()
            }
            Err(e) => {
                warn!("Failed to fetch states: {}", e);
                fallback_regions()
            }
        };
        &self.regions
    }

    /// Validate the form, request recommendations and store them as cards
    pub async fn submit(&mut self) -> FlowResult<&[RecommendationCard]> {
        self.cards.clear();
        self.error = None;

        if let Err(err) = validate_recommendation_request(&self.form) {
            return Err(self.fail(FlowError::Invalid(err.to_string())));
        }

        debug!(region = %self.form.region, "requesting crop recommendations");
        match self.client.recommend_crops(&self.form).await {
            Ok(recommendations) => {
                self.cards = recommendations.into_iter().map(RecommendationCard::from).collect();
                Ok(&self.cards)
            }
            Err(e) => Err(self.fail(FlowError::request(e, CONNECT_FAILURE))),
        }
    }

    fn fail(&mut self, err: FlowError) -> FlowError {
        self.error = Some(err.to_string());
        err
    }
}

fn fallback_regions() -> Vec<String> {
    FALLBACK_REGIONS.iter().map(|r| r.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fa_client_api::FarmApiError;
    use fa_rest_mock_client::MockFarmClient;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn regions_come_from_backend() {
        let mut flow = CropRecommendationFlow::new(MockFarmClient::new());
        assert_eq!(flow.load_regions().await, ["Karnataka", "Punjab", "Tamil Nadu"]);
    }

    #[tokio::test]
    async fn regions_fall_back_on_failure_or_empty_list() {
        let client = MockFarmClient::new();
        client
            .fail(
                Endpoint::AvailableStates,
                FarmApiError::Transport("connection refused".to_string()),
            )
            .await;
        let mut flow = CropRecommendationFlow::new(client.clone());
        assert_eq!(flow.load_regions().await, FALLBACK_REGIONS);

        client.clear_failure(Endpoint::AvailableStates).await;
        client.set_states(vec![]).await;
        assert_eq!(flow.load_regions().await, FALLBACK_REGIONS);
    }

    #[tokio::test]
    async fn unknown_crops_get_the_generic_icon() {
        let client = MockFarmClient::new();
        let crop = |name: &str| CropRecommendation {
            name: name.to_string(),
            suitability: 70.0,
            confidence: None,
            expected_yield: YieldFigure::Number(40.0),
            tips: String::new(),
        };
        client.set_recommendations(vec![crop("Sugarcane"), crop("Mango")]).await;
        let mut flow = CropRecommendationFlow::new(client);
        flow.form_mut().region = "Karnataka".to_string();

        let icons: Vec<&str> = flow.submit().await.unwrap().iter().map(|c| c.icon).collect();
        assert_eq!(icons, ["🎋", "🌱"]);
    }

    #[tokio::test]
    async fn submit_builds_cards_with_icons() {
        let mut flow = CropRecommendationFlow::new(MockFarmClient::new());
        flow.form_mut().region = "Punjab".to_string();

        let cards = flow.submit().await.unwrap();
        assert_eq!(cards.len(), 3);
        assert_eq!(cards[0].icon, "🌾");
        assert_eq!(cards[1].icon, "🌽");
        assert_eq!(cards[2].icon, "🧵");
        assert_eq!(cards[0].recommendation.confidence_percent().as_deref(), Some("83.0%"));
        assert_eq!(cards[1].recommendation.confidence_percent(), None);
        assert!(flow.error().is_none());
    }

    #[tokio::test]
    async fn submit_without_region_is_rejected_locally() {
        let client = MockFarmClient::new();
        let mut flow = CropRecommendationFlow::new(client.clone());

        let err = flow.submit().await.unwrap_err();
        assert_eq!(err.to_string(), "Please select a region");
        assert_eq!(flow.error(), Some("Please select a region"));
        assert_eq!(client.call_count(Endpoint::RecommendCrops).await, 0);
    }

    #[tokio::test]
    async fn transport_failure_shows_connect_message() {
        let client = MockFarmClient::new();
        client
            .fail(Endpoint::RecommendCrops, FarmApiError::Transport("timed out".to_string()))
            .await;
        let mut flow = CropRecommendationFlow::new(client);
        flow.form_mut().region = "Punjab".to_string();

        let err = flow.submit().await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to connect to server");
        assert!(flow.cards().is_empty());
    }

    #[tokio::test]
    async fn backend_rejection_shows_backend_reason() {
        let client = MockFarmClient::new();
        client
            .fail(Endpoint::RecommendCrops, FarmApiError::Rejected("Unknown region".to_string()))
            .await;
        let mut flow = CropRecommendationFlow::new(client);
        flow.form_mut().region = "Atlantis".to_string();

        flow.submit().await.unwrap_err();
        assert_eq!(flow.error(), Some("Unknown region"));
    }

    #[test]
    fn cards_serialize_flat() {
        let card = RecommendationCard::from(CropRecommendation {
            name: "Potato".to_string(),
            suitability: 70.0,
            confidence: None,
            expected_yield: YieldFigure::Number(22.0),
            tips: String::new(),
        });
        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["icon"], "🥔");
        assert_eq!(json["name"], "Potato");
        assert_eq!(json["expectedYield"], 22.0);
    }
}
