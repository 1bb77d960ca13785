// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Main REST API client implementation

use std::time::Duration;

use fa_api_contract::validation::{
    validate_leaf_image, validate_recommendation_request, validate_yield_request,
};
use fa_api_contract::*;
use reqwest::multipart::{Form, Part};
use reqwest::{Client as HttpClient, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::{RestClientError, RestClientResult};
use crate::network_config::NetworkConfig;

const USER_AGENT: &str = concat!("farmer-assist/", env!("CARGO_PKG_VERSION"));

/// REST API client for the farmer-assist prediction backend
#[derive(Debug, Clone)]
pub struct RestClient {
    http_client: HttpClient,
    base_url: Url,
}

impl RestClient {
    /// Create a new REST client. The base URL gets a trailing `/` so that
    /// endpoint paths resolve beneath it.
    pub fn new(base_url: Url, timeout: Duration) -> RestClientResult<Self> {
        let http_client = HttpClient::builder().user_agent(USER_AGENT).timeout(timeout).build()?;

        Ok(Self {
            http_client,
            base_url: normalize_base_url(base_url),
        })
    }

    /// Create a client from a base URL string
    pub fn from_url(base_url: &str, timeout: Duration) -> RestClientResult<Self> {
        Self::new(Url::parse(base_url)?, timeout)
    }

    /// Create a client from the resolved network configuration
    pub fn from_config(config: &NetworkConfig) -> RestClientResult<Self> {
        Self::from_url(config.base_url(), config.timeout())
    }

    /// Get the base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Absolute URL of an endpoint
    pub fn endpoint_url(&self, endpoint: Endpoint) -> RestClientResult<Url> {
        Ok(self.base_url.join(endpoint.path())?)
    }

    pub async fn health(&self) -> RestClientResult<HealthStatus> {
        self.get(Endpoint::Health).await
    }

    pub async fn yield_model_status(&self) -> RestClientResult<YieldModelStatus> {
        self.get(Endpoint::YieldModelStatus).await
    }

    pub async fn available_crops(&self) -> RestClientResult<Vec<String>> {
        let list: CropList = self.get(Endpoint::AvailableCrops).await?;
        Ok(list.crops)
    }

    pub async fn available_states(&self) -> RestClientResult<Vec<String>> {
        let list: StateList = self.get(Endpoint::AvailableStates).await?;
        Ok(list.states)
    }

    /// Train the yield model on the backend's dataset. This can take a while.
    pub async fn train_yield_model(&self) -> RestClientResult<TrainingReport> {
        self.post_empty(Endpoint::TrainYieldModel).await
    }

    pub async fn predict_yield(
        &self,
        request: &YieldPredictionRequest,
    ) -> RestClientResult<YieldPrediction> {
        validate_yield_request(request)?;
        self.post(Endpoint::PredictYield, request).await
    }

    /// Ranked crop recommendations for the given farm parameters
    pub async fn recommend_crops(
        &self,
        request: &CropRecommendationRequest,
    ) -> RestClientResult<Vec<CropRecommendation>> {
        validate_recommendation_request(request)?;
        let response: CropRecommendationResponse =
            self.post(Endpoint::RecommendCrops, request).await?;
        unwrap_envelope(Endpoint::RecommendCrops, response)
    }

    pub async fn disease_model_status(&self) -> RestClientResult<DiseaseModelStatus> {
        self.get(Endpoint::DiseaseModelStatus).await
    }

    pub async fn load_disease_model(&self) -> RestClientResult<ModelLoadResponse> {
        self.post_empty(Endpoint::LoadDiseaseModel).await
    }

    pub async fn disease_supported_crops(&self) -> RestClientResult<Vec<String>> {
        let list: CropList = self.get(Endpoint::DiseaseSupportedCrops).await?;
        Ok(list.crops)
    }

    /// Upload a leaf image as multipart field `image` and return the diagnosis
    pub async fn predict_disease(&self, image: &LeafImage) -> RestClientResult<DiseaseDiagnosis> {
        validate_leaf_image(image)?;
        let part = Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(&image.content_type)?;
        let form = Form::new().part(IMAGE_FIELD, part);

        let request = self.builder(Endpoint::PredictDisease)?.multipart(form);
        let response: DiseaseDiagnosisResponse =
            self.execute(Endpoint::PredictDisease, request).await?;
        unwrap_envelope(Endpoint::PredictDisease, response)
    }

    // Helper methods

    async fn get<T: DeserializeOwned>(&self, endpoint: Endpoint) -> RestClientResult<T> {
        let request = self.builder(endpoint)?;
        self.execute(endpoint, request).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        endpoint: Endpoint,
        body: &B,
    ) -> RestClientResult<T> {
        let request = self.builder(endpoint)?.json(body);
        self.execute(endpoint, request).await
    }

    async fn post_empty<T: DeserializeOwned>(&self, endpoint: Endpoint) -> RestClientResult<T> {
        let request = self.builder(endpoint)?;
        self.execute(endpoint, request).await
    }

    fn builder(&self, endpoint: Endpoint) -> RestClientResult<RequestBuilder> {
        let method = match endpoint.method() {
            EndpointMethod::Get => Method::GET,
            EndpointMethod::Post => Method::POST,
        };
        Ok(self.http_client.request(method, self.endpoint_url(endpoint)?))
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        request: RequestBuilder,
    ) -> RestClientResult<T> {
        let correlation_id = fa_logging::correlation_id();
        debug!(%correlation_id, %endpoint, "sending request");

        let response = request.send().await.map_err(|err| {
            debug!(%correlation_id, %endpoint, error = %err, "request failed");
            err
        })?;

        debug!(%correlation_id, %endpoint, status = %response.status(), "received response");
        self.handle_response(endpoint, response).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        response: Response,
    ) -> RestClientResult<T> {
        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            serde_json::from_str(&text).map_err(|err| {
                debug!(%endpoint, error = %err, body = %text, "response did not match contract");
                RestClientError::UnexpectedResponse(format!("{endpoint}: {err}"))
            })
        } else {
            let message = serde_json::from_str::<ApiErrorBody>(&text)
                .ok()
                .and_then(|body| body.reason().map(str::to_string))
                .unwrap_or_else(|| endpoint.failure_message().to_string());
            Err(RestClientError::Server { status, message })
        }
    }
}

fn unwrap_envelope<E: SuccessEnvelope>(
    endpoint: Endpoint,
    envelope: E,
) -> RestClientResult<E::Payload> {
    envelope.into_payload().map_err(|reason| {
        RestClientError::Rejected(
            reason
                .filter(|r| !r.trim().is_empty())
                .unwrap_or_else(|| endpoint.failure_message().to_string()),
        )
    })
}

fn normalize_base_url(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
