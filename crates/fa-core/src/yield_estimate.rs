// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Yield estimate page

use fa_api_contract::validation::validate_yield_request;
use fa_api_contract::*;
use fa_client_api::FarmApi;
use tracing::{debug, info};

use crate::error::{FlowError, FlowResult};
use crate::CONNECT_FAILURE;

/// State of the yield estimate page
pub struct YieldEstimateFlow<C: FarmApi> {
    client: C,
    form: YieldPredictionRequest,
    crops: Vec<String>,
    states: Vec<String>,
    model_trained: Option<bool>,
    prediction: Option<YieldPrediction>,
    error: Option<String>,
}

impl<C: FarmApi> YieldEstimateFlow<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            form: YieldPredictionRequest::default(),
            crops: Vec::new(),
            states: Vec::new(),
            model_trained: None,
            prediction: None,
            error: None,
        }
    }

    pub fn form(&self) -> &YieldPredictionRequest {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut YieldPredictionRequest {
        &mut self.form
    }

    pub fn crops(&self) -> &[String] {
        &self.crops
    }

    pub fn states(&self) -> &[String] {
        &self.states
    }

    /// `None` until the status has been fetched
    pub fn model_trained(&self) -> Option<bool> {
        self.model_trained
    }

    pub fn prediction(&self) -> Option<&YieldPrediction> {
        self.prediction.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Fetch the crop and state dropdown options
    pub async fn load_options(&mut self) -> FlowResult<()> {
        let (crops, states) =
            tokio::join!(self.client.available_crops(), self.client.available_states());
        match (crops, states) {
            (Ok(crops), Ok(states)) => {
                self.crops = crops;
                self.states = states;
                Ok(())
            }
            (Err(e), _) | (_, Err(e)) => Err(self.fail(FlowError::request(e, CONNECT_FAILURE))),
        }
    }

    pub async fn refresh_status(&mut self) -> FlowResult<bool> {
        match self.client.yield_model_status().await {
            Ok(status) => {
                self.model_trained = Some(status.is_trained);
                Ok(status.is_trained)
            }
            Err(e) => Err(self.fail(FlowError::request(e, CONNECT_FAILURE))),
        }
    }

    /// Train the model on the backend's dataset
    pub async fn train(&mut self) -> FlowResult<TrainingReport> {
        self.error = None;
        match self.client.train_yield_model().await {
            Ok(report) => {
                info!("yield model trained");
                self.model_trained = Some(true);
                Ok(report)
            }
            Err(e) => Err(self.fail(FlowError::request(e, CONNECT_FAILURE))),
        }
    }

    /// Validate the form and request a yield estimate
    pub async fn submit(&mut self) -> FlowResult<&YieldPrediction> {
        self.prediction = None;
        self.error = None;

        if let Err(err) = validate_yield_request(&self.form) {
            return Err(self.fail(FlowError::Invalid(err.to_string())));
        }

        debug!(crop = %self.form.crop, state = %self.form.state, "requesting yield estimate");
        match self.client.predict_yield(&self.form).await {
            Ok(prediction) => Ok(&*self.prediction.insert(prediction)),
            Err(e) => Err(self.fail(FlowError::request(e, CONNECT_FAILURE))),
        }
    }

    fn fail(&mut self, err: FlowError) -> FlowError {
        self.error = Some(err.to_string());
        err
    }
}
