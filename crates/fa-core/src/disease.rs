// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Disease detection page

use std::path::Path;

use fa_api_contract::validation::validate_leaf_image;
use fa_api_contract::*;
use fa_client_api::FarmApi;
use tracing::{debug, warn};

use crate::error::{FlowError, FlowResult};
use crate::preview::data_url;
use crate::CONNECT_FAILURE_RETRY;

/// State of the disease detection page
pub struct DiseaseDetectionFlow<C: FarmApi> {
    client: C,
    selected: Option<LeafImage>,
    preview: Option<String>,
    diagnosis: Option<DiseaseDiagnosis>,
    error: Option<String>,
    model_loaded: bool,
}

impl<C: FarmApi> DiseaseDetectionFlow<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            selected: None,
            preview: None,
            diagnosis: None,
            error: None,
            model_loaded: false,
        }
    }

    pub fn selected(&self) -> Option<&LeafImage> {
        self.selected.as_ref()
    }

    /// `data:` URL of the selected image
    pub fn preview(&self) -> Option<&str> {
        self.preview.as_deref()
    }

    pub fn diagnosis(&self) -> Option<&DiseaseDiagnosis> {
        self.diagnosis.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn model_loaded(&self) -> bool {
        self.model_loaded
    }

    /// Pick an image. An invalid pick sets the error and keeps the previous
    /// selection; a valid one replaces it and clears the last result.
    pub fn select_image(&mut self, image: LeafImage) -> FlowResult<()> {
        if let Err(err) = validate_leaf_image(&image) {
            return Err(self.fail(FlowError::Invalid(err.to_string())));
        }
        self.preview = Some(data_url(&image));
        self.selected = Some(image);
        self.diagnosis = None;
        self.error = None;
        Ok(())
    }

    /// Read an image from disk and pick it
    pub async fn select_path(&mut self, path: &Path) -> FlowResult<()> {
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(source) => {
                return Err(self.fail(FlowError::Read {
                    path: path.to_path_buf(),
                    source,
                }))
            }
        };
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        self.select_image(LeafImage::new(file_name, bytes))
    }

    /// Upload the selected image and store the diagnosis
    pub async fn predict(&mut self) -> FlowResult<&DiseaseDiagnosis> {
        let Some(image) = self.selected.as_ref() else {
            return Err(self.fail(FlowError::Invalid(ApiContractError::MissingImage.to_string())));
        };
        self.error = None;

        debug!(file = %image.file_name, size = image.size(), "uploading leaf image");
        match self.client.predict_disease(image).await {
            Ok(diagnosis) => Ok(&*self.diagnosis.insert(diagnosis)),
            Err(e) => {
                self.diagnosis = None;
                Err(self.fail(FlowError::request(e, CONNECT_FAILURE_RETRY)))
            }
        }
    }

    /// Clear the selection, preview, result and error. The model flag is kept.
    pub fn reset(&mut self) {
        self.selected = None;
        self.preview = None;
        self.diagnosis = None;
        self.error = None;
    }

    /// Refresh the model-loaded flag. Failures are logged and leave the flag as it was.
    pub async fn check_model_status(&mut self) -> bool {
        match self.client.disease_model_status().await {
            Ok(status) => self.model_loaded = status.is_loaded,
            Err(e) => warn!("Error checking model status: {}", e),
        }
        self.model_loaded
    }

    /// Ask the backend to load the classifier
    pub async fn load_model(&mut self) -> FlowResult<ModelLoadResponse> {
        match self.client.load_disease_model().await {
            Ok(response) => {
                self.model_loaded = response.success.unwrap_or(true);
                Ok(response)
            }
            Err(e) => Err(self.fail(FlowError::request(e, CONNECT_FAILURE_RETRY))),
        }
    }

    fn fail(&mut self, err: FlowError) -> FlowError {
        self.error = Some(err.to_string());
        err
    }
}
