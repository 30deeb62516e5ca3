use crate::models::{CostRequest, DamageAnalysis};
use reqwest::multipart;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when talking to the inference backend
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Client for the damage detection / cost estimation inference backend
///
/// The backend is an opaque collaborator exposing two endpoints: `/predict`
/// takes a multipart image upload and returns the detected damage, and
/// `/predict-cost` takes the detection plus car details and returns a repair
/// cost estimate. No retries; a superseded upload is the caller's problem.
pub struct DamageClient {
    base_url: String,
    client: Client,
}

impl DamageClient {
    pub fn new(base_url: String, timeout_secs: u64) -> Result<Self, InferenceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self { base_url, client })
    }

    /// Upload an image and get the detected damage location and severity
    pub async fn analyze(
        &self,
        image: Vec<u8>,
        filename: String,
    ) -> Result<DamageAnalysis, InferenceError> {
        let url = format!("{}/predict", self.base_url.trim_end_matches('/'));

        let part = multipart::Part::bytes(image).file_name(filename);
        let form = multipart::Form::new().part("file", part);

        tracing::debug!("Submitting damage image to {}", url);

        let response = self.client.post(&url).multipart(form).send().await?;

        if !response.status().is_success() {
            return Err(InferenceError::ApiError(format!(
                "Damage analysis failed: {}",
                response.status()
            )));
        }

        response
            .json::<DamageAnalysis>()
            .await
            .map_err(|e| InferenceError::InvalidResponse(e.to_string()))
    }

    /// Get a repair cost estimate for a detected damage
    ///
    /// The estimate payload is passed through verbatim; its exact shape
    /// belongs to the backend.
    pub async fn estimate_cost(
        &self,
        request: &CostRequest,
    ) -> Result<serde_json::Value, InferenceError> {
        let url = format!("{}/predict-cost", self.base_url.trim_end_matches('/'));

        let response = self.client.post(&url).json(request).send().await?;

        if !response.status().is_success() {
            return Err(InferenceError::ApiError(format!(
                "Cost estimation failed: {}",
                response.status()
            )));
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| InferenceError::InvalidResponse(e.to_string()))
    }
}
