use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::{
    error::{Result, StudioError},
    generator::{extract_images, ImageGenerator},
    logger,
    models::{ApiErrorEnvelope, GenerateContentResponse, GeneratedImage, GenerationRequest},
};

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Clone)]
pub struct ImageClient {
    http: Client,
    api_base: String,
    api_key: String,
    timeout: Duration,
}

impl ImageClient {
    pub fn new(http: Client, api_base: String, api_key: String, timeout: Duration) -> Self {
        Self {
            http,
            api_base,
            api_key,
            timeout,
        }
    }

    pub fn endpoint_for_model(&self, model: &str) -> String {
        let trimmed = model.trim();
        let model_path = if trimmed.starts_with("models/") {
            trimmed.to_string()
        } else {
            format!("models/{}", trimmed)
        };
        format!("{}/{}:generateContent", self.api_base, model_path)
    }

    pub async fn generate(&self, request: &GenerationRequest) -> Result<Vec<GeneratedImage>> {
        let endpoint = self.endpoint_for_model(&request.model);
        let payload = request.to_payload();

        log::info!(
            "Generating image with model: {} ({} parts, aspect ratio {})",
            request.model,
            request.parts.len(),
            request
                .output
                .aspect_ratio
                .map(|ratio| ratio.as_str())
                .unwrap_or("default")
        );

        let _timer = logger::timer("generateContent");
        let response = self
            .http
            .post(&endpoint)
            .header(API_KEY_HEADER, &self.api_key)
            .timeout(self.timeout)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                log::error!("Gemini request failed: {}", e);
                StudioError::from(e)
            })?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
                .ok()
                .map(|envelope| envelope.error.message)
                .filter(|message| !message.trim().is_empty())
                .unwrap_or_else(|| format!("HTTP {}", status));
            log::error!("Gemini returned {}: {}", status, message);
            return Err(StudioError::unknown(message));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body).map_err(|e| {
            log::error!("Malformed generateContent response: {}", e);
            StudioError::from(e)
        })?;

        let images = extract_images(parsed)?;
        log::info!("Received {} image(s)", images.len());
        Ok(images)
    }
}

#[async_trait]
impl ImageGenerator for ImageClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<Vec<GeneratedImage>> {
        ImageClient::generate(self, request).await
    }
}
