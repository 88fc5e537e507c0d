pub mod image_client;

use crate::{
    config::StudioConfig,
    error::{Result, StudioError},
};
use reqwest::Client;

pub use image_client::ImageClient;

#[derive(Clone)]
pub struct GeminiClient {
    image_client: ImageClient,
    model: String,
}

impl GeminiClient {
    pub fn new(config: StudioConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                StudioError::Config("GEMINI_API_KEY (or API_KEY) is required".into())
            })?;

        let http = Client::builder()
            .build()
            .map_err(|e| StudioError::Config(format!("Failed to build HTTP client: {}", e)))?;

        log::debug!("Gemini client targeting {}", config.api_base);

        Ok(Self {
            image_client: ImageClient::new(http, config.api_base, api_key, config.timeout),
            model: config.model,
        })
    }

    pub fn image(&self) -> &ImageClient {
        &self.image_client
    }

    /// Model id the screens should put in their requests.
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_missing_api_key_is_config_error() {
        let err = GeminiClient::new(StudioConfig::new()).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::Config);

        let err = GeminiClient::new(StudioConfig::new().with_api_key("  "))
            .err()
            .unwrap();
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn test_client_exposes_configured_model() {
        let client = GeminiClient::new(
            StudioConfig::new()
                .with_api_key("k")
                .with_model("gemini-2.5-flash-image"),
        )
        .unwrap();
        assert_eq!(client.model(), "gemini-2.5-flash-image");
    }
}
