use std::fmt;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};

use super::request::Content;

/// Why the endpoint stopped generating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FinishReason {
    Stop,
    Safety,
    #[serde(untagged)]
    Other(String),
}

impl FinishReason {
    pub fn as_str(&self) -> &str {
        match self {
            FinishReason::Stop => "STOP",
            FinishReason::Safety => "SAFETY",
            FinishReason::Other(reason) => reason,
        }
    }
}

impl fmt::Display for FinishReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<Content>,
    pub finish_reason: Option<FinishReason>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorEnvelope {
    pub error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
}

/// An image returned by the endpoint, kept in its transport encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub mime_type: String,
    pub data: String,
}

impl GeneratedImage {
    pub fn new(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }

    pub fn bytes(&self) -> Result<Vec<u8>, base64::DecodeError> {
        BASE64.decode(self.data.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_finish_reason_variants() {
        let parse = |raw: &str| -> FinishReason { serde_json::from_value(json!(raw)).unwrap() };
        assert_eq!(parse("STOP"), FinishReason::Stop);
        assert_eq!(parse("SAFETY"), FinishReason::Safety);
        assert_eq!(parse("OTHER"), FinishReason::Other("OTHER".to_string()));
        assert_eq!(parse("MAX_TOKENS").to_string(), "MAX_TOKENS");
    }

    #[test]
    fn test_response_tolerates_missing_fields() {
        let response: GenerateContentResponse =
            serde_json::from_value(json!({ "candidates": [{}] })).unwrap();
        assert_eq!(response.candidates.len(), 1);
        assert!(response.candidates[0].content.is_none());

        let empty: GenerateContentResponse = serde_json::from_value(json!({})).unwrap();
        assert!(empty.candidates.is_empty());
    }

    #[test]
    fn test_generated_image_data_uri_and_bytes() {
        let image = GeneratedImage::new("image/png", "YWJj");
        assert_eq!(image.data_uri(), "data:image/png;base64,YWJj");
        assert_eq!(image.bytes().unwrap(), b"abc".to_vec());
    }
}
