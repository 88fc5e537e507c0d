use async_trait::async_trait;

use crate::{
    error::{Result, StudioError},
    models::{FinishReason, GenerateContentResponse, GeneratedImage, GenerationRequest, Part},
};

/// One request in, images or one classified error out. Implementations make
/// exactly one outbound call per `generate` and never retry.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<Vec<GeneratedImage>>;
}

/// Pulls inline images out of the first candidate, or explains why there are none.
pub fn extract_images(response: GenerateContentResponse) -> Result<Vec<GeneratedImage>> {
    let blocked_for_safety = response
        .prompt_feedback
        .as_ref()
        .and_then(|feedback| feedback.block_reason.as_deref())
        == Some("SAFETY");
    let candidate = response.candidates.into_iter().next();

    let images: Vec<GeneratedImage> = candidate
        .as_ref()
        .and_then(|candidate| candidate.content.as_ref())
        .map(|content| {
            content
                .parts
                .iter()
                .filter_map(Part::as_inline)
                .map(|inline| GeneratedImage::new(inline.mime_type.clone(), inline.data.clone()))
                .collect()
        })
        .unwrap_or_default();

    if !images.is_empty() {
        return Ok(images);
    }

    match candidate.and_then(|candidate| candidate.finish_reason) {
        Some(FinishReason::Safety) => Err(StudioError::Safety),
        Some(FinishReason::Other(reason)) => Err(StudioError::Completion(reason)),
        Some(FinishReason::Stop) | None if blocked_for_safety => Err(StudioError::Safety),
        Some(FinishReason::Stop) | None => Err(StudioError::EmptyResult),
    }
}
