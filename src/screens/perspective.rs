use async_trait::async_trait;

use crate::{
    assembler::RequestAssembler,
    encoder::encode_asset,
    error::{Result, StudioError},
    models::{AspectRatio, AssetSlot, GenerationRequest, ImageCount},
    prompt::{build_prompt, PromptInput},
    scenario::Scenario,
};

use super::Form;

pub const MISSING_REFERENCE: &str = "Vui lòng tải ảnh trang phục tham chiếu.";
pub const MISSING_DESCRIPTION: &str = "Vui lòng mô tả bối cảnh mới.";

/// Re-stage a garment in a described scene, one or more shots.
#[derive(Debug, Clone, Default)]
pub struct PerspectiveForm {
    pub outfit_image: AssetSlot,
    pub description: String,
    pub aspect_ratio: AspectRatio,
    pub image_count: ImageCount,
}

#[async_trait]
impl Form for PerspectiveForm {
    fn scenario(&self) -> Scenario {
        Scenario::Perspective
    }

    fn validate(&self) -> Result<()> {
        if !self.outfit_image.is_filled() {
            return Err(StudioError::validation(MISSING_REFERENCE));
        }
        if self.description.is_empty() {
            return Err(StudioError::validation(MISSING_DESCRIPTION));
        }
        Ok(())
    }

    async fn build_request(&self, model: &str) -> Result<GenerationRequest> {
        let outfit = self
            .outfit_image
            .get()
            .ok_or_else(|| StudioError::validation(MISSING_REFERENCE))?;
        let outfit_part = encode_asset(outfit).await?;
        let prompt = build_prompt(&PromptInput::Perspective {
            description: &self.description,
            image_count: self.image_count,
        });

        Ok(RequestAssembler::new(model)
            .part(outfit_part)
            .text(prompt)
            .aspect_ratio(self.aspect_ratio)
            .image_count(self.image_count)
            .build())
    }
}
