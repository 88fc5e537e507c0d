use async_trait::async_trait;

use crate::{
    assembler::RequestAssembler,
    encoder::encode_asset,
    error::{Result, StudioError},
    models::{AssetSlot, GenerationRequest},
    prompt::{build_prompt, ExtractionMode, PromptInput},
    scenario::Scenario,
};

use super::Form;

pub const MISSING_IMAGE: &str = "Vui lòng tải ảnh trang phục gốc.";

/// Cut a garment out of a photo onto a white background.
#[derive(Debug, Clone, Default)]
pub struct ExtractionForm {
    pub image: AssetSlot,
    pub mode: ExtractionMode,
}

#[async_trait]
impl Form for ExtractionForm {
    fn scenario(&self) -> Scenario {
        Scenario::Extraction
    }

    fn validate(&self) -> Result<()> {
        if !self.image.is_filled() {
            return Err(StudioError::validation(MISSING_IMAGE));
        }
        Ok(())
    }

    async fn build_request(&self, model: &str) -> Result<GenerationRequest> {
        let image = self
            .image
            .get()
            .ok_or_else(|| StudioError::validation(MISSING_IMAGE))?;
        let image_part = encode_asset(image).await?;
        let prompt = build_prompt(&PromptInput::Extraction(self.mode));

        Ok(RequestAssembler::new(model)
            .part(image_part)
            .text(prompt)
            .build())
    }
}
