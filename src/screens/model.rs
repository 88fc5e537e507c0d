use async_trait::async_trait;

use crate::{
    assembler::RequestAssembler,
    encoder::encode_assets,
    error::{Result, StudioError},
    models::{AspectRatio, AssetSlot, GenerationRequest},
    prompt::{build_prompt, PromptInput},
    scenario::Scenario,
};

use super::Form;

pub const MISSING_MODEL_OR_OUTFIT: &str =
    "Vui lòng tải lên cả 'Ảnh người mẫu' và 'Ảnh trang phục'.";

/// Dress a model in an extracted outfit, optionally composited onto a background.
#[derive(Debug, Clone, Default)]
pub struct ModelForm {
    pub model_image: AssetSlot,
    pub outfit_image: AssetSlot,
    pub background_image: AssetSlot,
    pub description: String,
    pub aspect_ratio: AspectRatio,
}

#[async_trait]
impl Form for ModelForm {
    fn scenario(&self) -> Scenario {
        Scenario::Model
    }

    fn validate(&self) -> Result<()> {
        if !self.model_image.is_filled() || !self.outfit_image.is_filled() {
            return Err(StudioError::validation(MISSING_MODEL_OR_OUTFIT));
        }
        Ok(())
    }

    async fn build_request(&self, model: &str) -> Result<GenerationRequest> {
        let (Some(model_image), Some(outfit_image)) =
            (self.model_image.get(), self.outfit_image.get())
        else {
            return Err(StudioError::validation(MISSING_MODEL_OR_OUTFIT));
        };

        let mut assets = vec![model_image, outfit_image];
        assets.extend(self.background_image.get());
        let mut parts = encode_assets(&assets).await?.into_iter();
        let (Some(model_part), Some(outfit_part)) = (parts.next(), parts.next()) else {
            return Err(StudioError::unknown(""));
        };
        let background_part = parts.next();

        let prompt = build_prompt(&PromptInput::Model {
            description: &self.description,
            has_background: background_part.is_some(),
        });

        Ok(RequestAssembler::new(model)
            .text(prompt)
            .part(model_part)
            .part(outfit_part)
            .optional_part(background_part)
            .aspect_ratio(self.aspect_ratio)
            .build())
    }
}
