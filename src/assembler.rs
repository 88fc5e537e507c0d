use crate::models::{AspectRatio, GenerationRequest, ImageCount, OutputShape, Part};

/// Collects parts in the order they are pushed. Never rewrites a part.
#[derive(Debug, Clone)]
pub struct RequestAssembler {
    model: String,
    parts: Vec<Part>,
    output: OutputShape,
}

impl RequestAssembler {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            parts: Vec::new(),
            output: OutputShape::default(),
        }
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.parts.push(Part::text(text));
        self
    }

    pub fn part(mut self, part: Part) -> Self {
        self.parts.push(part);
        self
    }

    /// An absent optional asset adds nothing.
    pub fn optional_part(mut self, part: Option<Part>) -> Self {
        if let Some(part) = part {
            self.parts.push(part);
        }
        self
    }

    pub fn aspect_ratio(mut self, aspect_ratio: AspectRatio) -> Self {
        self.output.aspect_ratio = Some(aspect_ratio);
        self
    }

    pub fn image_count(mut self, image_count: ImageCount) -> Self {
        self.output.image_count = Some(image_count);
        self
    }

    pub fn build(self) -> GenerationRequest {
        GenerationRequest {
            model: self.model,
            parts: self.parts,
            output: self.output,
        }
    }
}
