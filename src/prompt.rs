//! Instruction templates for each screen and the renderer that fills them.
//!
//! Templates are plain text under `templates/`, keyed by [`TemplateKey`]. The
//! only placeholders are `{description}` and `{image_count}`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::ImageCount;

pub const MODEL_STUDIO_DEFAULT: &str = "studio thời trang chuyên nghiệp với ánh sáng dịu nhẹ";
pub const MODEL_BACKGROUND_DEFAULT: &str = "người mẫu đứng tự nhiên trong bối cảnh";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionMode {
    #[default]
    Background,
    Shirt,
    Pants,
    Dress,
}

impl ExtractionMode {
    pub const ALL: [ExtractionMode; 4] = [
        ExtractionMode::Background,
        ExtractionMode::Shirt,
        ExtractionMode::Pants,
        ExtractionMode::Dress,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionMode::Background => "background",
            ExtractionMode::Shirt => "shirt",
            ExtractionMode::Pants => "pants",
            ExtractionMode::Dress => "dress",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExtractionMode::Background => "Tách nền",
            ExtractionMode::Shirt => "Chỉ tách Áo",
            ExtractionMode::Pants => "Chỉ tách Quần",
            ExtractionMode::Dress => "Tách Váy/Đầm",
        }
    }
}

impl fmt::Display for ExtractionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExtractionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExtractionMode::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown extraction mode: {}", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKey {
    Extraction(ExtractionMode),
    ModelStudio,
    ModelWithBackground,
    Perspective,
}

impl TemplateKey {
    pub fn template(&self) -> &'static str {
        match self {
            TemplateKey::Extraction(ExtractionMode::Background) => {
                include_str!("../templates/extraction_background.txt")
            }
            TemplateKey::Extraction(ExtractionMode::Shirt) => {
                include_str!("../templates/extraction_shirt.txt")
            }
            TemplateKey::Extraction(ExtractionMode::Pants) => {
                include_str!("../templates/extraction_pants.txt")
            }
            TemplateKey::Extraction(ExtractionMode::Dress) => {
                include_str!("../templates/extraction_dress.txt")
            }
            TemplateKey::ModelStudio => include_str!("../templates/model_studio.txt"),
            TemplateKey::ModelWithBackground => {
                include_str!("../templates/model_with_background.txt")
            }
            TemplateKey::Perspective => include_str!("../templates/perspective.txt"),
        }
    }

    /// Phrase used when the user leaves the description empty.
    pub fn default_description(&self) -> Option<&'static str> {
        match self {
            TemplateKey::ModelStudio => Some(MODEL_STUDIO_DEFAULT),
            TemplateKey::ModelWithBackground => Some(MODEL_BACKGROUND_DEFAULT),
            _ => None,
        }
    }
}

/// What a screen asks the prompt builder for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PromptInput<'a> {
    Extraction(ExtractionMode),
    Model {
        description: &'a str,
        has_background: bool,
    },
    Perspective {
        description: &'a str,
        image_count: ImageCount,
    },
}

impl PromptInput<'_> {
    pub fn key(&self) -> TemplateKey {
        match self {
            PromptInput::Extraction(mode) => TemplateKey::Extraction(*mode),
            PromptInput::Model {
                has_background: true,
                ..
            } => TemplateKey::ModelWithBackground,
            PromptInput::Model { .. } => TemplateKey::ModelStudio,
            PromptInput::Perspective { .. } => TemplateKey::Perspective,
        }
    }
}

pub fn build_prompt(input: &PromptInput<'_>) -> String {
    let key = input.key();
    let (description, image_count) = match input {
        PromptInput::Extraction(_) => ("", None),
        PromptInput::Model { description, .. } => (*description, None),
        PromptInput::Perspective {
            description,
            image_count,
        } => (*description, Some(*image_count)),
    };

    let description = match key.default_description() {
        Some(default) if description.is_empty() => default,
        _ => description,
    };
    let image_count = image_count.unwrap_or_default().to_string();

    render(key.template(), &[
        ("description", description),
        ("image_count", image_count.as_str()),
    ])
}

/// Single pass over the template, so substituted text is never re-scanned.
fn render(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open + 1..];
        let replaced = tail.find('}').and_then(|close| {
            let name = &tail[..close];
            values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value, close))
        });

        match replaced {
            Some((value, close)) => {
                out.push_str(value);
                rest = &tail[close + 1..];
            }
            None => {
                out.push('{');
                rest = tail;
            }
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_templates_are_fixed() {
        let prompt = build_prompt(&PromptInput::Extraction(ExtractionMode::Shirt));
        assert!(prompt.starts_with("Từ hình ảnh này, chỉ bóc tách 'cái áo'"));
        assert!(prompt.contains("#FFFFFF"));
        assert!(!prompt.contains('{'));
    }

    #[test]
    fn test_every_mode_has_a_distinct_template() {
        let prompts: Vec<String> = ExtractionMode::ALL
            .iter()
            .map(|mode| build_prompt(&PromptInput::Extraction(*mode)))
            .collect();
        for (i, a) in prompts.iter().enumerate() {
            for b in prompts.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_model_empty_description_uses_default_phrase() {
        let studio = build_prompt(&PromptInput::Model {
            description: "",
            has_background: false,
        });
        assert!(studio.contains(&format!("\"{}\"", MODEL_STUDIO_DEFAULT)));
        assert!(studio.contains("Tạo Ảnh Mẫu Thời Trang Chuyên Nghiệp"));

        let with_bg = build_prompt(&PromptInput::Model {
            description: "",
            has_background: true,
        });
        assert!(with_bg.contains(&format!("\"{}\"", MODEL_BACKGROUND_DEFAULT)));
        assert!(with_bg.contains("Ghép Mẫu Vào Bối Cảnh Chuyên Nghiệp"));
    }

    #[test]
    fn test_model_description_is_substituted_verbatim() {
        let prompt = build_prompt(&PromptInput::Model {
            description: "quán cà phê ở Paris",
            has_background: false,
        });
        assert!(prompt.contains("Tạo ra bối cảnh theo mô tả: \"quán cà phê ở Paris\"."));
        assert!(!prompt.contains(MODEL_STUDIO_DEFAULT));
    }

    #[test]
    fn test_whitespace_description_is_sent_as_typed() {
        let prompt = build_prompt(&PromptInput::Model {
            description: "   ",
            has_background: false,
        });
        assert!(!prompt.contains(MODEL_STUDIO_DEFAULT));
        assert!(prompt.contains("Tạo ra bối cảnh theo mô tả: \"   \"."));
    }

    #[test]
    fn test_perspective_substitutes_count_and_description() {
        let prompt = build_prompt(&PromptInput::Perspective {
            description: "treo trên móc",
            image_count: ImageCount::new(3),
        });
        assert!(prompt.starts_with("Hãy tạo ra 3 hình ảnh siêu thực"));
        assert!(prompt.contains("như sau: \"treo trên móc\"."));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let inputs = [
            PromptInput::Extraction(ExtractionMode::Dress),
            PromptInput::Model {
                description: "bãi biển",
                has_background: true,
            },
            PromptInput::Perspective {
                description: "gấp trên ghế",
                image_count: ImageCount::new(2),
            },
        ];
        for input in inputs {
            assert_eq!(build_prompt(&input), build_prompt(&input));
        }
    }

    #[test]
    fn test_placeholders_inside_user_text_are_not_expanded() {
        let prompt = build_prompt(&PromptInput::Perspective {
            description: "{image_count} {description}",
            image_count: ImageCount::new(2),
        });
        assert!(prompt.contains("\"{image_count} {description}\""));
    }

    #[test]
    fn test_render_leaves_unknown_braces() {
        assert_eq!(render("a {x} {y", &[("x", "1")]), "a 1 {y");
        assert_eq!(render("{nope}", &[]), "{nope}");
    }
}
