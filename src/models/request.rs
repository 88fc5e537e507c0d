use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::part::Part;

pub const MAX_IMAGE_COUNT: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AspectRatio {
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "9:16")]
    Portrait,
    #[serde(rename = "16:9")]
    Landscape,
}

impl AspectRatio {
    pub const ALL: [AspectRatio; 3] = [
        AspectRatio::Square,
        AspectRatio::Portrait,
        AspectRatio::Landscape,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::Portrait => "9:16",
            AspectRatio::Landscape => "16:9",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AspectRatio::Square => "Vuông 1:1",
            AspectRatio::Portrait => "Dọc 9:16",
            AspectRatio::Landscape => "Ngang 16:9",
        }
    }
}

impl Default for AspectRatio {
    fn default() -> Self {
        AspectRatio::Portrait
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AspectRatio {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AspectRatio::ALL
            .into_iter()
            .find(|ratio| ratio.as_str() == s.trim())
            .ok_or_else(|| format!("unsupported aspect ratio: {}", s))
    }
}

/// Number of images asked for, always within `1..=MAX_IMAGE_COUNT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ImageCount(u8);

impl ImageCount {
    pub fn new(count: i64) -> Self {
        Self(count.clamp(1, MAX_IMAGE_COUNT as i64) as u8)
    }

    /// Parses user-typed text; anything that isn't an integer becomes 1.
    pub fn parse_lossy(input: &str) -> Self {
        input
            .trim()
            .parse::<i64>()
            .map(Self::new)
            .unwrap_or_default()
    }

    pub fn get(&self) -> u8 {
        self.0
    }
}

impl Default for ImageCount {
    fn default() -> Self {
        Self(1)
    }
}

impl fmt::Display for ImageCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OutputShape {
    pub aspect_ratio: Option<AspectRatio>,
    /// Conveyed to the model through the prompt text; the endpoint has no field for it.
    pub image_count: Option<ImageCount>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub model: String,
    pub parts: Vec<Part>,
    pub output: OutputShape,
}

impl GenerationRequest {
    pub fn to_payload(&self) -> GenerateContentRequest {
        let generation_config = self.output.aspect_ratio.map(|aspect_ratio| GenerationConfig {
            image_config: ImageConfig { aspect_ratio },
        });

        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: self.parts.clone(),
            }],
            generation_config,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub image_config: ImageConfig,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageConfig {
    pub aspect_ratio: AspectRatio,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_image_count_clamps() {
        assert_eq!(ImageCount::new(0).get(), 1);
        assert_eq!(ImageCount::new(-3).get(), 1);
        assert_eq!(ImageCount::new(3).get(), 3);
        assert_eq!(ImageCount::new(9).get(), 4);
        assert_eq!(ImageCount::parse_lossy(" 2 ").get(), 2);
        assert_eq!(ImageCount::parse_lossy("abc").get(), 1);
        assert_eq!(ImageCount::parse_lossy("").get(), 1);
    }

    #[test]
    fn test_aspect_ratio_parse() {
        assert_eq!("9:16".parse::<AspectRatio>(), Ok(AspectRatio::Portrait));
        assert_eq!("16:9".parse::<AspectRatio>(), Ok(AspectRatio::Landscape));
        assert!("4:3".parse::<AspectRatio>().is_err());
        assert_eq!(AspectRatio::default(), AspectRatio::Portrait);
    }

    #[test]
    fn test_payload_with_aspect_ratio() {
        let request = GenerationRequest {
            model: "m".to_string(),
            parts: vec![Part::text("draw")],
            output: OutputShape {
                aspect_ratio: Some(AspectRatio::Landscape),
                image_count: Some(ImageCount::new(2)),
            },
        };

        let value = serde_json::to_value(request.to_payload()).unwrap();
        assert_eq!(
            value,
            json!({
                "contents": [{ "role": "user", "parts": [{ "text": "draw" }] }],
                "generationConfig": { "imageConfig": { "aspectRatio": "16:9" } }
            })
        );
    }

    #[test]
    fn test_payload_without_output_shape_has_no_config() {
        let request = GenerationRequest {
            model: "m".to_string(),
            parts: vec![Part::text("draw")],
            output: OutputShape::default(),
        };

        let value = serde_json::to_value(request.to_payload()).unwrap();
        assert!(value.get("generationConfig").is_none());
    }
}
