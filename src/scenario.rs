use std::fmt;

use serde::{Deserialize, Serialize};

/// The three studio screens. Doubles as the tab identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scenario {
    #[default]
    Extraction,
    Model,
    Perspective,
}

impl Scenario {
    pub const ALL: [Scenario; 3] = [Scenario::Extraction, Scenario::Model, Scenario::Perspective];

    pub fn title(&self) -> &'static str {
        match self {
            Scenario::Extraction => "Bóc tách trang phục",
            Scenario::Model => "Người mẫu",
            Scenario::Perspective => "Góc nhìn khác",
        }
    }

    /// Extraction and Model show a single result; Perspective shows them all.
    pub fn keeps_all_images(&self) -> bool {
        matches!(self, Scenario::Perspective)
    }

    /// Default filename for the image at `index` (0-based).
    pub fn download_name(&self, index: usize) -> String {
        match self {
            Scenario::Extraction => "ket-qua-boc-tach.png".to_string(),
            Scenario::Model => "ket-qua-nguoi-mau.png".to_string(),
            Scenario::Perspective => format!("ket-qua-goc-nhin-{}.png", index + 1),
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}
