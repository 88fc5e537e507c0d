use std::path::{Path, PathBuf};

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

/// Where an asset's bytes come from.
#[derive(Debug, Clone, PartialEq)]
pub enum AssetSource {
    /// Read lazily when the submission encodes it.
    File(PathBuf),
    Memory(Vec<u8>),
}

/// A user-selected image held for the lifetime of one slot selection.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageAsset {
    pub source: AssetSource,
    pub mime_type: String,
    pub name: String,
}

impl ImageAsset {
    /// Select a file from disk. The MIME type is declared from the extension,
    /// the same way a file picker labels it; nothing is validated.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let mime_type = mime_guess::from_path(path)
            .first_raw()
            .unwrap_or("application/octet-stream")
            .to_string();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            source: AssetSource::File(path.to_path_buf()),
            mime_type,
            name,
        }
    }

    pub fn from_bytes(bytes: impl Into<Vec<u8>>, mime_type: impl Into<String>) -> Self {
        Self {
            source: AssetSource::Memory(bytes.into()),
            mime_type: mime_type.into(),
            name: String::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// `data:` URI for showing the selection before submit.
    pub async fn preview_data_uri(&self) -> std::io::Result<String> {
        let bytes = match &self.source {
            AssetSource::File(path) => tokio::fs::read(path).await?,
            AssetSource::Memory(bytes) => bytes.clone(),
        };
        Ok(format!(
            "data:{};base64,{}",
            self.mime_type,
            BASE64.encode(bytes)
        ))
    }
}

/// One named input slot on a screen. Holds at most one asset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssetSlot {
    asset: Option<ImageAsset>,
}

impl AssetSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces whatever was selected before.
    pub fn select(&mut self, asset: ImageAsset) {
        self.asset = Some(asset);
    }

    pub fn clear(&mut self) {
        self.asset = None;
    }

    pub fn get(&self) -> Option<&ImageAsset> {
        self.asset.as_ref()
    }

    pub fn is_filled(&self) -> bool {
        self.asset.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_type_is_declared_from_extension() {
        assert_eq!(ImageAsset::from_path("shirt.png").mime_type, "image/png");
        assert_eq!(ImageAsset::from_path("look.jpg").mime_type, "image/jpeg");
        assert_eq!(ImageAsset::from_path("look.jpg").name, "look.jpg");
        assert_eq!(
            ImageAsset::from_path("no_extension").mime_type,
            "application/octet-stream"
        );
    }

    #[test]
    fn test_slot_replace_and_clear() {
        let mut slot = AssetSlot::new();
        assert!(!slot.is_filled());

        slot.select(ImageAsset::from_bytes(vec![1], "image/png"));
        slot.select(ImageAsset::from_bytes(vec![2], "image/gif"));
        assert_eq!(slot.get().map(|a| a.mime_type.as_str()), Some("image/gif"));

        slot.clear();
        assert!(slot.get().is_none());
    }

    #[tokio::test]
    async fn test_preview_data_uri() {
        let asset = ImageAsset::from_bytes(b"abc".to_vec(), "image/png");
        let uri = asset.preview_data_uri().await.unwrap();
        assert_eq!(uri, "data:image/png;base64,YWJj");
    }
}
