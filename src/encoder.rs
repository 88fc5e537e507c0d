use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use futures::future::try_join_all;

use crate::{
    error::{Result, StudioError},
    models::{AssetSource, ImageAsset, Part},
};

/// Reads the whole asset and turns it into an inline part.
pub async fn encode_asset(asset: &ImageAsset) -> Result<Part> {
    let data = match &asset.source {
        AssetSource::File(path) => {
            let bytes = tokio::fs::read(path)
                .await
                .map_err(|source| StudioError::ReadFailure {
                    path: path.clone(),
                    source,
                })?;
            BASE64.encode(bytes)
        }
        AssetSource::Memory(bytes) => BASE64.encode(bytes),
    };

    log::debug!(
        "Encoded asset '{}' ({}, {} base64 chars)",
        asset.name,
        asset.mime_type,
        data.len()
    );

    Ok(Part::inline(asset.mime_type.clone(), data))
}

/// Encodes several assets concurrently. Output order follows input order.
pub async fn encode_assets(assets: &[&ImageAsset]) -> Result<Vec<Part>> {
    try_join_all(assets.iter().map(|asset| encode_asset(asset))).await
}
