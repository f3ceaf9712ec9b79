use std::path::Path;

use anyhow::{Context, Result};
use tempfile::TempDir;
use tracing::info;

use crate::{
    cog::CogConverter,
    download::{convert_dataset, download_dataset},
};

/// Downloads every archive to a scratch directory and converts its rasters
/// to COGs in `destination`.
pub async fn create_all_cogs(destination: &Path, converter: &CogConverter) -> Result<String> {
    let temp_dir = TempDir::new()?;

    download_dataset(temp_dir.path())
        .await
        .context("Failed to download the WorldClim archives")?;

    let outputs = convert_dataset(temp_dir.path(), destination, converter)
        .context("Failed to convert rasters to COG")?;
    info!(count = outputs.len(), "COGs written");

    Ok(destination.to_string_lossy().to_string())
}
