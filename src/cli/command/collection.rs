use std::path::Path;

use anyhow::{Context, Result};

use crate::{constants::Dataset, stac};

/// Writes the collection for `dataset` to `<destination>/collection.json`.
pub fn create_collection(dataset: Dataset, destination: &Path) -> Result<String> {
    let collection = match dataset {
        Dataset::Monthly => stac::create_monthly_collection(),
        Dataset::Bioclim => stac::create_bioclim_collection(),
    };
    let file_path = stac::save_collection(&collection, destination)
        .with_context(|| format!("Failed to save collection `{}`", collection.id))?;

    Ok(file_path.to_string_lossy().to_string())
}
