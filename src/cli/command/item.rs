use std::path::Path;

use anyhow::{Context, Result};

use crate::{constants::Dataset, raster::HeaderReader, stac};

/// Builds the item for `cog` and writes it to `<destination>/<cog stem>.json`.
/// Without a `dataset` the kind of item is taken from the file name.
pub fn create_item(
    dataset: Option<Dataset>,
    cog: &Path,
    destination: &Path,
    reader: &impl HeaderReader,
) -> Result<String> {
    let cog = std::path::absolute(cog)
        .with_context(|| format!("Failed to resolve `{}`", cog.display()))?;

    let item = match dataset {
        Some(Dataset::Monthly) => stac::create_monthly_item(&cog, reader),
        Some(Dataset::Bioclim) => stac::create_bioclim_item(&cog, reader),
        None => stac::create_item(&cog, reader),
    }
    .with_context(|| format!("Failed to create item from `{}`", cog.display()))?;

    let file_path = stac::save_item(&item, &cog, destination)
        .with_context(|| format!("Failed to save item `{}`", item.id))?;

    Ok(file_path.to_string_lossy().to_string())
}
