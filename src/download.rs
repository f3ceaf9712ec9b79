//! Downloads the WorldClim archives and converts their rasters to COGs.

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use futures::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::{
    cli::{create_progress_bar, create_spinner},
    cog::CogConverter,
    constants::{Dataset, DATASET_URL_TEMPLATE},
    error::{Result, WorldclimError},
    naming::Resolution,
};

/// Download URL of the archive for one resolution and variable token.
pub fn dataset_url(resolution: Resolution, variable: &str) -> String {
    DATASET_URL_TEMPLATE
        .replace("{resolution}", resolution.token())
        .replace("{variable}", variable)
}

/// Every (resolution, variable token) pair published for both datasets.
pub fn archive_keys() -> Vec<(Resolution, &'static str)> {
    let mut keys = vec![];
    for resolution in Resolution::ALL {
        for dataset in Dataset::ALL {
            for token in dataset.archive_tokens() {
                keys.push((resolution, token));
            }
        }
    }

    keys
}

/// Streams the body at `url` to `file_path`, reporting progress on `progress_bar`.
pub async fn download_zip(url: &str, file_path: &Path, progress_bar: &ProgressBar) -> Result<()> {
    let response = reqwest::get(url).await?.error_for_status()?;

    let total_size = response.content_length().unwrap_or(0);
    if total_size > 0 {
        progress_bar.set_length(total_size);
        if let Ok(style) = ProgressStyle::with_template(
            "{msg} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({percent}%) {eta}",
        ) {
            progress_bar.set_style(style.progress_chars("=> "));
        }
    }

    let mut file = File::create(file_path).map_err(|e| WorldclimError::io(file_path, e))?;
    let mut downloaded = 0u64;
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).map_err(|e| WorldclimError::io(file_path, e))?;
        downloaded += chunk.len() as u64;
        progress_bar.set_position(downloaded);
    }

    Ok(())
}

/// Extracts the zip archive at `archive_path` into `working_dir`.
pub fn extract_zip(archive_path: &Path, working_dir: &Path) -> Result<()> {
    let file = File::open(archive_path).map_err(|e| WorldclimError::io(archive_path, e))?;
    let zip_err = |source| WorldclimError::Zip {
        path: archive_path.to_path_buf(),
        source,
    };

    let mut archive = zip::ZipArchive::new(file).map_err(zip_err)?;
    archive.extract(working_dir).map_err(zip_err)?;

    debug!(archive = %archive_path.display(), files = archive.len(), "extracted archive");

    Ok(())
}

/// Downloads every archive into `<output_path>/<resolution>/<variable>/` and
/// extracts it there.
pub async fn download_dataset(output_path: &Path) -> Result<()> {
    let keys = archive_keys();
    let total = keys.len();

    for (idx, (resolution, variable)) in keys.into_iter().enumerate() {
        let var_path = output_path.join(resolution.token()).join(variable);
        fs::create_dir_all(&var_path).map_err(|e| WorldclimError::io(&var_path, e))?;

        let url = dataset_url(resolution, variable);
        let archive_path = var_path.join(format!("wc2.1_{}_{}.zip", resolution, variable));

        let bar = create_spinner(format!("[{}/{}] {}", idx + 1, total, url));
        download_zip(&url, &archive_path, &bar).await?;
        bar.finish_with_message(format!("Downloaded {}", url));

        extract_zip(&archive_path, &var_path)?;
        fs::remove_file(&archive_path).map_err(|e| WorldclimError::io(&archive_path, e))?;
    }

    info!(archives = total, "dataset downloaded");

    Ok(())
}

/// Every `.tif` below `input_path`, in a stable order.
pub fn find_rasters(input_path: &Path) -> Vec<PathBuf> {
    let mut rasters: Vec<PathBuf> = WalkDir::new(input_path)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| p.is_file() && p.extension().map_or(false, |x| x == "tif"))
        .collect();
    rasters.sort();

    rasters
}

/// Converts every raster below `input_path` to a COG in `output_path`,
/// keeping file names.
pub fn convert_dataset(
    input_path: &Path,
    output_path: &Path,
    converter: &CogConverter,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(output_path).map_err(|e| WorldclimError::io(output_path, e))?;

    let rasters = find_rasters(input_path);
    let pb = create_progress_bar(rasters.len() as u64, "Converting to COG...".to_string());

    let mut outputs = Vec::with_capacity(rasters.len());
    for raster in rasters {
        let file_name = raster.file_name().unwrap_or_default();
        outputs.push(converter.convert(&raster, &output_path.join(file_name))?);
        pb.inc(1);
    }
    pb.finish_with_message("COGs created");

    Ok(outputs)
}

// -- Tests -------------------------------------------------------------------
