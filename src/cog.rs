//! Converts GeoTIFFs to Cloud Optimized GeoTIFFs with `gdal_translate`.

use std::{
    path::{Path, PathBuf},
    process::Command,
};

use tracing::{error, info};

use crate::error::{Result, WorldclimError};

pub const DEFAULT_PROGRAM: &str = "gdal_translate";

const CREATION_OPTIONS: [&str; 6] = [
    "NUM_THREADS=ALL_CPUS",
    "BLOCKSIZE=512",
    "COMPRESS=DEFLATE",
    "LEVEL=9",
    "PREDICTOR=YES",
    "OVERVIEWS=IGNORE_EXISTING",
];

#[derive(Debug, Clone)]
pub struct CogConverter {
    pub program: String,
    /// Log what would be run instead of running it.
    pub dry_run: bool,
    /// Return an error on failure rather than logging it and carrying on.
    pub raise_on_fail: bool,
}

impl Default for CogConverter {
    fn default() -> Self {
        CogConverter {
            program: DEFAULT_PROGRAM.to_string(),
            dry_run: false,
            raise_on_fail: true,
        }
    }
}

impl CogConverter {
    pub fn args(&self, input: &Path, output: &Path) -> Vec<String> {
        let mut args = vec!["-of".to_string(), "COG".to_string()];
        for option in CREATION_OPTIONS {
            args.push("-co".to_string());
            args.push(option.to_string());
        }
        args.push(input.to_string_lossy().to_string());
        args.push(output.to_string_lossy().to_string());

        args
    }

    /// Writes a COG of `input` to `output` and returns `output`.
    pub fn convert(&self, input: &Path, output: &Path) -> Result<PathBuf> {
        if self.dry_run {
            info!(
                input = %input.display(),
                output = %output.display(),
                "dry run: would have created COG"
            );
            return Ok(output.to_path_buf());
        }

        match self.run(input, output) {
            Ok(()) => Ok(output.to_path_buf()),
            Err(e) => {
                error!(output = %output.display(), "failed to process: {}", e);
                if self.raise_on_fail {
                    Err(e)
                } else {
                    Ok(output.to_path_buf())
                }
            }
        }
    }

    fn run(&self, input: &Path, output: &Path) -> Result<()> {
        let result = Command::new(&self.program)
            .args(self.args(input, output))
            .output()
            .map_err(|e| WorldclimError::io(&self.program, e))?;

        let captured = format!(
            "{}{}",
            String::from_utf8_lossy(&result.stdout),
            String::from_utf8_lossy(&result.stderr)
        );
        info!(program = %self.program, status = %result.status, "output: {}", captured.trim());

        if !result.status.success() {
            return Err(WorldclimError::Conversion {
                path: output.to_path_buf(),
                status: result.status,
                output: captured,
            });
        }

        Ok(())
    }
}
