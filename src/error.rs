//! Error kinds raised while decoding names, reading rasters and building metadata.

use std::{path::PathBuf, process::ExitStatus};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, WorldclimError>;

#[derive(Debug, Error)]
pub enum WorldclimError {
    #[error("could not extract metadata from file name `{file_name}`")]
    MetadataExtraction { file_name: String },

    #[error("invalid {kind} value `{value}`")]
    InvalidEnumValue { kind: &'static str, value: String },

    #[error("failed to read raster header from `{path}`: {reason}")]
    RasterRead { path: PathBuf, reason: String },

    #[error("conversion of `{path}` failed ({status}): {output}")]
    Conversion {
        path: PathBuf,
        status: ExitStatus,
        output: String,
    },

    #[error("I/O error on `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("failed to read archive `{path}`: {source}")]
    Zip {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },
}

impl WorldclimError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        WorldclimError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn invalid(kind: &'static str, value: impl ToString) -> Self {
        WorldclimError::InvalidEnumValue {
            kind,
            value: value.to_string(),
        }
    }
}
