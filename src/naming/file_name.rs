//! Parses `wc2.1_<resolution>_<variable>[_<MM>][_<row>_<col>].tif` file names.

use std::{fmt, path::Path, sync::OnceLock};

use regex::Regex;

use crate::{
    constants::{bioclim_variable, monthly_variable, ClimateVariable, Dataset, DATASET_VERSION},
    error::{Result, WorldclimError},
};

use super::{Month, Resolution};

const FILE_NAME_PATTERN: &str = concat!(
    r"^wc2\.1_(?P<resolution>[^_]+)_",
    r"(?:bio_(?P<bio>[0-9]+)|(?P<variable>[a-z]+)_(?P<month>[0-9]{2}))",
    r"(?:_(?P<row>[0-9]+)_(?P<col>[0-9]+))?\.tif$",
);

fn file_name_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(FILE_NAME_PATTERN).expect("file name pattern is valid"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Tile indices appended by a tiling step that split a full-resolution raster.
pub struct Tile {
    pub row: u32,
    pub col: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// What a raster holds: one month of a monthly variable, or one bioclimatic variable.
pub enum Layer {
    Monthly {
        variable: &'static ClimateVariable,
        month: Month,
    },
    Bioclim {
        variable: &'static ClimateVariable,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// The fields encoded in a WorldClim raster file name.
pub struct FileName {
    pub resolution: Resolution,
    pub layer: Layer,
    pub tile: Option<Tile>,
}

impl FileName {
    pub fn decode(file_name: &str) -> Result<Self> {
        let caps = file_name_regex()
            .captures(file_name)
            .ok_or_else(|| WorldclimError::MetadataExtraction {
                file_name: file_name.to_string(),
            })?;

        let resolution: Resolution = caps["resolution"].parse()?;

        let layer = match (caps.name("bio"), caps.name("variable"), caps.name("month")) {
            (Some(bio), _, _) => {
                let invalid = || WorldclimError::invalid("bioclim variable", bio.as_str());
                // Zero-padded indices would not re-encode to the same name.
                let index: u32 = bio.as_str().parse().map_err(|_| invalid())?;
                let variable = bioclim_variable(index)
                    .filter(|_| index.to_string() == bio.as_str())
                    .ok_or_else(invalid)?;
                Layer::Bioclim { variable }
            }
            (None, Some(variable), Some(month)) => {
                let variable = monthly_variable(variable.as_str())
                    .ok_or_else(|| WorldclimError::invalid("variable", variable.as_str()))?;
                let month: Month = month.as_str().parse()?;
                Layer::Monthly { variable, month }
            }
            _ => {
                return Err(WorldclimError::MetadataExtraction {
                    file_name: file_name.to_string(),
                })
            }
        };

        let tile = match (caps.name("row"), caps.name("col")) {
            (Some(row), Some(col)) => Some(Tile {
                row: parse_index(row.as_str(), file_name)?,
                col: parse_index(col.as_str(), file_name)?,
            }),
            _ => None,
        };

        Ok(FileName {
            resolution,
            layer,
            tile,
        })
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| WorldclimError::MetadataExtraction {
                file_name: path.to_string_lossy().to_string(),
            })?;

        FileName::decode(file_name)
    }

    pub fn variable(&self) -> &'static ClimateVariable {
        match self.layer {
            Layer::Monthly { variable, .. } | Layer::Bioclim { variable } => variable,
        }
    }

    pub fn month(&self) -> Option<Month> {
        match self.layer {
            Layer::Monthly { month, .. } => Some(month),
            Layer::Bioclim { .. } => None,
        }
    }

    pub fn dataset(&self) -> Dataset {
        match self.layer {
            Layer::Monthly { .. } => Dataset::Monthly,
            Layer::Bioclim { .. } => Dataset::Bioclim,
        }
    }

    /// The sibling raster for another monthly variable of the same month,
    /// resolution and tile. Bioclim names are returned unchanged.
    pub fn with_variable(&self, variable: &'static ClimateVariable) -> Self {
        let layer = match self.layer {
            Layer::Monthly { month, .. } => Layer::Monthly { variable, month },
            bioclim => bioclim,
        };

        FileName { layer, ..*self }
    }

    /// Item identity: resolution plus month number, or resolution plus bioclim key.
    pub fn item_id(&self) -> String {
        let mut id = match self.layer {
            Layer::Monthly { month, .. } => format!(
                "wc{}_{}_{}",
                DATASET_VERSION, self.resolution, month.number()
            ),
            Layer::Bioclim { variable } => {
                format!("wc{}_{}_{}", DATASET_VERSION, self.resolution, variable.key)
            }
        };

        if let Some(tile) = self.tile {
            id.push_str(&format!("_{}_{}", tile.row, tile.col));
        }

        id
    }
}

fn parse_index(s: &str, file_name: &str) -> Result<u32> {
    s.parse().map_err(|_| WorldclimError::MetadataExtraction {
        file_name: file_name.to_string(),
    })
}

impl fmt::Display for FileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "wc{}_{}_{}",
            DATASET_VERSION,
            self.resolution,
            self.variable().key
        )?;
        if let Some(month) = self.month() {
            write!(f, "_{}", month)?;
        }
        if let Some(tile) = self.tile {
            write!(f, "_{}_{}", tile.row, tile.col)?;
        }
        f.write_str(".tif")
    }
}
