//! Reads the georeferencing header of a GeoTIFF without touching pixel data.

use std::{fs::File, io::BufReader, path::Path};

use tiff::{decoder::Decoder, tags::Tag};
use tracing::debug;

use crate::{
    error::{Result, WorldclimError},
    stac::Projection,
};

const GEOGRAPHIC_TYPE_GEO_KEY: u16 = 2048;
const PROJECTED_CS_TYPE_GEO_KEY: u16 = 3072;
const USER_DEFINED: u16 = 32767;

#[derive(Debug, Clone, PartialEq)]
/// Spatial facts of one raster.
///
/// `transform` is the affine `[a, b, c, d, e, f]` with `x = a*col + b*row + c`
/// and `y = d*col + e*row + f`. `shape` is `[height, width]`.
pub struct RasterHeader {
    pub bbox: [f64; 4],
    pub transform: [f64; 6],
    pub shape: [usize; 2],
    pub epsg: Option<u32>,
}

impl RasterHeader {
    pub fn from_transform(
        transform: [f64; 6],
        width: usize,
        height: usize,
        epsg: Option<u32>,
    ) -> Self {
        let [a, b, c, d, e, f] = transform;
        let corners = [
            (0.0, 0.0),
            (width as f64, 0.0),
            (0.0, height as f64),
            (width as f64, height as f64),
        ];
        let xs = corners.map(|(col, row)| a * col + b * row + c);
        let ys = corners.map(|(col, row)| d * col + e * row + f);

        let bbox = [
            xs.iter().cloned().fold(f64::INFINITY, f64::min),
            ys.iter().cloned().fold(f64::INFINITY, f64::min),
            xs.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
            ys.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
        ];

        RasterHeader {
            bbox,
            transform,
            shape: [height, width],
            epsg,
        }
    }

    pub fn projection(&self) -> Projection {
        Projection {
            epsg: self.epsg,
            transform: self.transform,
            bbox: self.bbox,
            shape: self.shape,
        }
    }
}

/// Source of raster headers.
pub trait HeaderReader {
    fn read_header(&self, path: &Path) -> Result<RasterHeader>;
}

#[derive(Debug, Default, Clone, Copy)]
/// Reads headers from GeoTIFF tags.
pub struct GeoTiffReader;

impl HeaderReader for GeoTiffReader {
    fn read_header(&self, path: &Path) -> Result<RasterHeader> {
        let fail = |reason: String| WorldclimError::RasterRead {
            path: path.to_path_buf(),
            reason,
        };

        let file = File::open(path).map_err(|e| fail(e.to_string()))?;
        let mut decoder = Decoder::new(BufReader::new(file)).map_err(|e| fail(e.to_string()))?;

        let (width, height) = decoder.dimensions().map_err(|e| fail(e.to_string()))?;

        let transform = match decoder
            .find_tag(Tag::ModelTransformationTag)
            .map_err(|e| fail(e.to_string()))?
        {
            Some(value) => {
                let m = value.into_f64_vec().map_err(|e| fail(e.to_string()))?;
                if m.len() < 8 {
                    return Err(fail(format!("model transformation has {} values", m.len())));
                }
                [m[0], m[1], m[3], m[4], m[5], m[7]]
            }
            None => {
                let scale = decoder
                    .find_tag(Tag::ModelPixelScaleTag)
                    .map_err(|e| fail(e.to_string()))?
                    .ok_or_else(|| fail("no georeferencing tags".to_string()))?
                    .into_f64_vec()
                    .map_err(|e| fail(e.to_string()))?;
                let tiepoint = decoder
                    .find_tag(Tag::ModelTiepointTag)
                    .map_err(|e| fail(e.to_string()))?
                    .ok_or_else(|| fail("no model tiepoint".to_string()))?
                    .into_f64_vec()
                    .map_err(|e| fail(e.to_string()))?;
                transform_from_tiepoint(&scale, &tiepoint)
                    .ok_or_else(|| fail("malformed pixel scale or tiepoint".to_string()))?
            }
        };

        let epsg = match decoder
            .find_tag(Tag::GeoKeyDirectoryTag)
            .map_err(|e| fail(e.to_string()))?
        {
            Some(value) => {
                let keys = value.into_u16_vec().map_err(|e| fail(e.to_string()))?;
                epsg_from_geo_keys(&keys)
            }
            None => None,
        };

        debug!(path = %path.display(), width, height, ?epsg, "read raster header");

        Ok(RasterHeader::from_transform(
            transform,
            width as usize,
            height as usize,
            epsg,
        ))
    }
}

/// Builds the affine from `ModelPixelScale` `(sx, sy, sz)` and the first
/// `ModelTiepoint` `(i, j, k, x, y, z)`.
fn transform_from_tiepoint(scale: &[f64], tiepoint: &[f64]) -> Option<[f64; 6]> {
    if scale.len() < 2 || tiepoint.len() < 6 {
        return None;
    }
    let (sx, sy) = (scale[0], scale[1]);
    let (i, j, x, y) = (tiepoint[0], tiepoint[1], tiepoint[3], tiepoint[4]);

    Some([sx, 0.0, x - i * sx, 0.0, -sy, y + j * sy])
}

/// Reads the EPSG code from a GeoKey directory, preferring a projected CRS.
fn epsg_from_geo_keys(keys: &[u16]) -> Option<u32> {
    if keys.len() < 4 {
        return None;
    }
    let count = keys[3] as usize;

    let lookup = |wanted: u16| {
        keys[4..]
            .chunks_exact(4)
            .take(count)
            .find(|entry| entry[0] == wanted && entry[1] == 0)
            .map(|entry| entry[3])
            .filter(|&code| code != 0 && code != USER_DEFINED)
    };

    lookup(PROJECTED_CS_TYPE_GEO_KEY)
        .or_else(|| lookup(GEOGRAPHIC_TYPE_GEO_KEY))
        .map(u32::from)
}
