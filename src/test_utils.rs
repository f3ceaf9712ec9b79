//! Helpers that write small real GeoTIFFs for tests.

use std::{fs::File, path::Path};

use tiff::{
    encoder::{colortype, TiffEncoder},
    tags::Tag,
};

use crate::naming::FileName;

/// Size and georeferencing of a test raster.
pub struct GeoTiffSpec {
    pub width: u32,
    pub height: u32,
    pub origin: (f64, f64),
    pub pixel_size: f64,
    pub epsg: u16,
}

impl GeoTiffSpec {
    /// A raster covering the whole globe in EPSG:4326.
    pub fn global(width: u32, height: u32) -> Self {
        GeoTiffSpec {
            width,
            height,
            origin: (-180.0, 90.0),
            pixel_size: 360.0 / width as f64,
            epsg: 4326,
        }
    }
}

pub fn write_geotiff(path: &Path, spec: &GeoTiffSpec) {
    let file = File::create(path).unwrap();
    let mut encoder = TiffEncoder::new(file).unwrap();
    let mut image = encoder
        .new_image::<colortype::Gray32Float>(spec.width, spec.height)
        .unwrap();

    let (x, y) = spec.origin;
    image
        .encoder()
        .write_tag(
            Tag::ModelPixelScaleTag,
            &[spec.pixel_size, spec.pixel_size, 0.0][..],
        )
        .unwrap();
    image
        .encoder()
        .write_tag(Tag::ModelTiepointTag, &[0.0, 0.0, 0.0, x, y, 0.0][..])
        .unwrap();
    image
        .encoder()
        .write_tag(
            Tag::GeoKeyDirectoryTag,
            &[1u16, 1, 0, 3, 1024, 0, 1, 2, 1025, 0, 1, 1, 2048, 0, 1, spec.epsg][..],
        )
        .unwrap();

    let data = vec![0f32; (spec.width * spec.height) as usize];
    image.write_data(&data).unwrap();
}

/// A TIFF with no georeferencing tags.
pub fn write_plain_tiff(path: &Path, width: u32, height: u32) {
    let file = File::create(path).unwrap();
    let mut encoder = TiffEncoder::new(file).unwrap();
    let data = vec![0u8; (width * height) as usize];
    encoder
        .write_image::<colortype::Gray8>(width, height, &data)
        .unwrap();
}

/// Writes a global raster for every sibling of `representative` in `dir` and
/// returns the representative's path.
pub fn write_monthly_siblings(dir: &Path, representative: &str) -> std::path::PathBuf {
    let name = FileName::decode(representative).unwrap();
    for variable in crate::constants::MONTHLY_VARIABLES.iter() {
        let sibling = name.with_variable(variable);
        write_geotiff(&dir.join(sibling.to_string()), &GeoTiffSpec::global(8, 4));
    }

    dir.join(representative)
}
