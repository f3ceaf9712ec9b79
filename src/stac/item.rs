//! Builds one STAC item per (resolution, month) or per bioclimatic raster.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::{
    constants::{
        ClimateVariable, CITATION, DATASET_VERSION, DOI, END_YEAR, MONTHLY_VARIABLES, START_YEAR,
    },
    error::{Result, WorldclimError},
    naming::{FileName, Layer, Month},
    raster::HeaderReader,
};

use super::{
    Asset, Geometry, Item, ItemProperties, Projection, COG_MEDIA_TYPE, PROJECTION_EXTENSION,
    SCIENTIFIC_EXTENSION, STAC_VERSION,
};

/// Builds the item for any WorldClim raster, monthly or bioclimatic.
pub fn create_item(path: &Path, reader: &impl HeaderReader) -> Result<Item> {
    let name = FileName::from_path(path)?;

    match name.layer {
        Layer::Monthly { month, .. } => monthly_item(path, &name, month, reader),
        Layer::Bioclim { variable } => bioclim_item(path, &name, variable, reader),
    }
}

/// Builds the item for one (resolution, month), with an asset for each of the
/// seven monthly variables. `path` is any one of the month's rasters; the
/// others are expected beside it.
pub fn create_monthly_item(path: &Path, reader: &impl HeaderReader) -> Result<Item> {
    let name = FileName::from_path(path)?;

    match name.layer {
        Layer::Monthly { month, .. } => monthly_item(path, &name, month, reader),
        Layer::Bioclim { .. } => Err(WorldclimError::MetadataExtraction {
            file_name: name.to_string(),
        }),
    }
}

/// Builds the item for a single bioclimatic raster, carrying that one asset.
pub fn create_bioclim_item(path: &Path, reader: &impl HeaderReader) -> Result<Item> {
    let name = FileName::from_path(path)?;

    match name.layer {
        Layer::Bioclim { variable } => bioclim_item(path, &name, variable, reader),
        Layer::Monthly { .. } => Err(WorldclimError::MetadataExtraction {
            file_name: name.to_string(),
        }),
    }
}

fn monthly_item(
    path: &Path,
    name: &FileName,
    month: Month,
    reader: &impl HeaderReader,
) -> Result<Item> {
    let dir = path.parent().unwrap_or_else(|| Path::new(""));

    let mut projection: Option<Projection> = None;
    let mut sources: Vec<(&'static ClimateVariable, PathBuf)> =
        Vec::with_capacity(MONTHLY_VARIABLES.len());

    for variable in MONTHLY_VARIABLES.iter() {
        let sibling = dir.join(name.with_variable(variable).to_string());
        let facts = reader.read_header(&sibling)?.projection();

        match &projection {
            None => projection = Some(facts),
            Some(first) if *first != facts => warn!(
                path = %sibling.display(),
                "raster is not co-registered with its siblings; using the first raster's projection"
            ),
            Some(_) => {}
        }

        sources.push((variable, sibling));
    }

    let projection = projection.ok_or_else(|| WorldclimError::MetadataExtraction {
        file_name: name.to_string(),
    })?;

    let title = format!(
        "WorldClim {} {} {}",
        DATASET_VERSION, name.resolution, month.name()
    );
    let (start, end) = month.window();

    Ok(build_item(name, title, projection, start, end, &sources))
}

fn bioclim_item(
    path: &Path,
    name: &FileName,
    variable: &'static ClimateVariable,
    reader: &impl HeaderReader,
) -> Result<Item> {
    let projection = reader.read_header(path)?.projection();

    let title = format!(
        "WorldClim {} {} {}",
        DATASET_VERSION, name.resolution, variable.description
    );
    let start = Month::January.start_in(START_YEAR);
    let end = Month::December.end_in(END_YEAR);

    let sources = [(variable, path.to_path_buf())];

    Ok(build_item(name, title, projection, start, end, &sources))
}

fn build_item(
    name: &FileName,
    title: String,
    projection: Projection,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    sources: &[(&'static ClimateVariable, PathBuf)],
) -> Item {
    let assets: BTreeMap<String, Asset> = sources
        .iter()
        .map(|(variable, href)| {
            (
                variable.key.to_string(),
                Asset {
                    href: href.to_string_lossy().to_string(),
                    media_type: COG_MEDIA_TYPE.to_string(),
                    roles: vec!["data".to_string()],
                    title: variable.description.to_string(),
                    projection: projection.clone(),
                },
            )
        })
        .collect();

    let id = name.item_id();
    debug!(id = %id, assets = assets.len(), "built item");

    Item {
        kind: "Feature".to_string(),
        stac_version: STAC_VERSION.to_string(),
        stac_extensions: vec![
            PROJECTION_EXTENSION.to_string(),
            SCIENTIFIC_EXTENSION.to_string(),
        ],
        id,
        geometry: Geometry::from_bbox(&projection.bbox),
        bbox: projection.bbox,
        properties: ItemProperties {
            title,
            datetime: None,
            start_datetime: start,
            end_datetime: end,
            projection,
            citation: CITATION.to_string(),
            doi: DOI.to_string(),
        },
        links: Vec::new(),
        assets,
        collection: Some(name.dataset().collection_id().to_string()),
    }
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {

    use std::{
        cell::{Cell, RefCell},
        collections::HashSet,
    };

    use tempfile::TempDir;

    use super::*;
    use crate::{
        raster::{GeoTiffReader, RasterHeader},
        test_utils::{write_geotiff, write_monthly_siblings, GeoTiffSpec},
    };

    /// Serves a fixed header for every path and records what was opened.
    struct FakeReader {
        header: RasterHeader,
        missing: HashSet<PathBuf>,
        opened: RefCell<Vec<PathBuf>>,
    }

    impl FakeReader {
        fn new() -> Self {
            FakeReader {
                header: RasterHeader::from_transform(
                    [1.0 / 6.0, 0.0, -180.0, 0.0, -1.0 / 6.0, 90.0],
                    2160,
                    1080,
                    Some(4326),
                ),
                missing: HashSet::new(),
                opened: RefCell::new(Vec::new()),
            }
        }
    }

    impl HeaderReader for FakeReader {
        fn read_header(&self, path: &Path) -> Result<RasterHeader> {
            self.opened.borrow_mut().push(path.to_path_buf());
            if self.missing.contains(path) {
                return Err(WorldclimError::RasterRead {
                    path: path.to_path_buf(),
                    reason: "No such file or directory".to_string(),
                });
            }
            Ok(self.header.clone())
        }
    }

    /// Serves a header whose x-origin moves by one degree on every read.
    struct DriftingReader {
        reads: Cell<u32>,
    }

    impl HeaderReader for DriftingReader {
        fn read_header(&self, _path: &Path) -> Result<RasterHeader> {
            let origin = f64::from(self.reads.get());
            self.reads.set(self.reads.get() + 1);
            Ok(RasterHeader::from_transform(
                [0.5, 0.0, origin, 0.0, -0.5, 90.0],
                720,
                360,
                Some(4326),
            ))
        }
    }

    #[test]
    fn should_build_monthly_item_with_seven_assets() {
        let reader = FakeReader::new();
        let item = create_monthly_item(Path::new("/cogs/wc2.1_10m_prec_01.tif"), &reader).unwrap();

        assert_eq!(item.id, "wc2.1_10m_1");
        assert_eq!(item.collection.as_deref(), Some("worldclim-monthly"));
        assert_eq!(item.assets.len(), 7);
        for key in ["tmin", "tmax", "tavg", "prec", "srad", "wind", "vapr"] {
            let asset = &item.assets[key];
            assert_eq!(asset.href, format!("/cogs/wc2.1_10m_{}_01.tif", key));
            assert_eq!(asset.media_type, COG_MEDIA_TYPE);
            assert_eq!(asset.roles, vec!["data"]);
            assert_eq!(asset.projection, item.properties.projection);
        }
        assert_eq!(item.assets["prec"].title, "Precipitation (mm)");
    }

    #[test]
    fn should_open_each_sibling_once() {
        let reader = FakeReader::new();
        create_monthly_item(Path::new("/cogs/wc2.1_5m_tmin_06.tif"), &reader).unwrap();

        let opened = reader.opened.borrow();
        assert_eq!(opened.len(), 7);
        let unique: HashSet<_> = opened.iter().collect();
        assert_eq!(unique.len(), 7);
        assert_eq!(opened[0], PathBuf::from("/cogs/wc2.1_5m_tmin_06.tif"));
    }

    #[test]
    fn should_set_monthly_window_and_geometry() {
        let reader = FakeReader::new();
        let item = create_monthly_item(Path::new("wc2.1_10m_tavg_12.tif"), &reader).unwrap();

        assert_eq!(item.id, "wc2.1_10m_12");
        assert_eq!(item.properties.datetime, None);
        assert_eq!(
            item.properties.start_datetime.to_rfc3339(),
            "1970-12-01T00:00:00+00:00"
        );
        assert_eq!(
            item.properties.end_datetime.to_rfc3339(),
            "2000-12-31T23:59:59+00:00"
        );
        assert_eq!(item.bbox, reader.header.bbox);
        assert_eq!(item.geometry, Geometry::from_bbox(&reader.header.bbox));
    }

    #[test]
    fn should_append_tile_suffix_to_id() {
        let reader = FakeReader::new();
        let item = create_monthly_item(Path::new("/t/wc2.1_30s_wind_03_2_5.tif"), &reader).unwrap();

        assert_eq!(item.id, "wc2.1_30s_3_2_5");
        assert_eq!(item.assets["vapr"].href, "/t/wc2.1_30s_vapr_03_2_5.tif");
    }

    #[test]
    fn should_fail_whole_item_when_a_sibling_is_unreadable() {
        let mut reader = FakeReader::new();
        reader
            .missing
            .insert(PathBuf::from("/cogs/wc2.1_10m_srad_01.tif"));

        let err =
            create_monthly_item(Path::new("/cogs/wc2.1_10m_prec_01.tif"), &reader).unwrap_err();
        let missing = Path::new("/cogs/wc2.1_10m_srad_01.tif");
        assert!(matches!(
            err,
            WorldclimError::RasterRead { ref path, .. } if path == missing
        ));
    }

    #[test]
    fn should_use_first_projection_when_siblings_disagree() {
        let reader = DriftingReader { reads: Cell::new(0) };
        let item = create_monthly_item(Path::new("/cogs/wc2.1_10m_prec_01.tif"), &reader).unwrap();

        assert_eq!(reader.reads.get(), 7);

        let transform = [0.5, 0.0, 0.0, 0.0, -0.5, 90.0];
        let first = RasterHeader::from_transform(transform, 720, 360, Some(4326)).projection();
        assert_eq!(item.properties.projection, first);
        assert_eq!(item.bbox, first.bbox);
        for asset in item.assets.values() {
            assert_eq!(asset.projection, first);
        }
    }

    #[test]
    fn should_build_bioclim_item_with_one_asset() {
        let reader = FakeReader::new();
        let item = create_bioclim_item(Path::new("/cogs/wc2.1_30s_bio_9.tif"), &reader).unwrap();

        assert_eq!(item.id, "wc2.1_30s_bio_9");
        assert_eq!(item.collection.as_deref(), Some("worldclim-bioclim"));
        assert_eq!(item.assets.len(), 1);
        assert_eq!(
            item.assets["bio_9"].title,
            "Mean Temperature of Driest Quarter"
        );
        assert_eq!(
            item.properties.start_datetime.to_rfc3339(),
            "1970-01-01T00:00:00+00:00"
        );
        assert_eq!(
            item.properties.end_datetime.to_rfc3339(),
            "2000-12-31T23:59:59+00:00"
        );
        assert_eq!(reader.opened.borrow().len(), 1);
    }

    #[test]
    fn should_dispatch_on_file_name() {
        let reader = FakeReader::new();

        let monthly = create_item(Path::new("wc2.1_2.5m_vapr_04.tif"), &reader).unwrap();
        assert_eq!(monthly.id, "wc2.1_2.5m_4");
        assert_eq!(monthly.assets.len(), 7);

        let bioclim = create_item(Path::new("wc2.1_2.5m_bio_19.tif"), &reader).unwrap();
        assert_eq!(bioclim.id, "wc2.1_2.5m_bio_19");
        assert_eq!(bioclim.assets.len(), 1);
    }

    #[test]
    fn should_reject_wrong_dataset_or_bad_name() {
        let reader = FakeReader::new();

        assert!(matches!(
            create_monthly_item(Path::new("wc2.1_10m_bio_1.tif"), &reader),
            Err(WorldclimError::MetadataExtraction { .. })
        ));
        assert!(matches!(
            create_bioclim_item(Path::new("wc2.1_10m_prec_01.tif"), &reader),
            Err(WorldclimError::MetadataExtraction { .. })
        ));
        assert!(matches!(
            create_item(Path::new("wc2.1_10m.tif"), &reader),
            Err(WorldclimError::MetadataExtraction { .. })
        ));
        assert!(reader.opened.borrow().is_empty());
    }

    #[test]
    fn should_build_identical_items_from_same_input() {
        let reader = FakeReader::new();
        let path = Path::new("/cogs/wc2.1_10m_prec_01.tif");

        let first = serde_json::to_string(&create_monthly_item(path, &reader).unwrap()).unwrap();
        let second = serde_json::to_string(&create_monthly_item(path, &reader).unwrap()).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn should_read_real_geotiffs() {
        let dir = TempDir::new().unwrap();
        let path = write_monthly_siblings(dir.path(), "wc2.1_10m_prec_01.tif");

        let item = create_monthly_item(&path, &GeoTiffReader).unwrap();

        assert_eq!(item.id, "wc2.1_10m_1");
        assert_eq!(item.assets.len(), 7);
        assert_eq!(item.properties.projection.epsg, Some(4326));
        assert_eq!(item.properties.projection.shape, [4, 8]);
        assert_eq!(item.bbox, [-180.0, -90.0, 180.0, 90.0]);
    }

    #[test]
    fn should_read_real_bioclim_geotiff() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("wc2.1_30s_bio_9.tif");
        write_geotiff(&path, &GeoTiffSpec::global(16, 8));

        let item = create_bioclim_item(&path, &GeoTiffReader).unwrap();

        assert_eq!(item.id, "wc2.1_30s_bio_9");
        assert_eq!(item.assets["bio_9"].projection.shape, [8, 16]);
    }
}
