//! STAC object model for the WorldClim collections and items.
//!
//! Only the fields this dataset populates are modelled. Maps are ordered so
//! that serialising the same item twice yields identical JSON.

pub mod collection;
pub mod io;
pub mod item;

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use collection::{create_bioclim_collection, create_monthly_collection};
pub use io::{save_collection, save_item};
pub use item::{create_bioclim_item, create_item, create_monthly_item};

pub const STAC_VERSION: &str = "1.0.0";
pub const PROJECTION_EXTENSION: &str =
    "https://stac-extensions.github.io/projection/v1.0.0/schema.json";
pub const SCIENTIFIC_EXTENSION: &str =
    "https://stac-extensions.github.io/scientific/v1.0.0/schema.json";
pub const ITEM_ASSETS_EXTENSION: &str =
    "https://stac-extensions.github.io/item-assets/v1.0.0/schema.json";

pub const COG_MEDIA_TYPE: &str = "image/tiff; application=geotiff; profile=cloud-optimized";
pub const JSON_MEDIA_TYPE: &str = "application/json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Projection extension fields shared by an item and each of its assets.
pub struct Projection {
    #[serde(rename = "proj:epsg")]
    pub epsg: Option<u32>,
    #[serde(rename = "proj:transform")]
    pub transform: [f64; 6],
    #[serde(rename = "proj:bbox")]
    pub bbox: [f64; 4],
    #[serde(rename = "proj:shape")]
    pub shape: [usize; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// GeoJSON polygon.
pub struct Geometry {
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: Vec<Vec<[f64; 2]>>,
}

impl Geometry {
    /// Counter-clockwise ring around `[minx, miny, maxx, maxy]`.
    pub fn from_bbox(bbox: &[f64; 4]) -> Self {
        let [west, south, east, north] = *bbox;
        Geometry {
            kind: "Polygon".to_string(),
            coordinates: vec![vec![
                [west, south],
                [east, south],
                [east, north],
                [west, north],
                [west, south],
            ]],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub rel: String,
    pub href: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Link {
    pub fn new(rel: &str, href: impl Into<String>) -> Self {
        Link {
            rel: rel.to_string(),
            href: href.into(),
            media_type: None,
            title: None,
        }
    }

    pub fn json(mut self) -> Self {
        self.media_type = Some(JSON_MEDIA_TYPE.to_string());
        self
    }

    pub fn titled(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    pub name: String,
    pub roles: Vec<String>,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub href: String,
    #[serde(rename = "type")]
    pub media_type: String,
    pub roles: Vec<String>,
    pub title: String,
    #[serde(flatten)]
    pub projection: Projection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemProperties {
    pub title: String,
    pub datetime: Option<DateTime<Utc>>,
    pub start_datetime: DateTime<Utc>,
    pub end_datetime: DateTime<Utc>,
    #[serde(flatten)]
    pub projection: Projection,
    #[serde(rename = "sci:citation")]
    pub citation: String,
    #[serde(rename = "sci:doi")]
    pub doi: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(rename = "type")]
    pub kind: String,
    pub stac_version: String,
    pub stac_extensions: Vec<String>,
    pub id: String,
    pub geometry: Geometry,
    pub bbox: [f64; 4],
    pub properties: ItemProperties,
    pub links: Vec<Link>,
    pub assets: BTreeMap<String, Asset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpatialExtent {
    pub bbox: Vec<[f64; 4]>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemporalExtent {
    pub interval: Vec<[Option<DateTime<Utc>>; 2]>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub spatial: SpatialExtent,
    pub temporal: TemporalExtent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Template for an asset every item of a collection may carry.
pub struct ItemAssetDefinition {
    #[serde(rename = "type")]
    pub media_type: String,
    pub roles: Vec<String>,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summaries {
    #[serde(rename = "proj:epsg")]
    pub epsg: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    #[serde(rename = "type")]
    pub kind: String,
    pub stac_version: String,
    pub stac_extensions: Vec<String>,
    pub id: String,
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub license: String,
    pub providers: Vec<Provider>,
    pub extent: Extent,
    pub summaries: Summaries,
    pub links: Vec<Link>,
    pub item_assets: BTreeMap<String, ItemAssetDefinition>,
    #[serde(rename = "sci:citation")]
    pub citation: String,
    #[serde(rename = "sci:doi")]
    pub doi: String,
}
