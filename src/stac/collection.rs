//! Dataset-level collections. These depend only on fixed constants.

use std::collections::BTreeMap;

use crate::{
    constants::{
        Dataset, CITATION, DESCRIPTION, DOI, END_YEAR, EPSG, GLOBAL_BBOX, KEYWORDS, LICENSE,
        LICENSE_TITLE, LICENSE_URL, PROVIDER_NAME, PROVIDER_ROLES, PROVIDER_URL, START_YEAR,
    },
    naming::Month,
};

use super::{
    Collection, Extent, ItemAssetDefinition, Link, Provider, SpatialExtent, Summaries,
    TemporalExtent, COG_MEDIA_TYPE, ITEM_ASSETS_EXTENSION, PROJECTION_EXTENSION,
    SCIENTIFIC_EXTENSION, STAC_VERSION,
};

pub fn create_monthly_collection() -> Collection {
    create_collection(Dataset::Monthly)
}

pub fn create_bioclim_collection() -> Collection {
    create_collection(Dataset::Bioclim)
}

/// Builds the collection for `dataset`, with an item-asset template for every
/// variable an item of that dataset may carry.
pub fn create_collection(dataset: Dataset) -> Collection {
    let item_assets = dataset
        .variables()
        .iter()
        .map(|v| {
            (
                v.key.to_string(),
                ItemAssetDefinition {
                    media_type: COG_MEDIA_TYPE.to_string(),
                    roles: vec!["data".to_string()],
                    title: v.description.to_string(),
                },
            )
        })
        .collect::<BTreeMap<_, _>>();

    let start = Month::January.start_in(START_YEAR);
    let end = Month::December.end_in(END_YEAR);

    Collection {
        kind: "Collection".to_string(),
        stac_version: STAC_VERSION.to_string(),
        stac_extensions: vec![
            ITEM_ASSETS_EXTENSION.to_string(),
            PROJECTION_EXTENSION.to_string(),
            SCIENTIFIC_EXTENSION.to_string(),
        ],
        id: dataset.collection_id().to_string(),
        title: dataset.title().to_string(),
        description: DESCRIPTION.to_string(),
        keywords: KEYWORDS.iter().map(|k| k.to_string()).collect(),
        license: LICENSE.to_string(),
        providers: vec![Provider {
            name: PROVIDER_NAME.to_string(),
            roles: PROVIDER_ROLES.iter().map(|r| r.to_string()).collect(),
            url: PROVIDER_URL.to_string(),
        }],
        extent: Extent {
            spatial: SpatialExtent {
                bbox: vec![GLOBAL_BBOX],
            },
            temporal: TemporalExtent {
                interval: vec![[Some(start), Some(end)]],
            },
        },
        summaries: Summaries { epsg: vec![EPSG] },
        links: vec![Link::new("license", LICENSE_URL).titled(LICENSE_TITLE)],
        item_assets,
        citation: CITATION.to_string(),
        doi: DOI.to_string(),
    }
}
