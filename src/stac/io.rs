//! Writes collections and items to a destination directory as JSON.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Serialize;
use tracing::info;

use crate::error::{Result, WorldclimError};

use super::{Collection, Item, Link};

pub const COLLECTION_FILE_NAME: &str = "collection.json";

/// Saves `collection` as `<destination>/collection.json`.
pub fn save_collection(collection: &Collection, destination: &Path) -> Result<PathBuf> {
    let file_path = absolute(destination)?.join(COLLECTION_FILE_NAME);

    let mut collection = collection.clone();
    collection.links.retain(|link| link.rel != "self");
    collection
        .links
        .push(Link::new("self", file_path.to_string_lossy()).json());

    write_json(&collection, &file_path)?;
    info!(id = %collection.id, path = %file_path.display(), "saved collection");

    Ok(file_path)
}

/// Saves `item` as `<destination>/<stem of representative>.json`. Asset hrefs
/// that point inside `destination` are made relative to it; all others are
/// made absolute.
pub fn save_item(item: &Item, representative: &Path, destination: &Path) -> Result<PathBuf> {
    let destination = absolute(destination)?;
    let stem = representative
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| item.id.clone());
    let file_path = destination.join(format!("{}.json", stem));

    let mut item = item.clone();
    for asset in item.assets.values_mut() {
        asset.href = relative_href(&asset.href, &destination)?;
    }
    item.links.retain(|link| link.rel != "self");
    item.links.push(Link::new("self", file_path.to_string_lossy()).json());

    write_json(&item, &file_path)?;
    info!(id = %item.id, path = %file_path.display(), "saved item");

    Ok(file_path)
}

fn write_json<T: Serialize>(value: &T, file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent).map_err(|e| WorldclimError::io(parent, e))?;
    }
    let json = serde_json::to_string_pretty(value)?;
    fs::write(file_path, json).map_err(|e| WorldclimError::io(file_path, e))?;

    Ok(())
}

fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).map_err(|e| WorldclimError::io(path, e))
}

/// Both sides are made absolute first so that `out/a.tif` and `./out` agree.
fn relative_href(href: &str, base: &Path) -> Result<String> {
    let target = absolute(Path::new(href))?;
    let base = absolute(base)?;

    Ok(match target.strip_prefix(&base) {
        Ok(relative) => format!("./{}", relative.to_string_lossy()),
        Err(_) => target.to_string_lossy().to_string(),
    })
}

#[cfg(test)]
mod tests {

    use tempfile::TempDir;

    use super::*;
    use crate::{
        raster::GeoTiffReader,
        stac::{create_monthly_collection, create_monthly_item},
        test_utils::write_monthly_siblings,
    };

    #[test]
    fn should_relativise_hrefs_under_base() {
        let base = Path::new("/out");
        assert_eq!(relative_href("/out/cogs/a.tif", base).unwrap(), "./cogs/a.tif");
        assert_eq!(
            relative_href("/elsewhere/a.tif", base).unwrap(),
            "/elsewhere/a.tif"
        );
    }

    #[test]
    fn should_relativise_hrefs_spelled_differently_from_base() {
        assert_eq!(
            relative_href("out/wc2.1_10m_tmin_01.tif", Path::new("./out")).unwrap(),
            "./wc2.1_10m_tmin_01.tif"
        );
        assert_eq!(
            relative_href("./out/10m/wc2.1_10m_tmin_01.tif", Path::new("out")).unwrap(),
            "./10m/wc2.1_10m_tmin_01.tif"
        );
    }

    #[test]
    fn should_make_relative_hrefs_outside_base_absolute() {
        let href = relative_href("cogs/wc2.1_10m_tmin_01.tif", Path::new("out")).unwrap();

        assert!(Path::new(&href).is_absolute());
        assert_eq!(
            PathBuf::from(&href),
            std::env::current_dir()
                .unwrap()
                .join("cogs")
                .join("wc2.1_10m_tmin_01.tif")
        );
    }

    #[test]
    fn should_save_collection_json() {
        let dir = TempDir::new().unwrap();
        let path = save_collection(&create_monthly_collection(), dir.path()).unwrap();

        assert_eq!(path, dir.path().join("collection.json"));

        let saved: Collection = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(saved.id, "worldclim-monthly");
        assert_eq!(saved.links.iter().filter(|l| l.rel == "self").count(), 1);
        assert_eq!(saved.item_assets, create_monthly_collection().item_assets);
    }

    #[test]
    fn should_save_item_named_after_representative() {
        let dir = TempDir::new().unwrap();
        let cogs = write_monthly_siblings(dir.path(), "wc2.1_10m_prec_01.tif");
        let item = create_monthly_item(&cogs, &GeoTiffReader).unwrap();

        let path = save_item(&item, &cogs, dir.path()).unwrap();
        assert_eq!(path, dir.path().join("wc2.1_10m_prec_01.json"));

        let jsons: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().map_or(false, |x| x == "json"))
            .collect();
        assert_eq!(jsons.len(), 1);

        let saved: Item = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(saved.id, "wc2.1_10m_1");
        assert_eq!(saved.assets["tmin"].href, "./wc2.1_10m_tmin_01.tif");
        assert_eq!(saved.properties, item.properties);
    }
}
