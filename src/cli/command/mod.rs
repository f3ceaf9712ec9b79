pub mod cogs;
pub mod collection;
pub mod item;

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};

pub use cogs::create_all_cogs;
pub use collection::create_collection;
pub use item::create_item;

use super::Destination;

impl Destination {
    /// The chosen directory, or `~/worldclim-stac`, as an absolute path.
    pub fn resolve(&self) -> Result<PathBuf> {
        let path = match &self.destination {
            Some(path) => path.clone(),
            None => dirs::home_dir()
                .map(|home| home.join("worldclim-stac"))
                .ok_or_else(|| anyhow!("No home directory; pass --destination"))?,
        };

        std::path::absolute(&path)
            .with_context(|| format!("Failed to resolve `{}`", path.display()))
    }
}
