mod cli;
mod cog;
mod constants;
mod download;
mod error;
mod naming;
mod raster;
mod stac;

#[cfg(test)]
mod test_utils;

use anyhow::{Error, Result};
use clap::Parser;
use cli::{command, Cli, Commands};
use tracing_subscriber::EnvFilter;

use crate::{cog::CogConverter, constants::Dataset, raster::GeoTiffReader};

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let saved = match &cli.command {
        Commands::CreateAllCogs {
            destination,
            dry_run,
            keep_going,
            gdal_translate,
        } => {
            let converter = CogConverter {
                program: gdal_translate.clone(),
                dry_run: *dry_run,
                raise_on_fail: !*keep_going,
            };
            command::create_all_cogs(&destination.resolve()?, &converter).await?
        }
        Commands::CreateMonthlyCollection { destination } => {
            command::create_collection(Dataset::Monthly, &destination.resolve()?)?
        }
        Commands::CreateBioclimCollection { destination } => {
            command::create_collection(Dataset::Bioclim, &destination.resolve()?)?
        }
        Commands::CreateItem { cog, destination } => {
            command::create_item(None, cog, &destination.resolve()?, &GeoTiffReader)?
        }
        Commands::CreateMonthlyItem { cog, destination } => command::create_item(
            Some(Dataset::Monthly),
            cog,
            &destination.resolve()?,
            &GeoTiffReader,
        )?,
        Commands::CreateBioclimItem { cog, destination } => command::create_item(
            Some(Dataset::Bioclim),
            cog,
            &destination.resolve()?,
            &GeoTiffReader,
        )?,
    };

    println!("File saved to `{}`", saved);

    Ok(())
}
