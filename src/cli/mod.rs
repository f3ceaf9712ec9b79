//! Command line interface.

pub mod command;

use std::{path::PathBuf, time::Duration};

use clap::{command, Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

use crate::cog::DEFAULT_PROGRAM;

#[derive(Parser)]
#[command(version, about, long_about = None)]
/// Contains the commands
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone)]
pub struct Destination {
    /// The output directory for the STAC json [default: ~/worldclim-stac]
    #[arg(short, long, env = "WORLDCLIM_DESTINATION")]
    pub destination: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download and convert all data files to COGs
    CreateAllCogs {
        #[command(flatten)]
        destination: Destination,
        /// Log the conversions instead of running them
        #[arg(long)]
        dry_run: bool,
        /// Log failed conversions and carry on
        #[arg(long)]
        keep_going: bool,
        /// Raster conversion program
        #[arg(long, env = "WORLDCLIM_GDAL_TRANSLATE", default_value = DEFAULT_PROGRAM)]
        gdal_translate: String,
    },
    /// Create the monthly STAC collection
    CreateMonthlyCollection {
        #[command(flatten)]
        destination: Destination,
    },
    /// Create the bioclimatic STAC collection
    CreateBioclimCollection {
        #[command(flatten)]
        destination: Destination,
    },
    /// Create a monthly STAC item from one of the month's COGs
    CreateMonthlyItem {
        /// Path to one COG of the month; the other variables must sit beside it
        #[arg(short, long)]
        cog: PathBuf,
        #[command(flatten)]
        destination: Destination,
    },
    /// Create a STAC item from a COG, monthly or bioclimatic by its file name
    CreateItem {
        /// Path to the COG; monthly COGs need their sibling variables beside them
        #[arg(short, long)]
        cog: PathBuf,
        #[command(flatten)]
        destination: Destination,
    },
    /// Create a bioclimatic STAC item from its COG
    CreateBioclimItem {
        /// Path to the bioclimatic COG
        #[arg(short, long)]
        cog: PathBuf,
        #[command(flatten)]
        destination: Destination,
    },
}

/// Creates a spinner.
pub fn create_spinner(message: String) -> ProgressBar {
    let bar = ProgressBar::new_spinner().with_message(message);
    bar.enable_steady_tick(Duration::from_millis(100));

    bar
}

/// Creates a progress bar.
pub fn create_progress_bar(size: u64, message: String) -> ProgressBar {
    ProgressBar::new(size).with_message(message).with_style(
        ProgressStyle::with_template("[{eta_precise}] {bar:40.cyan/blue} {msg}")
            .unwrap()
            .progress_chars("##-"),
    )
}
