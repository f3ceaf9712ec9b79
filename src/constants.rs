//! Fixed facts about the WorldClim 2.1 historical climate dataset.
//!
//! See the [WorldClim 2.1 page](https://worldclim.org/data/worldclim21.html)
//! for the source of the descriptions below.

pub const DATASET_VERSION: &str = "2.1";
pub const START_YEAR: i32 = 1970;
pub const END_YEAR: i32 = 2000;
pub const EPSG: u32 = 4326;

pub const GLOBAL_BBOX: [f64; 4] = [-180.0, 90.0, 180.0, -90.0];

pub const LICENSE: &str = "CC-BY-SA-4.0";
pub const LICENSE_URL: &str = "https://creativecommons.org/licenses/by-sa/4.0/";
pub const LICENSE_TITLE: &str =
    "Creative Commons - Attribution-ShareAlike 4.0 International - CC BY-SA 4.0";

pub const PROVIDER_NAME: &str = "WorldClim";
pub const PROVIDER_ROLES: [&str; 2] = ["processor", "host"];
pub const PROVIDER_URL: &str = "https://worldclim.org/data/worldclim21.html";

pub const DESCRIPTION: &str = "This is WorldClim version 2.1 climate data for 1970-2000. \
This version was released in January 2020. There are monthly climate data for minimum, mean, \
and maximum temperature, precipitation, solar radiation, wind speed, water vapor pressure, and \
for total precipitation. There are also 19 \u{201c}bioclimatic\u{201d} variables. The data is \
available at the four spatial resolutions, between 30 seconds (~1 km2) to 10 minutes (~340 km2).";

pub const CITATION: &str = "Fick, S.E. and R.J. Hijmans, 2017. WorldClim 2: new 1km spatial \
resolution climate surfaces for global land areas. International Journal of Climatology 37 (12): \
4302-4315.";
pub const DOI: &str = "10.1002/joc.5086";

pub const KEYWORDS: [&str; 4] = ["WorldClim", "climate", "temperature", "precipitation"];

/// `{resolution}` and `{variable}` are substituted per archive.
pub const DATASET_URL_TEMPLATE: &str =
    "https://biogeo.ucdavis.edu/data/worldclim/v2.1/base/wc2.1_{resolution}_{variable}.zip";

#[derive(Debug, PartialEq, Eq)]
/// A climate variable: the short code used in file names and its description.
pub struct ClimateVariable {
    pub key: &'static str,
    pub description: &'static str,
}

const fn var(key: &'static str, description: &'static str) -> ClimateVariable {
    ClimateVariable { key, description }
}

pub static MONTHLY_VARIABLES: [ClimateVariable; 7] = [
    var("tmin", "Minimum Temperature (\u{b0}C)"),
    var("tmax", "Maximum Temperature (\u{b0}C)"),
    var("tavg", "Average Temperature (\u{b0}C)"),
    var("prec", "Precipitation (mm)"),
    var("srad", "Solar Radiation (kJ m-2 day-1)"),
    var("wind", "Wind Speed (m s-1)"),
    var("vapr", "Water Vapor Pressure (kPa)"),
];

pub static BIOCLIM_VARIABLES: [ClimateVariable; 19] = [
    var("bio_1", "Annual Mean Temperature"),
    var("bio_2", "Mean Diurnal Range (Mean of monthly (max temp - min temp))"),
    var("bio_3", "Isothermality (BIO2/BIO7) (\u{d7}100)"),
    var("bio_4", "Temperature Seasonality (standard deviation \u{d7}100)"),
    var("bio_5", "Max Temperature of Warmest Month"),
    var("bio_6", "Min Temperature of Coldest Month"),
    var("bio_7", "Temperature Annual Range (BIO5-BIO6)"),
    var("bio_8", "Mean Temperature of Wettest Quarter"),
    var("bio_9", "Mean Temperature of Driest Quarter"),
    var("bio_10", "Mean Temperature of Warmest Quarter"),
    var("bio_11", "Mean Temperature of Coldest Quarter"),
    var("bio_12", "Annual Precipitation"),
    var("bio_13", "Precipitation of Wettest Month"),
    var("bio_14", "Precipitation of Driest Month"),
    var("bio_15", "Precipitation Seasonality (Coefficient of Variation)"),
    var("bio_16", "Precipitation of Wettest Quarter"),
    var("bio_17", "Precipitation of Driest Quarter"),
    var("bio_18", "Precipitation of Warmest Quarter"),
    var("bio_19", "Precipitation of Coldest Quarter"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// The two published products: monthly normals and derived bioclimatic variables.
pub enum Dataset {
    Monthly,
    Bioclim,
}

impl Dataset {
    pub const ALL: [Dataset; 2] = [Dataset::Monthly, Dataset::Bioclim];

    pub fn collection_id(&self) -> &'static str {
        match self {
            Dataset::Monthly => "worldclim-monthly",
            Dataset::Bioclim => "worldclim-bioclim",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Dataset::Monthly => "WorldClim 2.1 historical monthly climate data",
            Dataset::Bioclim => "WorldClim 2.1 historical bioclimatic variables",
        }
    }

    pub fn variables(&self) -> &'static [ClimateVariable] {
        match self {
            Dataset::Monthly => &MONTHLY_VARIABLES,
            Dataset::Bioclim => &BIOCLIM_VARIABLES,
        }
    }

    /// Variable tokens used in the archive names on the download server.
    pub fn archive_tokens(&self) -> Vec<&'static str> {
        match self {
            Dataset::Monthly => MONTHLY_VARIABLES.iter().map(|v| v.key).collect(),
            Dataset::Bioclim => vec!["bio"],
        }
    }
}

pub fn monthly_variable(key: &str) -> Option<&'static ClimateVariable> {
    MONTHLY_VARIABLES.iter().find(|v| v.key == key)
}

pub fn bioclim_variable(index: u32) -> Option<&'static ClimateVariable> {
    match index {
        1..=19 => BIOCLIM_VARIABLES.get(index as usize - 1),
        _ => None,
    }
}
