//! Decoding and encoding of WorldClim raster file names.

pub mod file_name;
pub mod month;
pub mod resolution;

pub use file_name::{FileName, Layer};
pub use month::Month;
pub use resolution::Resolution;
