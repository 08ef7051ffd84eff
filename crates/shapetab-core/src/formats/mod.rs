//! Readers for the vector formats shapetab ingests.
//!
//! Only ESRI Shapefiles are read. The reader turns every record into a
//! [`geo::Geometry`] so downstream code never sees format-specific shapes.

use std::path::Path;

pub mod shapefile;

pub use self::shapefile::{ShapeFeature, ShapefileReader};

/// File extension of the main shapefile component
pub const SHAPEFILE_EXTENSION: &str = "shp";

/// Check if a path has a specific extension, ignoring case
pub fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case(ext))
        .unwrap_or(false)
}
