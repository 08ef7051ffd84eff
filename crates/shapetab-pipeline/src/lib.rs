//! shapetab pipeline - Archive extraction, shapefile discovery and conversion
//!
//! This crate turns an uploaded zip archive into an [`OutputTable`] and writes
//! it out as a spreadsheet.
//!
//! [`OutputTable`]: shapetab_core::models::OutputTable

pub mod archive;
pub mod discovery;
pub mod export;
pub mod extractor;
pub mod pipeline;

pub use archive::extract_zip;
pub use discovery::ShapefileDiscovery;
pub use export::write_xlsx;
pub use extractor::FeatureExtractor;
pub use pipeline::{ArchivePipeline, DEFAULT_OUTPUT_FILE};
