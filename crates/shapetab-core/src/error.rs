//! Error types for shapetab

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShapetabError {
    // Archive errors
    #[error("Archive error for {path}: {message}")]
    Archive { path: PathBuf, message: String },

    // Read errors
    #[error("Failed to read shapefile {path}: {message}")]
    ShapefileRead { path: PathBuf, message: String },

    // Geometry errors
    #[error("Unsupported geometry type: {kind}. Only Polygon and MultiPolygon can be serialized to rings")]
    UnsupportedGeometry { kind: String },

    #[error("Empty geometry: {reason}")]
    EmptyGeometry { reason: String },

    // Projection errors
    #[error("Projection failed: {message}")]
    Projection { message: String },

    // Export errors
    #[error("Failed to write spreadsheet: {message}")]
    Export { message: String },

    // Configuration errors
    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl ShapetabError {
    /// Whether the error was caused by the uploaded input rather than the host.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            ShapetabError::Archive { .. }
                | ShapetabError::ShapefileRead { .. }
                | ShapetabError::UnsupportedGeometry { .. }
                | ShapetabError::EmptyGeometry { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ShapetabError>;
