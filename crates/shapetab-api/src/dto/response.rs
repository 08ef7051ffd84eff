use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::state::ConvertedOutput;

/// Route the latest spreadsheet is served from
pub const DOWNLOAD_PATH: &str = "/api/v1/download";

/// Convert operation response
#[derive(Debug, Serialize)]
pub struct ConvertResponse {
    pub success: bool,
    pub rows: usize,
    pub shapefiles: usize,
    pub download_url: &'static str,
    pub message: String,
    pub converted_at: DateTime<Utc>,
}

impl ConvertResponse {
    pub fn success(filename: &str, output: &ConvertedOutput) -> Self {
        let summary = &output.summary;
        Self {
            success: true,
            rows: summary.rows,
            shapefiles: summary.shapefiles,
            download_url: DOWNLOAD_PATH,
            message: format!(
                "Converted {} with {} features from {} shapefiles",
                filename, summary.rows, summary.shapefiles
            ),
            converted_at: output.converted_at,
        }
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok",
            service: "shapetab-api",
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}
