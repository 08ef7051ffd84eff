use chrono::{DateTime, Utc};
use shapetab_core::models::ConversionSummary;
use shapetab_pipeline::ArchivePipeline;
use std::path::PathBuf;
use tokio::sync::Mutex;

/// The most recent successful conversion
#[derive(Debug, Clone)]
pub struct ConvertedOutput {
    pub summary: ConversionSummary,
    pub converted_at: DateTime<Utc>,
}

pub struct AppState {
    pub pipeline: ArchivePipeline,
    pub output_dir: PathBuf,
    pub max_upload_bytes: usize,
    /// Single output slot. Held for the whole conversion, so uploads are
    /// processed one at a time and the last successful one wins.
    pub latest: Mutex<Option<ConvertedOutput>>,
}

impl AppState {
    pub fn new(pipeline: ArchivePipeline, output_dir: PathBuf, max_upload_bytes: usize) -> Self {
        Self {
            pipeline,
            output_dir,
            max_upload_bytes,
            latest: Mutex::new(None),
        }
    }

    /// Snapshot of the latest output, if any
    pub async fn latest_output(&self) -> Option<ConvertedOutput> {
        self.latest.lock().await.clone()
    }
}
