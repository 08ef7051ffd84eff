use chrono::Utc;
use shapetab_core::error::Result;
use shapetab_core::models::ConversionSummary;
use std::path::{Path, PathBuf};

use crate::error::ApiError;
use crate::state::{AppState, ConvertedOutput};

/// Upload name used when the client sends none
const DEFAULT_UPLOAD_NAME: &str = "upload.zip";

/// Service for converting uploaded archives
pub struct ConvertService;

impl ConvertService {
    /// Convert an uploaded archive and publish the result to the output slot.
    ///
    /// The slot lock is held while the conversion runs on a blocking thread.
    /// The slot is cleared before the run, so a failed conversion leaves
    /// nothing to download.
    pub async fn convert_upload(
        state: &AppState,
        filename: &str,
        data: Vec<u8>,
    ) -> std::result::Result<ConvertedOutput, ApiError> {
        let mut slot = state.latest.lock().await;
        *slot = None;

        let pipeline = state.pipeline.clone();
        let output_dir = state.output_dir.clone();
        let upload_name = sanitize_filename(filename);

        let summary = tokio::task::spawn_blocking(move || -> Result<Option<ConversionSummary>> {
            let upload_dir = tempfile::Builder::new().prefix("shapetab-upload-").tempdir()?;
            let archive = upload_dir.path().join(&upload_name);
            std::fs::write(&archive, &data)?;
            pipeline.run(Some(&archive), &output_dir)
        })
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Conversion task failed");
            ApiError::internal("Conversion task failed").with_details(e.to_string())
        })?
        .map_err(|e| {
            tracing::error!(error = %e, filename = %filename, "Conversion failed");
            ApiError::from(e)
        })?
        .ok_or_else(|| ApiError::bad_request("No archive provided"))?;

        let output = ConvertedOutput {
            summary,
            converted_at: Utc::now(),
        };
        *slot = Some(output.clone());

        Ok(output)
    }
}

/// Keep only the final path component of a client-supplied name
fn sanitize_filename(filename: &str) -> PathBuf {
    Path::new(filename)
        .file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_UPLOAD_NAME))
}
