use std::sync::Arc;

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};

use crate::error::ApiError;
use crate::state::AppState;

const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Serve the most recently produced spreadsheet
pub async fn handle_download(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let output = state
        .latest_output()
        .await
        .ok_or_else(|| ApiError::not_found("No spreadsheet has been produced yet"))?;

    let path = &output.summary.output_path;
    let bytes = tokio::fs::read(path).await.map_err(|e| {
        tracing::error!(path = %path.display(), error = %e, "Failed to read spreadsheet");
        ApiError::internal("Failed to read spreadsheet").with_details(e.to_string())
    })?;

    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("output.xlsx")
        .to_string();

    Ok((
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, format!("attachment; filename=\"{}\"", filename)),
        ],
        bytes,
    )
        .into_response())
}
