use std::sync::Arc;

use axum::{extract::Multipart, extract::State, Json};

use crate::dto::ConvertResponse;
use crate::error::ApiError;
use crate::services::ConvertService;
use crate::state::AppState;

/// Multipart field carrying the zip archive
pub const ARCHIVE_FIELD: &str = "archive";

pub async fn handle_convert(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<ConvertResponse>, ApiError> {
    tracing::info!("Processing convert request");

    let (filename, data) = extract_archive(&mut multipart).await?;

    tracing::info!(filename = %filename, size = data.len(), "Received archive for conversion");

    let output = ConvertService::convert_upload(&state, &filename, data).await?;

    tracing::info!(
        filename = %filename,
        rows = output.summary.rows,
        shapefiles = output.summary.shapefiles,
        "Conversion finished"
    );

    Ok(Json(ConvertResponse::success(&filename, &output)))
}

async fn extract_archive(multipart: &mut Multipart) -> Result<(String, Vec<u8>), ApiError> {
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        ApiError::bad_request("Failed to parse multipart form").with_details(e.to_string())
    })? {
        let name = field.name().unwrap_or("").to_string();

        if name == ARCHIVE_FIELD {
            let filename = field.file_name().unwrap_or("upload.zip").to_string();
            let data = field.bytes().await.map_err(|e| {
                ApiError::bad_request("Failed to read archive data").with_details(e.to_string())
            })?;
            return Ok((filename, data.to_vec()));
        }
    }

    Err(ApiError::bad_request("No archive provided")
        .with_details("Expected an 'archive' field in the multipart form"))
}
