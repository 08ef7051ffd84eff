use serde::Serialize;
use shapetab_core::models::OutputRow;
use std::path::PathBuf;
use tabled::Tabled;

/// Output for convert command
#[derive(Debug, Serialize)]
pub struct ConvertOutput {
    pub archive: PathBuf,
    pub output_path: PathBuf,
    pub rows: usize,
    pub shapefiles: Vec<PathBuf>,
    pub preview: Vec<OutputRow>,
}

/// Output for dms command
#[derive(Debug, Serialize)]
pub struct DmsOutput {
    pub value: f64,
    pub dms: String,
    pub degrees: u32,
    pub minutes: u32,
    pub seconds: f64,
}

/// Output for project command
#[derive(Debug, Serialize)]
pub struct ProjectOutput {
    pub lon: f64,
    pub lat: f64,
    pub x: i64,
    pub y: i64,
    pub transform: String,
}

#[derive(Debug, Serialize)]
pub struct ConfigEntry {
    pub key: String,
    pub value: String,
    pub source: String,
}

/// One row of the human-readable conversion preview
#[derive(Tabled)]
pub struct PreviewRow {
    #[tabled(rename = "X")]
    pub x: String,
    #[tabled(rename = "Y")]
    pub y: String,
    #[tabled(rename = "xDMS")]
    pub x_dms: String,
    #[tabled(rename = "yDMS")]
    pub y_dms: String,
    #[tabled(rename = "xWM")]
    pub x_wm: i64,
    #[tabled(rename = "yWM")]
    pub y_wm: i64,
    #[tabled(rename = "EsriJSON_Polygons")]
    pub rings: String,
}

/// Longest ring JSON shown in a preview cell
const PREVIEW_RINGS_CHARS: usize = 40;

impl From<&OutputRow> for PreviewRow {
    fn from(row: &OutputRow) -> Self {
        Self {
            x: format!("{:.6}", row.x),
            y: format!("{:.6}", row.y),
            x_dms: row.x_dms.clone(),
            y_dms: row.y_dms.clone(),
            x_wm: row.x_wm,
            y_wm: row.y_wm,
            rings: truncate(&row.esri_json_polygons, PREVIEW_RINGS_CHARS),
        }
    }
}

#[derive(Tabled)]
pub struct ConfigRow {
    #[tabled(rename = "Key")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
    #[tabled(rename = "Source")]
    pub source: String,
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{}…", &text[..end]),
        None => text.to_string(),
    }
}
