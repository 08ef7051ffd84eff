//! Output rows and the table they are collected into.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::coordinate::{Coordinate, ProjectedCoordinate};

/// One converted feature: its centroid expressed four ways plus its rings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputRow {
    #[serde(rename = "X")]
    pub x: f64,
    #[serde(rename = "Y")]
    pub y: f64,
    #[serde(rename = "xDMS")]
    pub x_dms: String,
    #[serde(rename = "yDMS")]
    pub y_dms: String,
    #[serde(rename = "xWM")]
    pub x_wm: i64,
    #[serde(rename = "yWM")]
    pub y_wm: i64,
    #[serde(rename = "EsriJSON_Polygons")]
    pub esri_json_polygons: String,
}

impl OutputRow {
    /// The centroid this row was derived from
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.x, self.y)
    }

    pub fn projected(&self) -> ProjectedCoordinate {
        ProjectedCoordinate { x: self.x_wm, y: self.y_wm }
    }
}

/// Rows from every shapefile of one archive, in discovery then file order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputTable {
    pub rows: Vec<OutputRow>,
    /// Shapefiles that contributed rows, relative to the archive root
    pub sources: Vec<PathBuf>,
}

impl OutputTable {
    /// Spreadsheet header, in column order.
    pub const COLUMNS: [&'static str; 7] =
        ["X", "Y", "xDMS", "yDMS", "xWM", "yWM", "EsriJSON_Polygons"];

    pub fn new() -> Self {
        Self::default()
    }

    /// Append the rows of one shapefile
    pub fn extend_from(&mut self, source: PathBuf, rows: Vec<OutputRow>) {
        self.sources.push(source);
        self.rows.extend(rows);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// What a completed pipeline run produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionSummary {
    pub output_path: PathBuf,
    pub rows: usize,
    pub shapefiles: usize,
}
