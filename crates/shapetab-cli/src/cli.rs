use clap::{Parser, Subcommand};
use shapetab_core::config::{parse_tolerance, parse_transform_kind, TransformKind};
use std::path::PathBuf;

/// shapetab - Shapefile archives to centroid spreadsheets
#[derive(Parser, Debug)]
#[command(name = "shapetab")]
#[command(about = "Convert zipped shapefiles into a spreadsheet of centroids", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert a zip archive of shapefiles into a spreadsheet
    Convert(ConvertArgs),

    /// Format a decimal degree value as degrees, minutes and seconds
    Dms(DmsArgs),

    /// Project a WGS 84 coordinate to Web Mercator meters
    Project(ProjectArgs),

    /// Show resolved configuration values and where they came from
    Config,
}

#[derive(Parser, Debug)]
pub struct ConvertArgs {
    /// Path to the zip archive
    pub archive: PathBuf,

    /// Directory the spreadsheet is written into
    #[arg(long, short = 'o')]
    pub output_dir: Option<PathBuf>,

    /// Spreadsheet file name
    #[arg(long)]
    pub output_file: Option<String>,

    /// Ring simplification tolerance in degrees
    #[arg(long, value_parser = tolerance_arg)]
    pub tolerance: Option<f64>,

    /// Projection backend (spherical or proj)
    #[arg(long, value_parser = transform_arg)]
    pub transform: Option<TransformKind>,

    /// Print the first N rows after converting
    #[arg(long, value_name = "N")]
    pub preview: Option<usize>,
}

#[derive(Parser, Debug)]
pub struct DmsArgs {
    /// Decimal degrees
    #[arg(allow_negative_numbers = true)]
    pub value: f64,
}

#[derive(Parser, Debug)]
pub struct ProjectArgs {
    /// Longitude in decimal degrees
    #[arg(allow_negative_numbers = true)]
    pub lon: f64,

    /// Latitude in decimal degrees
    #[arg(allow_negative_numbers = true)]
    pub lat: f64,

    /// Projection backend (spherical or proj)
    #[arg(long, value_parser = transform_arg)]
    pub transform: Option<TransformKind>,
}

fn tolerance_arg(s: &str) -> Result<f64, String> {
    parse_tolerance(s).map_err(|e| e.to_string())
}

fn transform_arg(s: &str) -> Result<TransformKind, String> {
    parse_transform_kind(s).map_err(|e| e.to_string())
}
