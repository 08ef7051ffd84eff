//! Project command implementation

use crate::cli::ProjectArgs;
use crate::output::OutputWriter;
use crate::output_types::ProjectOutput;
use anyhow::{Context, Result};
use shapetab_core::config::{CliConfigOverrides, LayeredConfig};
use shapetab_core::models::Coordinate;
use shapetab_geo::{build_transform, project};

pub fn execute(args: ProjectArgs, output: &OutputWriter) -> Result<()> {
    let coord = Coordinate::new(args.lon, args.lat);
    if !coord.is_in_range() {
        output.warning(format!(
            "({}, {}) is outside the WGS 84 range; projecting anyway",
            args.lon, args.lat
        ));
    }

    let cwd = std::env::current_dir().context("Failed to resolve working directory")?;
    let mut config = LayeredConfig::load(&cwd).context("Failed to load configuration")?;
    config.update_from_cli(CliConfigOverrides {
        transform: args.transform,
        ..Default::default()
    });

    let transform = build_transform(config.transform.value)?;
    let projected = project(coord, transform.as_ref())
        .with_context(|| format!("Failed to project ({}, {})", args.lon, args.lat))?;

    if output.is_json() {
        output.result(ProjectOutput {
            lon: args.lon,
            lat: args.lat,
            x: projected.x,
            y: projected.y,
            transform: transform.name().to_string(),
        })?;
    } else {
        output.kv("Longitude", args.lon);
        output.kv("Latitude", args.lat);
        output.kv("xWM", projected.x);
        output.kv("yWM", projected.y);
    }

    Ok(())
}
