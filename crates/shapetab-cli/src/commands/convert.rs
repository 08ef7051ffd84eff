//! Convert command implementation

use crate::cli::ConvertArgs;
use crate::output::OutputWriter;
use crate::output_types::{ConvertOutput, PreviewRow};
use anyhow::{bail, Context, Result};
use shapetab_core::config::{CliConfigOverrides, LayeredConfig};
use shapetab_pipeline::ArchivePipeline;

pub fn execute(args: ConvertArgs, output: &OutputWriter) -> Result<()> {
    if !args.archive.is_file() {
        bail!("Archive not found: {}", args.archive.display());
    }

    let cwd = std::env::current_dir().context("Failed to resolve working directory")?;
    let mut config = LayeredConfig::load(&cwd).context("Failed to load configuration")?;
    config.update_from_cli(CliConfigOverrides {
        tolerance: args.tolerance,
        output_dir: args.output_dir,
        output_file: args.output_file,
        transform: args.transform,
    });

    let pipeline = ArchivePipeline::from_config(&config)?;
    let output_dir = &config.output_dir.value;

    let table = pipeline
        .process(&args.archive)
        .with_context(|| format!("Failed to convert {}", args.archive.display()))?;

    if table.sources.is_empty() {
        output.warning(format!("No shapefiles found in {}", args.archive.display()));
    }

    let output_path = pipeline
        .export(&table, output_dir)
        .with_context(|| format!("Failed to write spreadsheet to {}", output_dir.display()))?;

    let preview_len = args.preview.unwrap_or(0).min(table.len());

    if output.is_json() {
        output.result(ConvertOutput {
            archive: args.archive,
            output_path,
            rows: table.len(),
            preview: table.rows[..preview_len].to_vec(),
            shapefiles: table.sources,
        })?;
    } else {
        output.success(format!(
            "Converted {} features from {} shapefiles",
            table.len(),
            table.sources.len()
        ));
        output.kv("Spreadsheet", output_path.display());

        if args.preview.is_some() {
            output.section("Preview");
            output.table(table.rows[..preview_len].iter().map(PreviewRow::from).collect());
        }
    }

    Ok(())
}
