//! Config command implementation

use crate::output::OutputWriter;
use crate::output_types::{ConfigEntry, ConfigRow};
use anyhow::{Context, Result};
use shapetab_core::config::LayeredConfig;

pub fn execute(output: &OutputWriter) -> Result<()> {
    let cwd = std::env::current_dir().context("Failed to resolve working directory")?;
    let config = LayeredConfig::load(&cwd).context("Failed to load configuration")?;

    let mut entries: Vec<ConfigEntry> = config
        .to_inspection_map()
        .into_iter()
        .map(|(key, (value, source))| ConfigEntry {
            key,
            value,
            source: format!("{:?}", source),
        })
        .collect();
    entries.sort_by(|a, b| a.key.cmp(&b.key));

    if output.is_json() {
        output.result(entries)?;
    } else {
        output.section("Configuration Values");
        output.table(
            entries
                .into_iter()
                .map(|e| ConfigRow {
                    key: e.key,
                    value: e.value,
                    source: e.source,
                })
                .collect(),
        );
    }

    Ok(())
}
