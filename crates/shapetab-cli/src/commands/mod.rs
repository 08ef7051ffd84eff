//! Command implementations

mod config;
mod convert;
mod dms;
mod project;

use crate::cli::{Cli, Commands};
use crate::output::OutputWriter;
use anyhow::Result;

/// Execute a CLI command
pub fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);

    match cli.command {
        Commands::Convert(args) => convert::execute(args, &output),
        Commands::Dms(args) => dms::execute(args, &output),
        Commands::Project(args) => project::execute(args, &output),
        Commands::Config => config::execute(&output),
    }
}
