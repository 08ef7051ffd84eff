//! DMS command implementation

use crate::cli::DmsArgs;
use crate::output::OutputWriter;
use crate::output_types::DmsOutput;
use anyhow::{bail, Result};
use shapetab_geo::{format_dms, to_dms};

pub fn execute(args: DmsArgs, output: &OutputWriter) -> Result<()> {
    if !args.value.is_finite() {
        bail!("Value must be a finite number of degrees, got {}", args.value);
    }

    let parts = to_dms(args.value);
    let dms = format_dms(args.value);

    if output.is_json() {
        output.result(DmsOutput {
            value: args.value,
            dms,
            degrees: parts.degrees,
            minutes: parts.minutes,
            seconds: parts.seconds,
        })?;
    } else {
        output.kv("Decimal", args.value);
        output.kv("DMS", dms);
    }

    Ok(())
}
