//! Spreadsheet export
//!
//! One worksheet, a header row from [`OutputTable::COLUMNS`] and one row per
//! feature. Numeric columns are written as numbers so spreadsheet tools can
//! sort and sum them; the DMS and ring columns are text.

use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use shapetab_core::error::{Result, ShapetabError};
use shapetab_core::models::{OutputRow, OutputTable};
use std::path::Path;

/// Data rows available below the header on one worksheet
pub const MAX_DATA_ROWS: usize = 1_048_575;

/// Write `table` to an xlsx workbook at `path`, replacing any existing file.
pub fn write_xlsx(table: &OutputTable, path: &Path) -> Result<()> {
    if table.len() > MAX_DATA_ROWS {
        return Err(ShapetabError::Export {
            message: format!(
                "{} rows exceed the worksheet limit of {}",
                table.len(),
                MAX_DATA_ROWS
            ),
        });
    }

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    write_sheet(worksheet, table).map_err(|e| export_error(path, e))?;
    workbook.save(path).map_err(|e| export_error(path, e))?;

    tracing::info!(path = %path.display(), rows = table.len(), "Wrote workbook");

    Ok(())
}

fn write_sheet(
    worksheet: &mut Worksheet,
    table: &OutputTable,
) -> std::result::Result<(), XlsxError> {
    let header = Format::new().set_bold();
    for (col, name) in OutputTable::COLUMNS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *name, &header)?;
    }

    for (i, row) in table.rows.iter().enumerate() {
        write_row(worksheet, i as u32 + 1, row)?;
    }

    Ok(())
}

fn write_row(
    worksheet: &mut Worksheet,
    index: u32,
    row: &OutputRow,
) -> std::result::Result<(), XlsxError> {
    worksheet.write_number(index, 0, row.x)?;
    worksheet.write_number(index, 1, row.y)?;
    worksheet.write_string(index, 2, &row.x_dms)?;
    worksheet.write_string(index, 3, &row.y_dms)?;
    worksheet.write_number(index, 4, row.x_wm as f64)?;
    worksheet.write_number(index, 5, row.y_wm as f64)?;
    worksheet.write_string(index, 6, &row.esri_json_polygons)?;
    Ok(())
}

fn export_error(path: &Path, error: XlsxError) -> ShapetabError {
    ShapetabError::Export {
        message: format!("Failed to write {}: {}", path.display(), error),
    }
}
