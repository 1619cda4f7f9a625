//! Excel (.xlsx) output writer.
//!
//! Writes a single worksheet with a bold header row and one row per record.
//! Every value is written as a string cell so dates and times read back
//! exactly as rendered by [`OutputRecord::values`].

use std::path::Path;

use rust_xlsxwriter::{Format, Workbook};

use super::OutputRecord;
use crate::error::Result;

/// Name of the single worksheet.
pub const SHEET_NAME: &str = "Sheet1";

/// Most characters Excel accepts in one cell.
pub const MAX_CELL_CHARS: usize = 32_767;

/// Writes records to an `.xlsx` workbook at `output_path`.
pub fn write_xlsx<R: OutputRecord>(records: &[R], output_path: impl AsRef<Path>) -> Result<()> {
    let mut workbook = build_workbook(records)?;
    workbook.save(output_path.as_ref())?;
    Ok(())
}

/// Encodes records as `.xlsx` bytes.
///
/// Same layout as [`write_xlsx`].
pub fn to_xlsx<R: OutputRecord>(records: &[R]) -> Result<Vec<u8>> {
    let mut workbook = build_workbook(records)?;
    Ok(workbook.save_to_buffer()?)
}

fn build_workbook<R: OutputRecord>(records: &[R]) -> Result<Workbook> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, name) in R::HEADERS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *name, &header_format)?;
    }

    for (i, record) in records.iter().enumerate() {
        // Past u32 the write below fails with the worksheet's row limit error.
        let row = u32::try_from(i + 1).unwrap_or(u32::MAX);
        for (col, value) in record.values().iter().enumerate() {
            if value.is_empty() {
                continue;
            }
            let column = R::HEADERS.get(col).copied().unwrap_or_default();
            worksheet.write_string(row, col as u16, fit_cell(value, i, column))?;
        }
    }

    Ok(workbook)
}

/// Cuts `value` to [`MAX_CELL_CHARS`], logging which record was shortened.
fn fit_cell<'a>(value: &'a str, record: usize, column: &str) -> &'a str {
    match value.char_indices().nth(MAX_CELL_CHARS) {
        Some((cut, _)) => {
            tracing::warn!(
                record,
                column,
                chars = value.chars().count(),
                "cell text exceeds the xlsx limit, truncating"
            );
            &value[..cut]
        }
        None => value,
    }
}
