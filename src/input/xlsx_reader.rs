//! Spreadsheet workbook reader backed by calamine.

use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};

use super::unnamed;
use crate::error::{ChatsheetError, Result};
use crate::table::{Cell, Table};
use crate::timestamp::from_excel_serial;

/// Reads one worksheet of a workbook into a [`Table`].
///
/// Uses the first sheet unless `sheet` names another. The first row of the
/// sheet's used range is the header.
pub fn read_workbook(path: impl AsRef<Path>, sheet: Option<&str>) -> Result<Table> {
    let path = path.as_ref();
    let mut workbook =
        open_workbook_auto(path).map_err(|e| ChatsheetError::spreadsheet(e, Some(path.into())))?;

    let sheet_names = workbook.sheet_names();
    let sheet_name = match sheet {
        Some(name) if sheet_names.iter().any(|s| s == name) => name.to_string(),
        Some(name) => {
            return Err(ChatsheetError::invalid_format(
                "input",
                format!(
                    "Sheet '{}' not found. Available sheets: {}",
                    name,
                    sheet_names.join(", ")
                ),
            ));
        }
        None => sheet_names
            .first()
            .cloned()
            .ok_or_else(|| ChatsheetError::invalid_format("input", "Workbook has no sheets"))?,
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| ChatsheetError::spreadsheet(e, Some(path.into())))?;

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        tracing::warn!(sheet = %sheet_name, "worksheet is empty");
        return Ok(Table::default());
    };

    let columns = header
        .iter()
        .enumerate()
        .map(|(i, data)| {
            convert_cell(data)
                .as_text()
                .map_or_else(|| unnamed(i), |name| name.into_owned())
        })
        .collect();

    let mut table = Table::new(columns);
    for row in rows {
        table.push_row(row.iter().map(convert_cell).collect());
    }

    Ok(table)
}

/// Converts a calamine value into a [`Cell`].
///
/// Native date cells become [`Cell::DateTime`]; durations stay numeric.
/// Formula errors such as `#N/A` read as empty.
fn convert_cell(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::String(s) => Cell::from(s.as_str()),
        Data::Int(i) => Cell::Int(*i),
        Data::Float(f) => Cell::Float(*f),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) if dt.is_duration() => Cell::Float(dt.as_f64()),
        Data::DateTime(dt) => {
            from_excel_serial(dt.as_f64()).map_or(Cell::Float(dt.as_f64()), Cell::DateTime)
        }
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::from(s.as_str()),
    }
}
