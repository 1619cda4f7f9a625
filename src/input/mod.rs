//! Input readers that load an export into a [`Table`].
//!
//! The reader is chosen from the file extension:
//!
//! | Extension | Reader | Feature |
//! |-----------|--------|---------|
//! | `xlsx`, `xlsm`, `xlsb`, `xls`, `ods` | workbook via calamine | `xlsx` |
//! | `csv`, `tsv` | delimited text via csv | `csv-output` |
//!
//! Both readers treat the first row as the header. Header cells that are
//! blank are named `Unnamed: {n}` after their zero-based position.
//!
//! # Example
//!
//! ```rust,no_run
//! use chatsheet::config::ReadConfig;
//! use chatsheet::input::read_table;
//!
//! # fn main() -> chatsheet::Result<()> {
//! let table = read_table("conversations.xlsx", &ReadConfig::new())?;
//! println!("{} sessions, {} columns", table.len(), table.columns().len());
//! # Ok(())
//! # }
//! ```

#[cfg(feature = "csv-output")]
mod csv_reader;
#[cfg(feature = "xlsx")]
mod xlsx_reader;

#[cfg(feature = "csv-output")]
pub use csv_reader::read_csv;
#[cfg(feature = "xlsx")]
pub use xlsx_reader::read_workbook;

use std::path::Path;

use crate::config::ReadConfig;
use crate::error::{ChatsheetError, Result};
use crate::table::Table;

/// Kind of input file, detected from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// Spreadsheet workbook (Excel or OpenDocument)
    Workbook,
    /// Comma-separated text
    Csv,
    /// Tab-separated text
    Tsv,
}

impl InputKind {
    /// Detects the input kind from a file path.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(InputKind::Workbook),
            "csv" => Ok(InputKind::Csv),
            "tsv" => Ok(InputKind::Tsv),
            _ => Err(ChatsheetError::invalid_format(
                "input",
                format!(
                    "Unknown file extension: '.{}'. Expected a spreadsheet (xlsx, xls, ods) or csv",
                    ext
                ),
            )),
        }
    }
}

/// Reads `path` into a [`Table`], picking the reader from the extension.
///
/// # Errors
///
/// Returns an error if the extension is unknown, the reader for it is not
/// compiled in, or the file cannot be read.
#[allow(unused_variables)]
pub fn read_table(path: impl AsRef<Path>, config: &ReadConfig) -> Result<Table> {
    let path = path.as_ref();
    let kind = InputKind::from_path(path)?;

    let table = match kind {
        #[cfg(feature = "xlsx")]
        InputKind::Workbook => read_workbook(path, config.sheet.as_deref())?,
        #[cfg(feature = "csv-output")]
        InputKind::Csv => read_csv(path, config.delimiter)?,
        #[cfg(feature = "csv-output")]
        InputKind::Tsv => read_csv(path, b'\t')?,
        #[allow(unreachable_patterns)]
        _ => {
            return Err(ChatsheetError::invalid_format(
                "input",
                format!("Reading {:?} input is not enabled in this build", kind),
            ));
        }
    };

    tracing::debug!(
        path = %path.display(),
        rows = table.len(),
        columns = table.columns().len(),
        "read input table"
    );
    Ok(table)
}

/// Header name used for a blank header cell at `index`.
pub(crate) fn unnamed(index: usize) -> String {
    format!("Unnamed: {index}")
}
