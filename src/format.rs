//! Output format types for the chatsheet library.
//!
//! These types don't depend on the CLI, so library users can pick a writer
//! from a format name or a file extension.
//!
//! # Example
//!
//! ```rust
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn example() -> chatsheet::Result<()> {
//! use chatsheet::core::models::{Speaker, Utterance};
//! use chatsheet::format::{OutputFormat, write_to_format};
//! use chrono::NaiveDate;
//!
//! let day = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
//! let records = vec![Utterance::new(Speaker::Bot, "Hello!", day)];
//!
//! // Write using format enum
//! write_to_format(&records, "output.csv", OutputFormat::Csv)?;
//!
//! // Or use format detection from extension
//! let format = OutputFormat::from_path("output.jsonl")?;
//! assert_eq!(format, OutputFormat::Jsonl);
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::output::OutputRecord;
use crate::error::{ChatsheetError, Result};

/// Output format for flattened transcripts.
///
/// ```rust
/// use chatsheet::format::OutputFormat;
/// use std::str::FromStr;
///
/// let format = OutputFormat::from_str("jsonl").unwrap();
/// assert_eq!(format, OutputFormat::Jsonl);
/// assert_eq!(format.extension(), "jsonl");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum OutputFormat {
    /// Excel workbook with a single sheet (default)
    #[default]
    Xlsx,

    /// Comma-separated values with a header row
    Csv,

    /// Pretty-printed JSON array of records
    Json,

    /// JSON Lines - one JSON object per line
    ///
    /// Also known as NDJSON.
    Jsonl,
}

impl OutputFormat {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Xlsx => "xlsx",
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
            OutputFormat::Jsonl => "jsonl",
        }
    }

    /// Returns all supported format names.
    pub fn all_names() -> &'static [&'static str] {
        &["xlsx", "csv", "json", "jsonl", "ndjson"]
    }

    /// Returns all available formats.
    pub fn all() -> &'static [OutputFormat] {
        &[
            OutputFormat::Xlsx,
            OutputFormat::Csv,
            OutputFormat::Json,
            OutputFormat::Jsonl,
        ]
    }

    /// Detects format from a file path based on extension.
    ///
    /// ```rust
    /// use chatsheet::format::OutputFormat;
    ///
    /// let format = OutputFormat::from_path("report.XLSX").unwrap();
    /// assert_eq!(format, OutputFormat::Xlsx);
    /// assert!(OutputFormat::from_path("report.txt").is_err());
    /// ```
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "xlsx" => Ok(OutputFormat::Xlsx),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            "jsonl" | "ndjson" => Ok(OutputFormat::Jsonl),
            _ => Err(ChatsheetError::invalid_format(
                "output",
                format!(
                    "Unknown file extension: '.{}'. Expected one of: xlsx, csv, json, jsonl",
                    ext
                ),
            )),
        }
    }

    /// Returns `path` with its extension replaced by this format's.
    pub fn apply_extension(&self, path: impl AsRef<Path>) -> PathBuf {
        path.as_ref().with_extension(self.extension())
    }

    #[allow(dead_code)]
    fn required_feature(self) -> &'static str {
        match self {
            OutputFormat::Xlsx => "xlsx",
            OutputFormat::Csv => "csv-output",
            OutputFormat::Json | OutputFormat::Jsonl => "json-output",
        }
    }

    #[allow(dead_code)]
    fn unavailable(self) -> ChatsheetError {
        ChatsheetError::invalid_format(
            "output",
            format!(
                "Output format {} requires the '{}' feature to be enabled",
                self,
                self.required_feature()
            ),
        )
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Xlsx => write!(f, "XLSX"),
            OutputFormat::Csv => write!(f, "CSV"),
            OutputFormat::Json => write!(f, "JSON"),
            OutputFormat::Jsonl => write!(f, "JSONL"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "xlsx" | "excel" => Ok(OutputFormat::Xlsx),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            "jsonl" | "ndjson" => Ok(OutputFormat::Jsonl),
            _ => Err(format!(
                "Unknown format: '{}'. Expected one of: {}",
                s,
                OutputFormat::all_names().join(", ")
            )),
        }
    }
}

/// Writes records to a file in the specified format.
///
/// # Errors
///
/// Returns an error if:
/// - The required feature for the format is not enabled
/// - The file cannot be written
#[allow(unused_variables)]
pub fn write_to_format<R: OutputRecord>(
    records: &[R],
    path: impl AsRef<Path>,
    format: OutputFormat,
) -> Result<()> {
    match format {
        #[cfg(feature = "xlsx")]
        OutputFormat::Xlsx => crate::core::output::write_xlsx(records, path),
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::write_csv(records, path),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::write_json(records, path),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::core::output::write_jsonl(records, path),
        #[allow(unreachable_patterns)]
        _ => Err(format.unavailable()),
    }
}

/// Encodes records in the specified format without touching the filesystem.
///
/// Text formats come back as UTF-8 bytes; XLSX as the workbook archive.
///
/// ```rust
/// # #[cfg(feature = "csv-output")]
/// # fn example() -> chatsheet::Result<()> {
/// use chatsheet::core::models::Exchange;
/// use chatsheet::format::{OutputFormat, to_format_bytes};
///
/// let bytes = to_format_bytes::<Exchange>(&[], OutputFormat::Csv)?;
/// assert_eq!(bytes, b"First Name,Last Name,UserID,ask,answer,date,time\n");
/// # Ok(())
/// # }
/// ```
#[allow(unused_variables)]
pub fn to_format_bytes<R: OutputRecord>(records: &[R], format: OutputFormat) -> Result<Vec<u8>> {
    match format {
        #[cfg(feature = "xlsx")]
        OutputFormat::Xlsx => crate::core::output::to_xlsx(records),
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::to_csv(records).map(String::into_bytes),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::to_json(records).map(String::into_bytes),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::core::output::to_jsonl(records).map(String::into_bytes),
        #[allow(unreachable_patterns)]
        _ => Err(format.unavailable()),
    }
}
