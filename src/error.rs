//! Unified error types for chatsheet.
//!
//! A single [`ChatsheetError`] enum covers every failure the library can
//! surface. Note that bad *data* (unparseable timestamps, blank cells,
//! unanswered questions) is never an error: those records are dropped and
//! counted in [`ExtractionStats`](crate::core::models::ExtractionStats).
//! Errors are reserved for things the caller has to fix: unreadable files,
//! missing identity columns, bad date arguments, and, in strict mode,
//! irregular column layouts.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for chatsheet operations.
///
/// # Example
///
/// ```rust
/// use chatsheet::error::Result;
/// use chatsheet::core::models::Utterance;
///
/// fn my_function() -> Result<Vec<Utterance>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatsheetError>;

/// The error type for all chatsheet operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatsheetError {
    /// An I/O error occurred while reading input or writing output.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The spreadsheet could not be opened or a worksheet could not be read.
    #[cfg(feature = "xlsx")]
    #[error("Failed to read spreadsheet{}: {source}", path.as_ref().map(|p| format!(" (file: {})", p.display())).unwrap_or_default())]
    Spreadsheet {
        /// The underlying calamine error
        #[source]
        source: calamine::Error,
        /// The file path, if available
        path: Option<PathBuf>,
    },

    /// Writing the XLSX output failed.
    #[cfg(feature = "xlsx")]
    #[error("XLSX error: {0}")]
    XlsxWrite(#[from] rust_xlsxwriter::XlsxError),

    /// CSV reading or writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[cfg(feature = "json-output")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The input or output file format is not supported.
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// Which side is affected ("input", "output", ...)
        format: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// A date argument could not be parsed.
    #[error("Invalid date '{input}'. Expected format: {expected}")]
    InvalidDate {
        /// The invalid date string that was provided
        input: String,
        /// Expected format description
        expected: &'static str,
    },

    /// The start bound of a date range lies after its end bound.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidRange {
        /// Requested start date
        start: chrono::NaiveDate,
        /// Requested end date
        end: chrono::NaiveDate,
    },

    /// A column required by the transformation is not present in the input.
    #[error("Missing column '{column}' in input{}", path.as_ref().map(|p| format!(" (file: {})", p.display())).unwrap_or_default())]
    MissingColumn {
        /// Name of the missing column
        column: String,
        /// The file path, if available
        path: Option<PathBuf>,
    },

    /// The turn columns do not form regular `bot/agent/user/created_at` groups.
    ///
    /// Only raised in strict mode; the default policy logs and continues.
    #[error("Inconsistent column layout: {}", issues.join("; "))]
    InconsistentLayout {
        /// Human-readable description of each deviation
        issues: Vec<String>,
    },
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatsheetError {
    /// Creates a spreadsheet read error.
    #[cfg(feature = "xlsx")]
    pub fn spreadsheet(source: calamine::Error, path: Option<PathBuf>) -> Self {
        ChatsheetError::Spreadsheet { source, path }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        ChatsheetError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Creates an invalid date error.
    pub fn invalid_date(input: impl Into<String>) -> Self {
        ChatsheetError::InvalidDate {
            input: input.into(),
            expected: "YYYY-MM-DD",
        }
    }

    /// Creates a missing column error.
    pub fn missing_column(column: impl Into<String>) -> Self {
        ChatsheetError::MissingColumn {
            column: column.into(),
            path: None,
        }
    }

    /// Attaches a file path to errors that carry one.
    #[must_use]
    pub fn with_path(self, new_path: impl Into<PathBuf>) -> Self {
        match self {
            ChatsheetError::MissingColumn { column, .. } => ChatsheetError::MissingColumn {
                column,
                path: Some(new_path.into()),
            },
            #[cfg(feature = "xlsx")]
            ChatsheetError::Spreadsheet { source, .. } => ChatsheetError::Spreadsheet {
                source,
                path: Some(new_path.into()),
            },
            other => other,
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatsheetError::Io(_))
    }

    /// Returns `true` if this is an invalid format error.
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, ChatsheetError::InvalidFormat { .. })
    }

    /// Returns `true` if this is a date-related error.
    pub fn is_invalid_date(&self) -> bool {
        matches!(
            self,
            ChatsheetError::InvalidDate { .. } | ChatsheetError::InvalidRange { .. }
        )
    }

    /// Returns `true` if a required column is missing.
    pub fn is_missing_column(&self) -> bool {
        matches!(self, ChatsheetError::MissingColumn { .. })
    }

    /// Returns `true` if strict mode rejected the column layout.
    pub fn is_layout(&self) -> bool {
        matches!(self, ChatsheetError::InconsistentLayout { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================
