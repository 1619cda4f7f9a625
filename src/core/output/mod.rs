//! Output format writers.
//!
//! Every writer takes a slice of any [`OutputRecord`] and comes in two forms:
//! `write_*` writes to a path, `to_*` returns the encoded output in memory.
//!
//! - [`write_xlsx`] / [`to_xlsx`] - single-sheet workbook, bold header - requires `xlsx` feature
//! - [`write_csv`] / [`to_csv`] - comma-separated with header row - requires `csv-output` feature
//! - [`write_json`] / [`to_json`] - pretty-printed JSON array - requires `json-output` feature
//! - [`write_jsonl`] / [`to_jsonl`] - one JSON object per line - requires `json-output` feature
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> chatsheet::Result<()> {
//! use chatsheet::core::models::{Speaker, Utterance};
//! use chatsheet::core::output::{to_csv, write_jsonl};
//! use chrono::NaiveDate;
//!
//! let day = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
//! let records = vec![Utterance::new(Speaker::Bot, "Hello!", day)];
//!
//! let csv = to_csv(&records)?;
//! assert!(csv.starts_with("type,text,time"));
//! write_jsonl(&records, "utterances.jsonl")?;
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;
#[cfg(feature = "json-output")]
mod jsonl_writer;
#[cfg(feature = "xlsx")]
mod xlsx_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use json_writer::{to_json, write_json};
#[cfg(feature = "json-output")]
pub use jsonl_writer::{to_jsonl, write_jsonl};
#[cfg(feature = "xlsx")]
pub use xlsx_writer::{to_xlsx, write_xlsx};

use serde::Serialize;

use crate::core::models::{Exchange, Utterance};

/// Date rendering shared by the tabular writers.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Time-of-day rendering shared by the tabular writers. Fractional seconds
/// appear only when present.
pub const TIME_FORMAT: &str = "%H:%M:%S%.f";

/// A record that can be written by every output format.
///
/// Tabular formats (XLSX, CSV) use [`HEADERS`](Self::HEADERS) and
/// [`values`](Self::values); JSON formats use the `Serialize` impl, whose
/// field names must match the headers.
pub trait OutputRecord: Serialize {
    /// Column headers, in output order.
    const HEADERS: &'static [&'static str];

    /// Cell values aligned with [`HEADERS`](Self::HEADERS).
    fn values(&self) -> Vec<String>;
}

impl OutputRecord for Utterance {
    const HEADERS: &'static [&'static str] = &["type", "text", "time"];

    fn values(&self) -> Vec<String> {
        vec![
            self.speaker.to_string(),
            self.text.clone(),
            self.time.format(DATE_FORMAT).to_string(),
        ]
    }
}

impl OutputRecord for Exchange {
    const HEADERS: &'static [&'static str] = &[
        "First Name",
        "Last Name",
        "UserID",
        "ask",
        "answer",
        "date",
        "time",
    ];

    fn values(&self) -> Vec<String> {
        vec![
            self.first_name.clone(),
            self.last_name.clone(),
            self.user_id.clone(),
            self.ask.clone(),
            self.answer.clone(),
            self.date.format(DATE_FORMAT).to_string(),
            self.time.format(TIME_FORMAT).to_string(),
        ]
    }
}
