//! Timestamp parsing for `created_at.N` cells.
//!
//! Exports carry timestamps in whatever shape the spreadsheet tool left
//! them: native date cells, Excel serial numbers, or text in a handful of
//! ISO and locale formats. [`parse_cell`] accepts all of these and returns
//! `None` for anything else; callers drop such records instead of failing.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{ChatsheetError, Result};
use crate::table::Cell;

/// Text formats with an explicit UTC offset. The offset is dropped and the
/// local wall-clock time kept.
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
];

/// Text formats carrying a time of day.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
];

/// Date-only text formats; the time of day becomes midnight.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d.%m.%Y"];

/// Largest serial Excel can display (9999-12-31).
const MAX_EXCEL_SERIAL: f64 = 2_958_466.0;

/// Parses a cell into a timestamp, or `None` if it holds no valid instant.
///
/// # Examples
///
/// ```
/// use chatsheet::table::Cell;
/// use chatsheet::timestamp::parse_cell;
///
/// let ts = parse_cell(&Cell::from("2024-01-05 14:30:00")).unwrap();
/// assert_eq!(ts.to_string(), "2024-01-05 14:30:00");
///
/// assert!(parse_cell(&Cell::from("yesterday")).is_none());
/// assert!(parse_cell(&Cell::Empty).is_none());
/// ```
pub fn parse_cell(cell: &Cell) -> Option<NaiveDateTime> {
    match cell {
        Cell::DateTime(dt) => Some(*dt),
        Cell::Text(s) => parse_text(s),
        Cell::Float(f) => from_excel_serial(*f),
        Cell::Int(i) => from_excel_serial(*i as f64),
        Cell::Empty | Cell::Bool(_) => None,
    }
}

/// Parses a textual timestamp.
pub fn parse_text(input: &str) -> Option<NaiveDateTime> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.naive_local());
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d.and_time(NaiveTime::MIN));
        }
    }
    None
}

/// Converts an Excel serial date (days since 1899-12-30, fraction = time of
/// day) into a timestamp. Rounds to the nearest second.
pub fn from_excel_serial(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial < 0.0 || serial >= MAX_EXCEL_SERIAL {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_time(NaiveTime::MIN);
    let millis = (serial * 86_400_000.0).round() as i64;
    let seconds = (millis + 500).div_euclid(1000);
    epoch.checked_add_signed(Duration::seconds(seconds))
}

/// Parses a user-supplied date bound in `YYYY-MM-DD` form.
///
/// ```
/// use chatsheet::timestamp::parse_date_arg;
///
/// assert!(parse_date_arg("2024-01-05").is_ok());
/// assert!(parse_date_arg("05/01/2024").is_err());
/// ```
pub fn parse_date_arg(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| ChatsheetError::invalid_date(input))
}
