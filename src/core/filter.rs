//! Date-range filtering and default bound derivation.
//!
//! Both transformers filter on the *date* of a record only; the time of day
//! never matters. Bounds are inclusive at both ends.
//!
//! # Examples
//!
//! ```
//! use chatsheet::core::filter::DateRange;
//! use chrono::NaiveDate;
//!
//! # fn main() -> chatsheet::Result<()> {
//! let range = DateRange::new()
//!     .with_start("2024-01-01")?
//!     .with_end("2024-01-31")?;
//!
//! let d = |day| NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
//! assert!(range.contains(d(1)));
//! assert!(range.contains(d(31)));
//! assert!(!range.contains(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()));
//! # Ok(())
//! # }
//! ```

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{ChatsheetError, Result};
use crate::table::Table;
use crate::timestamp::{parse_cell, parse_date_arg};

/// An optional, inclusive date window.
///
/// An unset bound is open. A range with neither bound accepts everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// Earliest date kept (inclusive).
    pub start: Option<NaiveDate>,
    /// Latest date kept (inclusive).
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// Creates an open range.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a closed range, rejecting `start > end`.
    pub fn between(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        Self::new()
            .with_start_date(start)
            .with_end_date(end)
            .validated()
    }

    /// Sets the start bound from a `YYYY-MM-DD` string.
    pub fn with_start(self, date_str: &str) -> Result<Self> {
        Ok(self.with_start_date(parse_date_arg(date_str)?))
    }

    /// Sets the end bound from a `YYYY-MM-DD` string.
    pub fn with_end(self, date_str: &str) -> Result<Self> {
        Ok(self.with_end_date(parse_date_arg(date_str)?))
    }

    #[must_use]
    pub fn with_start_date(mut self, date: NaiveDate) -> Self {
        self.start = Some(date);
        self
    }

    #[must_use]
    pub fn with_end_date(mut self, date: NaiveDate) -> Self {
        self.end = Some(date);
        self
    }

    /// Returns the range unchanged if its bounds are ordered.
    pub fn validated(self) -> Result<Self> {
        match (self.start, self.end) {
            (Some(start), Some(end)) if start > end => {
                Err(ChatsheetError::InvalidRange { start, end })
            }
            _ => Ok(self),
        }
    }

    /// Returns `true` if any bound is set.
    pub fn is_active(&self) -> bool {
        self.start.is_some() || self.end.is_some()
    }

    /// Returns `true` if `date` lies within the range.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.is_none_or(|start| date >= start) && self.end.is_none_or(|end| date <= end)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let show = |d: Option<NaiveDate>| d.map_or_else(|| "…".to_string(), |d| d.to_string());
        write!(f, "{} → {}", show(self.start), show(self.end))
    }
}

/// First and last date found in a table's `created_at` columns.
///
/// These are the bounds suggested to the user before a date range is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateBounds {
    pub first: NaiveDate,
    pub last: NaiveDate,
}

impl DateBounds {
    /// Scans every column whose name contains `created_at` across all rows.
    ///
    /// Returns `None` if no cell holds a parseable timestamp.
    ///
    /// ```
    /// use chatsheet::core::filter::DateBounds;
    /// use chatsheet::table::Table;
    ///
    /// let table = Table::from_records(&[
    ///     &[("created_at.0", "2024-03-02 10:00:00"), ("created_at.1", "garbage")],
    ///     &[("created_at.0", "2024-01-15")],
    /// ]);
    /// let bounds = DateBounds::from_table(&table).unwrap();
    /// assert_eq!(bounds.first.to_string(), "2024-01-15");
    /// assert_eq!(bounds.last.to_string(), "2024-03-02");
    /// ```
    pub fn from_table(table: &Table) -> Option<Self> {
        let positions: Vec<usize> = table
            .columns()
            .iter()
            .enumerate()
            .filter(|(_, name)| name.contains("created_at"))
            .map(|(i, _)| i)
            .collect();

        let mut bounds: Option<DateBounds> = None;
        for row in table.rows() {
            for &i in &positions {
                let Some(date) = parse_cell(row.get(i)).map(|ts| ts.date()) else {
                    continue;
                };
                bounds = Some(match bounds {
                    None => DateBounds {
                        first: date,
                        last: date,
                    },
                    Some(b) => DateBounds {
                        first: b.first.min(date),
                        last: b.last.max(date),
                    },
                });
            }
        }
        bounds
    }

    /// The closed range spanning these bounds.
    pub fn as_range(&self) -> DateRange {
        DateRange::new()
            .with_start_date(self.first)
            .with_end_date(self.last)
    }
}

impl fmt::Display for DateBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}", self.first, self.last)
    }
}
