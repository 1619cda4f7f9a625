//! In-memory table model shared by the readers and the transformers.
//!
//! A [`Table`] is a header row plus an ordered list of rows, each row being a
//! vector of [`Cell`]s aligned with the header. Readers build it once per
//! input file; the transformers only ever borrow it.
//!
//! # Example
//!
//! ```
//! use chatsheet::table::{Cell, Table};
//!
//! let mut table = Table::new(vec!["user.1".into(), "bot.2".into()]);
//! table.push_row(vec![Cell::from("hi"), Cell::from("hello")]);
//!
//! assert_eq!(table.len(), 1);
//! assert_eq!(table.column_index("bot.2"), Some(1));
//! assert_eq!(table.rows()[0].get(1).as_text().as_deref(), Some("hello"));
//! ```

use std::borrow::Cow;
use std::collections::HashMap;

use chrono::NaiveDateTime;

/// A single spreadsheet value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    /// Missing value
    #[default]
    Empty,
    /// Text value
    Text(String),
    /// Integer value
    Int(i64),
    /// Floating point value (also how spreadsheets store most numbers)
    Float(f64),
    /// Boolean value
    Bool(bool),
    /// Native spreadsheet date/time
    DateTime(NaiveDateTime),
}

impl Cell {
    /// Returns `true` if the cell carries no usable value.
    ///
    /// An empty string counts as missing. Whitespace-only text does not.
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.is_empty(),
            Cell::Float(f) => f.is_nan(),
            _ => false,
        }
    }

    /// Renders the cell as text, or `None` if it is blank.
    ///
    /// Integral floats render without a fractional part so that numeric IDs
    /// read back as they were typed.
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        if self.is_blank() {
            return None;
        }
        Some(match self {
            Cell::Text(s) => Cow::Borrowed(s.as_str()),
            Cell::Int(i) => Cow::Owned(i.to_string()),
            Cell::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => {
                Cow::Owned(format!("{}", *f as i64))
            }
            Cell::Float(f) => Cow::Owned(f.to_string()),
            Cell::Bool(b) => Cow::Owned(b.to_string()),
            Cell::DateTime(dt) => Cow::Owned(dt.format("%Y-%m-%d %H:%M:%S").to_string()),
            Cell::Empty => unreachable!("blank cells return early"),
        })
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(s.to_string())
        }
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        if s.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(s)
        }
    }
}

impl From<f64> for Cell {
    fn from(f: f64) -> Self {
        Cell::Float(f)
    }
}

impl From<i64> for Cell {
    fn from(i: i64) -> Self {
        Cell::Int(i)
    }
}

impl From<NaiveDateTime> for Cell {
    fn from(dt: NaiveDateTime) -> Self {
        Cell::DateTime(dt)
    }
}

const EMPTY: &Cell = &Cell::Empty;

/// One conversation session: the cells of a single spreadsheet row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    cells: Vec<Cell>,
}

impl Row {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    /// Returns the cell at `index`, or [`Cell::Empty`] past the end of a
    /// short row.
    pub fn get(&self, index: usize) -> &Cell {
        self.cells.get(index).unwrap_or(EMPTY)
    }

    /// Like [`get`](Self::get) but for an optional column position.
    pub fn lookup(&self, index: Option<usize>) -> &Cell {
        match index {
            Some(i) => self.get(i),
            None => EMPTY,
        }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

/// A header row plus data rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    positions: HashMap<String, usize>,
    rows: Vec<Row>,
}

impl Table {
    /// Creates an empty table with the given header.
    ///
    /// When a header name repeats, lookups resolve to its first occurrence.
    pub fn new(columns: Vec<String>) -> Self {
        let mut positions = HashMap::with_capacity(columns.len());
        for (i, name) in columns.iter().enumerate() {
            positions.entry(name.clone()).or_insert(i);
        }
        Self {
            columns,
            positions,
            rows: Vec::new(),
        }
    }

    /// Appends a row. Rows shorter than the header read as empty past their end.
    pub fn push_row(&mut self, cells: Vec<Cell>) {
        self.rows.push(Row::new(cells));
    }

    /// Builder-style variant of [`push_row`](Self::push_row).
    #[must_use]
    pub fn with_row(mut self, cells: Vec<Cell>) -> Self {
        self.push_row(cells);
        self
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Position of the column with exactly this name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Builds a table from `(column, value)` pairs per row.
    ///
    /// The header is the union of all keys in first-seen order. Mostly
    /// useful in tests and doc examples.
    ///
    /// ```
    /// use chatsheet::table::Table;
    ///
    /// let table = Table::from_records(&[
    ///     &[("user.1", "hi"), ("bot.2", "hello")],
    ///     &[("bot.0", "welcome")],
    /// ]);
    /// assert_eq!(table.columns(), ["user.1", "bot.2", "bot.0"]);
    /// assert!(table.rows()[1].get(0).is_blank());
    /// ```
    pub fn from_records(records: &[&[(&str, &str)]]) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for record in records {
            for (name, _) in *record {
                if !columns.iter().any(|c| c == name) {
                    columns.push((*name).to_string());
                }
            }
        }

        let mut table = Table::new(columns);
        for record in records {
            let mut cells = vec![Cell::Empty; table.columns.len()];
            for (name, value) in *record {
                if let Some(i) = table.column_index(name) {
                    cells[i] = Cell::from(*value);
                }
            }
            table.push_row(cells);
        }
        table
    }
}
