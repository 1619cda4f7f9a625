//! Delimited-text reader.
//!
//! Every non-empty field becomes [`Cell::Text`]; no type inference happens
//! here. Timestamps are parsed later from the text.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use super::unnamed;
use crate::error::Result;
use crate::table::{Cell, Table};

/// Reads a delimited text file with a header row.
///
/// Rows may be shorter or longer than the header; missing trailing fields
/// read as empty and extra fields are kept but never addressed by name.
pub fn read_csv(path: impl AsRef<Path>, delimiter: u8) -> Result<Table> {
    let file = File::open(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(BufReader::new(file));

    let columns = reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(i, name)| {
            if name.is_empty() {
                unnamed(i)
            } else {
                name.to_string()
            }
        })
        .collect();

    let mut table = Table::new(columns);
    for record in reader.records() {
        let record = record?;
        table.push_row(record.iter().map(Cell::from).collect());
    }

    Ok(table)
}
