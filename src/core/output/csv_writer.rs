//! CSV output writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use super::OutputRecord;
use crate::error::{ChatsheetError, Result};

/// Writes records to a CSV file.
///
/// # Format
/// - Delimiter: `,`
/// - First row: [`OutputRecord::HEADERS`]
/// - Encoding: UTF-8
pub fn write_csv<R: OutputRecord>(records: &[R], output_path: impl AsRef<Path>) -> Result<()> {
    let file = File::create(output_path)?;
    write_records(records, file)
}

/// Converts records to a CSV string.
///
/// Same format as [`write_csv`].
pub fn to_csv<R: OutputRecord>(records: &[R]) -> Result<String> {
    let mut buffer = Vec::new();
    write_records(records, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| ChatsheetError::invalid_format("CSV", e.to_string()))
}

fn write_records<R: OutputRecord, W: Write>(records: &[R], sink: W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().delimiter(b',').from_writer(sink);

    writer.write_record(R::HEADERS)?;
    for record in records {
        writer.write_record(record.values())?;
    }

    writer.flush()?;
    Ok(())
}
