//! JSON output writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use super::OutputRecord;
use crate::error::Result;

/// Writes records to a JSON file as a pretty-printed array.
///
/// # Format
/// ```json
/// [
///   {
///     "type": "bot",
///     "text": "Hello",
///     "time": "2024-01-05"
///   }
/// ]
/// ```
pub fn write_json<R: OutputRecord>(records: &[R], output_path: impl AsRef<Path>) -> Result<()> {
    let json = to_json(records)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Converts records to a JSON array string.
///
/// Same format as [`write_json`].
pub fn to_json<R: OutputRecord>(records: &[R]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}
