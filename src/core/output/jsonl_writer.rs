//! JSON Lines (JSONL) output writer.
//!
//! One compact JSON object per line, which suits line-oriented tools and
//! loading into dataframes.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::OutputRecord;
use crate::error::Result;

/// Writes records to a JSONL file.
///
/// # Format
/// ```text
/// {"type":"bot","text":"Hello","time":"2024-01-05"}
/// {"type":"user","text":"Hi","time":"2024-01-05"}
/// ```
pub fn write_jsonl<R: OutputRecord>(records: &[R], output_path: impl AsRef<Path>) -> Result<()> {
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);

    for record in records {
        serde_json::to_writer(&mut writer, record)?;
        writeln!(writer)?;
    }

    writer.flush()?;
    Ok(())
}

/// Converts records to a JSONL string.
///
/// Same format as [`write_jsonl`].
pub fn to_jsonl<R: OutputRecord>(records: &[R]) -> Result<String> {
    let mut output = String::new();
    for record in records {
        output.push_str(&serde_json::to_string(record)?);
        output.push('\n');
    }
    Ok(output)
}
