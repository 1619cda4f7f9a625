//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`Mode`] - Which transformation to run
//! - [`OutputFormat`] - Output format options
//! - [`SpeakerType`] - Values accepted by `--types`
//!
//! ```rust
//! use chatsheet::cli::{Args, Mode};
//! use clap::Parser;
//!
//! let args = Args::parse_from(["chatsheet", "advanced", "export.xlsx", "--start", "2024-01-01"]);
//! assert_eq!(args.mode, Mode::Paired);
//! assert_eq!(args.output_path().unwrap().to_str(), Some("processed_conversation_data_advanced.xlsx"));
//! ```

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::core::models::Speaker;
use crate::error::Result;

/// Flatten wide chatbot transcript exports into one row per utterance
/// or one row per question/answer pair.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatsheet")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatsheet basic export.xlsx
    chatsheet basic export.xlsx --types bot,user --start 2024-01-01
    chatsheet paired export.xlsx -o pairs.csv
    chatsheet advanced export.csv --delimiter ';' --format jsonl
    chatsheet basic export.xlsx --bounds-only")]
pub struct Args {
    /// Transformation to run
    #[arg(value_enum)]
    pub mode: Mode,

    /// Path to input file (xlsx, xls, ods, csv, tsv)
    pub input: String,

    /// Path to output file [default: processed_conversation_data(_advanced).<format>]
    #[arg(short, long)]
    pub output: Option<String>,

    /// Output format [default: from the output extension, else xlsx]
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Keep records dated on or after this day (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub start: Option<String>,

    /// Keep records dated on or before this day (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub end: Option<String>,

    /// Speakers to include in basic mode
    #[arg(
        long,
        value_enum,
        value_delimiter = ',',
        default_values_t = [SpeakerType::Bot, SpeakerType::Agent, SpeakerType::User]
    )]
    pub types: Vec<SpeakerType>,

    /// Worksheet to read [default: first sheet]
    #[arg(long, value_name = "NAME")]
    pub sheet: Option<String>,

    /// Field delimiter for CSV input
    #[arg(long, value_name = "CHAR", default_value = ",", value_parser = parse_delimiter)]
    pub delimiter: u8,

    /// Number of records to preview (0 disables)
    #[arg(long, value_name = "N", default_value_t = 20)]
    pub preview: usize,

    /// Fail when turn columns are irregular instead of warning
    #[arg(long)]
    pub strict: bool,

    /// Print the date bounds found in the input and exit
    #[arg(long)]
    pub bounds_only: bool,
}

impl Args {
    /// Resolves the output format from `--format`, then the `--output`
    /// extension, then the default.
    pub fn output_format(&self) -> Result<crate::format::OutputFormat> {
        match (self.format, &self.output) {
            (Some(format), _) => Ok(format.into()),
            (None, Some(path)) => crate::format::OutputFormat::from_path(path),
            (None, None) => Ok(crate::format::OutputFormat::default()),
        }
    }

    /// Resolves the output path. The default file name follows the mode and
    /// takes the extension of the chosen format.
    pub fn output_path(&self) -> Result<PathBuf> {
        match &self.output {
            Some(path) => Ok(PathBuf::from(path)),
            None => Ok(self
                .output_format()?
                .apply_extension(self.mode.default_output())),
        }
    }

    /// Speakers selected with `--types`.
    pub fn speakers(&self) -> Vec<Speaker> {
        self.types.iter().copied().map(Speaker::from).collect()
    }
}

/// Transformation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// One row per utterance: type, text, time
    #[value(alias = "flat")]
    Basic,

    /// One row per user question and bot answer
    #[value(alias = "advanced", alias = "pairs")]
    #[serde(alias = "advanced")]
    Paired,
}

impl Mode {
    /// Default output file name for this mode.
    pub fn default_output(&self) -> &'static str {
        match self {
            Mode::Basic => "processed_conversation_data.xlsx",
            Mode::Paired => "processed_conversation_data_advanced.xlsx",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Basic => write!(f, "Basic"),
            Mode::Paired => write!(f, "Paired"),
        }
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Excel workbook (default)
    #[default]
    #[value(alias = "excel")]
    Xlsx,

    /// Comma-separated values
    Csv,

    /// JSON array of records
    Json,

    /// JSON Lines - one JSON object per line
    #[value(alias = "ndjson")]
    Jsonl,
}

// Conversion to library format type
impl From<OutputFormat> for crate::format::OutputFormat {
    fn from(format: OutputFormat) -> crate::format::OutputFormat {
        match format {
            OutputFormat::Xlsx => crate::format::OutputFormat::Xlsx,
            OutputFormat::Csv => crate::format::OutputFormat::Csv,
            OutputFormat::Json => crate::format::OutputFormat::Json,
            OutputFormat::Jsonl => crate::format::OutputFormat::Jsonl,
        }
    }
}

/// Speaker names accepted by `--types`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum SpeakerType {
    Bot,
    Agent,
    User,
}

impl From<SpeakerType> for Speaker {
    fn from(speaker: SpeakerType) -> Speaker {
        match speaker {
            SpeakerType::Bot => Speaker::Bot,
            SpeakerType::Agent => Speaker::Agent,
            SpeakerType::User => Speaker::User,
        }
    }
}

/// Parses `--delimiter`: a single ASCII character, or `\t` for tab.
fn parse_delimiter(s: &str) -> std::result::Result<u8, String> {
    match s {
        "\\t" | "tab" => Ok(b'\t'),
        _ => match s.as_bytes() {
            [b] if b.is_ascii() => Ok(*b),
            _ => Err(format!(
                "Invalid delimiter: '{}'. Expected a single ASCII character",
                s
            )),
        },
    }
}
