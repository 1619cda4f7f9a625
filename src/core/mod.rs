//! Core processing logic for chatsheet.
//!
//! This module contains:
//! - [`models`] - Record types, speakers and extraction statistics
//! - [`filter`] - Date-range filtering and bound derivation
//! - [`basic`] - One record per utterance
//! - [`paired`] - One record per user question and bot answer
//! - [`output`] - Format writers (XLSX, CSV, JSON, JSONL)
//!
//! # Quick Start
//!
//! ```rust
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn example() {
//! use chatsheet::core::{
//!     BasicConfig, DateRange, Utterance,
//!     flatten, pair_exchanges,
//!     write_csv, write_json, write_jsonl,
//! };
//! # }
//! ```

pub mod basic;
pub mod filter;
pub mod models;
pub mod output;
pub mod paired;

// Re-export main types for convenience
pub use basic::flatten;
pub use filter::{DateBounds, DateRange};
pub use models::{Exchange, Extraction, ExtractionStats, Speaker, SpeakerSet, Utterance};
pub use output::OutputRecord;
pub use paired::pair_exchanges;

pub use crate::config::{BasicConfig, IdentityColumns, PairedConfig};

// Conditionally re-export output writers
#[cfg(feature = "csv-output")]
pub use output::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use output::{to_json, to_jsonl, write_json, write_jsonl};
#[cfg(feature = "xlsx")]
pub use output::{to_xlsx, write_xlsx};
