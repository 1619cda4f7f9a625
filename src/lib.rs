//! # Chatsheet
//!
//! A Rust library for flattening wide chatbot transcript exports into
//! analysis-friendly tables.
//!
//! ## Overview
//!
//! Transcript exports store one conversation session per spreadsheet row, with
//! four columns per turn: `bot.N`, `agent.N`, `user.N` and `created_at.N`.
//! Chatsheet turns that layout into long tables:
//!
//! - **Basic mode** - one [`Utterance`](core::models::Utterance) per populated
//!   turn: `type, text, time`
//! - **Paired mode** - one [`Exchange`](core::models::Exchange) per user
//!   question at `user.N` answered by the bot at `bot.{N+1}`:
//!   `First Name, Last Name, UserID, ask, answer, date, time`
//!
//! Both modes filter by an optional inclusive date range. Records with a
//! missing or unparseable timestamp are dropped and counted in
//! [`ExtractionStats`](core::models::ExtractionStats), never raised as errors.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chatsheet::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let table = read_table("conversations.xlsx", &ReadConfig::new())?;
//!
//!     let config = BasicConfig::new()
//!         .with_speakers([Speaker::Bot, Speaker::User])
//!         .with_start("2024-01-01")?;
//!     let utterances = flatten(&table, &config)?;
//!
//!     write_to_format(&utterances.records, "utterances.xlsx", OutputFormat::Xlsx)?;
//!     println!("{} kept, {} dropped", utterances.len(), utterances.stats.dropped());
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`table`] - In-memory [`Table`](table::Table) of [`Cell`](table::Cell)s
//! - [`input`] - Readers: spreadsheets (calamine) and CSV
//! - [`schema`] - Turn-column discovery ([`TurnSchema`](schema::TurnSchema))
//! - [`timestamp`] - Lenient timestamp parsing
//! - [`config`] - [`ReadConfig`](config::ReadConfig), [`BasicConfig`](config::BasicConfig), [`PairedConfig`](config::PairedConfig)
//! - [`core`] - Transformers, date filtering, record types and writers
//!   - [`core::basic`] - [`flatten`](core::basic::flatten)
//!   - [`core::paired`] - [`pair_exchanges`](core::paired::pair_exchanges)
//!   - [`core::filter`] - [`DateRange`](core::filter::DateRange), [`DateBounds`](core::filter::DateBounds)
//!   - [`core::output`] - XLSX, CSV, JSON and JSONL writers
//! - [`format`] - [`OutputFormat`](format::OutputFormat) and format dispatch
//! - [`cli`] - CLI types (requires the `cli` feature)
//! - [`error`] - Unified error types ([`ChatsheetError`], [`Result`])
//! - [`prelude`] - Convenient re-exports

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod format;
pub mod input;
pub mod schema;
pub mod table;
pub mod timestamp;

// Re-export the main types at the crate root for convenience
pub use error::{ChatsheetError, Result};

/// Convenient re-exports for common usage.
///
/// Import everything you need with a single line:
///
/// ```rust
/// use chatsheet::prelude::*;
/// ```
pub mod prelude {
    // Error types
    pub use crate::error::{ChatsheetError, Result};

    // Input
    pub use crate::input::read_table;
    pub use crate::table::{Cell, Table};

    // Configs
    pub use crate::config::{BasicConfig, IdentityColumns, PairedConfig, ReadConfig};

    // Models
    pub use crate::core::models::{
        Exchange, Extraction, ExtractionStats, Speaker, SpeakerSet, Utterance,
    };

    // Transformers and filtering
    pub use crate::core::basic::flatten;
    pub use crate::core::filter::{DateBounds, DateRange};
    pub use crate::core::paired::pair_exchanges;

    // Output
    pub use crate::core::output::OutputRecord;
    pub use crate::format::{OutputFormat, to_format_bytes, write_to_format};
}
