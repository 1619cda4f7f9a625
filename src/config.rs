//! Configuration types for readers and transformers.
//!
//! Plain structs with builder methods and serde derives, so they can be
//! built in code or filled from CLI flags.
//!
//! # Example
//!
//! ```rust
//! use chatsheet::config::{BasicConfig, PairedConfig, ReadConfig};
//! use chatsheet::core::models::Speaker;
//!
//! # fn main() -> chatsheet::Result<()> {
//! let read = ReadConfig::new().with_sheet("Transcripts");
//!
//! let basic = BasicConfig::new()
//!     .with_speakers([Speaker::Bot, Speaker::User])
//!     .with_start("2024-01-01")?;
//!
//! let paired = PairedConfig::new().with_strict(true);
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};

use crate::core::filter::DateRange;
use crate::core::models::{Speaker, SpeakerSet};
use crate::error::Result;

/// How to read the input file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadConfig {
    /// Worksheet to read; the first sheet when `None`.
    pub sheet: Option<String>,

    /// Field delimiter for CSV input (default: `,`).
    pub delimiter: u8,
}

impl Default for ReadConfig {
    fn default() -> Self {
        Self {
            sheet: None,
            delimiter: b',',
        }
    }
}

impl ReadConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_sheet(mut self, sheet: impl Into<String>) -> Self {
        self.sheet = Some(sheet.into());
        self
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

/// Settings for basic (one record per utterance) flattening.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicConfig {
    /// Speakers to include (default: all).
    pub speakers: SpeakerSet,

    /// Date window applied to the output.
    pub range: DateRange,

    /// Fail on irregular turn-column layouts instead of logging them.
    pub strict: bool,
}

impl BasicConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts output to the given speakers.
    #[must_use]
    pub fn with_speakers(mut self, speakers: impl IntoIterator<Item = Speaker>) -> Self {
        self.speakers = speakers.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_range(mut self, range: DateRange) -> Self {
        self.range = range;
        self
    }

    /// Sets the start date (`YYYY-MM-DD`, inclusive).
    pub fn with_start(mut self, date_str: &str) -> Result<Self> {
        self.range = self.range.with_start(date_str)?;
        Ok(self)
    }

    /// Sets the end date (`YYYY-MM-DD`, inclusive).
    pub fn with_end(mut self, date_str: &str) -> Result<Self> {
        self.range = self.range.with_end(date_str)?;
        Ok(self)
    }

    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

/// Names of the per-session identity columns copied into paired records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityColumns {
    pub first_name: String,
    pub last_name: String,
    pub user_id: String,
}

impl Default for IdentityColumns {
    fn default() -> Self {
        Self {
            first_name: "First Name".to_string(),
            last_name: "Last Name".to_string(),
            user_id: "UserID".to_string(),
        }
    }
}

impl IdentityColumns {
    /// Column names in output order.
    pub fn names(&self) -> [&str; 3] {
        [&self.first_name, &self.last_name, &self.user_id]
    }
}

/// Settings for paired (question/answer) extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairedConfig {
    /// Identity columns to copy into each record.
    pub identity: IdentityColumns,

    /// Date window applied to the answer date.
    pub range: DateRange,

    /// Fail on irregular turn-column layouts instead of logging them.
    pub strict: bool,
}

impl PairedConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_identity(mut self, identity: IdentityColumns) -> Self {
        self.identity = identity;
        self
    }

    #[must_use]
    pub fn with_range(mut self, range: DateRange) -> Self {
        self.range = range;
        self
    }

    /// Sets the start date (`YYYY-MM-DD`, inclusive).
    pub fn with_start(mut self, date_str: &str) -> Result<Self> {
        self.range = self.range.with_start(date_str)?;
        Ok(self)
    }

    /// Sets the end date (`YYYY-MM-DD`, inclusive).
    pub fn with_end(mut self, date_str: &str) -> Result<Self> {
        self.range = self.range.with_end(date_str)?;
        Ok(self)
    }

    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}
