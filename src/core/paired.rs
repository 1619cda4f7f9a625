//! Paired extraction: one record per user question and bot answer.
//!
//! A question at `user.N` is answered by `bot.{N+1}`, and the answer's
//! `created_at.{N+1}` dates the pair. Pairing starts at `user.1`; turn 0 of
//! the user role is never read.
//!
//! # Example
//!
//! ```
//! use chatsheet::config::PairedConfig;
//! use chatsheet::core::paired::pair_exchanges;
//! use chatsheet::table::Table;
//!
//! # fn main() -> chatsheet::Result<()> {
//! let table = Table::from_records(&[&[
//!     ("First Name", "Jo"), ("Last Name", "Doe"), ("UserID", "17"),
//!     ("bot.0", "Welcome"), ("agent.0", ""), ("user.0", ""), ("created_at.0", "2024-01-05"),
//!     ("bot.1", ""), ("agent.1", ""), ("user.1", "hi"), ("created_at.1", "2024-01-05"),
//!     ("bot.2", "hello"), ("agent.2", ""), ("user.2", ""), ("created_at.2", "2024-01-05 10:30:00"),
//! ]]);
//!
//! let out = pair_exchanges(&table, &PairedConfig::new())?;
//! assert_eq!(out.len(), 1);
//! assert_eq!(out.records[0].ask, "hi");
//! assert_eq!(out.records[0].answer, "hello");
//! assert_eq!(out.records[0].time.to_string(), "10:30:00");
//! # Ok(())
//! # }
//! ```

use crate::config::{IdentityColumns, PairedConfig};
use crate::core::models::{Exchange, Extraction, ExtractionStats};
use crate::error::{ChatsheetError, Result};
use crate::schema::{Role, TurnSchema};
use crate::table::{Row, Table};
use crate::timestamp::parse_cell;

/// First user turn considered for pairing.
const FIRST_ASK_TURN: usize = 1;

/// Pairs user questions with the bot answers of the following turn.
///
/// A question without a bot answer in the next turn yields nothing (counted
/// as `unanswered`). A pair whose answer timestamp is missing or
/// unparseable is dropped (counted as `invalid_time`), even when both
/// texts are present.
///
/// # Errors
///
/// - [`ChatsheetError::MissingColumn`] if an identity column is absent.
/// - [`ChatsheetError::InconsistentLayout`] in strict mode on irregular
///   turn columns.
pub fn pair_exchanges(table: &Table, config: &PairedConfig) -> Result<Extraction<Exchange>> {
    let identity = IdentityPositions::resolve(table, &config.identity)?;
    let schema = TurnSchema::discover(table);
    schema.enforce(table, config.strict)?;

    let mut stats = ExtractionStats {
        rows: table.len(),
        ..ExtractionStats::default()
    };
    let mut records = Vec::new();

    for row in table.rows() {
        for turn in FIRST_ASK_TURN..schema.turn_count() {
            let Some(ask) = row.lookup(schema.column(Role::User, turn)).as_text() else {
                continue;
            };
            let answer_slots = schema.slots(turn + 1);
            let Some(answer) = row.lookup(answer_slots.bot).as_text() else {
                stats.unanswered += 1;
                continue;
            };
            stats.candidates += 1;

            let Some(answered_at) = parse_cell(row.lookup(answer_slots.created_at)) else {
                stats.invalid_time += 1;
                continue;
            };
            let date = answered_at.date();
            if !config.range.contains(date) {
                stats.out_of_range += 1;
                continue;
            }

            let [first_name, last_name, user_id] = identity.values(row);
            records.push(Exchange {
                first_name,
                last_name,
                user_id,
                ask: ask.into_owned(),
                answer: answer.into_owned(),
                date,
                time: answered_at.time(),
            });
        }
    }

    stats.emitted = records.len();
    tracing::debug!(?stats, "paired exchanges");

    Ok(Extraction { records, stats })
}

struct IdentityPositions([usize; 3]);

impl IdentityPositions {
    fn resolve(table: &Table, columns: &IdentityColumns) -> Result<Self> {
        let mut positions = [0; 3];
        for (slot, name) in positions.iter_mut().zip(columns.names()) {
            *slot = table
                .column_index(name)
                .ok_or_else(|| ChatsheetError::missing_column(name))?;
        }
        Ok(Self(positions))
    }

    fn values(&self, row: &Row) -> [String; 3] {
        self.0
            .map(|i| row.get(i).as_text().map(|t| t.into_owned()).unwrap_or_default())
    }
}
