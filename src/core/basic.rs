//! Basic flattening: one record per utterance.
//!
//! Every turn of every row contributes at most one [`Utterance`]: the text of
//! the highest-precedence included speaker (bot, then agent, then user) that
//! has a value, dated by the turn's `created_at` column.
//!
//! # Example
//!
//! ```
//! use chatsheet::config::BasicConfig;
//! use chatsheet::core::basic::flatten;
//! use chatsheet::core::models::Speaker;
//! use chatsheet::table::Table;
//!
//! # fn main() -> chatsheet::Result<()> {
//! let table = Table::from_records(&[&[
//!     ("bot.0", "Welcome!"), ("agent.0", ""), ("user.0", ""), ("created_at.0", "2024-01-05 09:00:00"),
//!     ("bot.1", ""), ("agent.1", ""), ("user.1", "hi"), ("created_at.1", "2024-01-05 09:01:00"),
//! ]]);
//!
//! let out = flatten(&table, &BasicConfig::new())?;
//! assert_eq!(out.len(), 2);
//! assert_eq!(out.records[0].speaker, Speaker::Bot);
//! assert_eq!(out.records[1].text, "hi");
//! # Ok(())
//! # }
//! ```

use std::borrow::Cow;

use crate::config::BasicConfig;
use crate::core::models::{Extraction, ExtractionStats, Speaker, Utterance};
use crate::error::Result;
use crate::schema::{TurnSchema, TurnSlots};
use crate::table::{Row, Table};
use crate::timestamp::parse_cell;

/// Flattens `table` into one record per utterance.
///
/// Output order is row order, then turn order within a row. Utterances
/// whose timestamp is missing or unparseable are dropped, as are those
/// outside `config.range`; both are counted in the returned stats.
///
/// # Errors
///
/// Only in strict mode, when the turn columns are irregular.
pub fn flatten(table: &Table, config: &BasicConfig) -> Result<Extraction<Utterance>> {
    let schema = TurnSchema::discover(table);
    schema.enforce(table, config.strict)?;

    let mut stats = ExtractionStats {
        rows: table.len(),
        ..ExtractionStats::default()
    };
    let mut records = Vec::new();

    for row in table.rows() {
        for turn in 0..schema.turn_count() {
            let slots = schema.slots(turn);
            let Some((speaker, text)) = pick_speaker(row, &slots, config, &mut stats) else {
                continue;
            };
            stats.candidates += 1;

            let Some(ts) = parse_cell(row.lookup(slots.created_at)) else {
                stats.invalid_time += 1;
                continue;
            };
            let date = ts.date();
            if !config.range.contains(date) {
                stats.out_of_range += 1;
                continue;
            }

            records.push(Utterance::new(speaker, text.into_owned(), date));
        }
    }

    stats.emitted = records.len();
    tracing::debug!(?stats, "flattened utterances");

    Ok(Extraction { records, stats })
}

/// Picks the first included speaker with text in this turn.
///
/// Speakers are expected to be mutually exclusive per turn. When they are
/// not, the lower-precedence ones are counted as shadowed.
fn pick_speaker<'r>(
    row: &'r Row,
    slots: &TurnSlots,
    config: &BasicConfig,
    stats: &mut ExtractionStats,
) -> Option<(Speaker, Cow<'r, str>)> {
    let mut chosen = None;
    for speaker in config.speakers.iter() {
        let Some(text) = row.lookup(slots.get(speaker.role())).as_text() else {
            continue;
        };
        if chosen.is_none() {
            chosen = Some((speaker, text));
        } else {
            stats.shadowed += 1;
        }
    }
    chosen
}
