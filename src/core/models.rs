//! Record types produced by the transformers.

use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::schema::Role;

/// Who wrote an utterance.
///
/// The declaration order is also the precedence order used when a turn has
/// more than one populated speaker column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    Bot,
    Agent,
    User,
}

impl Speaker {
    /// All speakers, highest precedence first.
    pub const ALL: [Speaker; 3] = [Speaker::Bot, Speaker::Agent, Speaker::User];

    pub fn as_str(self) -> &'static str {
        match self {
            Speaker::Bot => "bot",
            Speaker::Agent => "agent",
            Speaker::User => "user",
        }
    }

    /// The turn-column role holding this speaker's text.
    pub fn role(self) -> Role {
        match self {
            Speaker::Bot => Role::Bot,
            Speaker::Agent => Role::Agent,
            Speaker::User => Role::User,
        }
    }
}

impl fmt::Display for Speaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Speaker {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bot" => Ok(Speaker::Bot),
            "agent" => Ok(Speaker::Agent),
            "user" => Ok(Speaker::User),
            _ => Err(format!(
                "Unknown speaker: '{}'. Expected one of: bot, agent, user",
                s
            )),
        }
    }
}

/// A subset of speakers to include in basic flattening.
///
/// ```
/// use chatsheet::core::models::{Speaker, SpeakerSet};
///
/// let set: SpeakerSet = [Speaker::Bot, Speaker::User].into_iter().collect();
/// assert!(set.contains(Speaker::Bot));
/// assert!(!set.contains(Speaker::Agent));
/// assert_eq!(SpeakerSet::all().len(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeakerSet {
    pub bot: bool,
    pub agent: bool,
    pub user: bool,
}

impl Default for SpeakerSet {
    fn default() -> Self {
        Self::all()
    }
}

impl SpeakerSet {
    pub fn all() -> Self {
        Self {
            bot: true,
            agent: true,
            user: true,
        }
    }

    pub fn none() -> Self {
        Self {
            bot: false,
            agent: false,
            user: false,
        }
    }

    pub fn contains(&self, speaker: Speaker) -> bool {
        match speaker {
            Speaker::Bot => self.bot,
            Speaker::Agent => self.agent,
            Speaker::User => self.user,
        }
    }

    pub fn insert(&mut self, speaker: Speaker) {
        match speaker {
            Speaker::Bot => self.bot = true,
            Speaker::Agent => self.agent = true,
            Speaker::User => self.user = true,
        }
    }

    /// Included speakers in precedence order.
    pub fn iter(&self) -> impl Iterator<Item = Speaker> + '_ {
        Speaker::ALL.into_iter().filter(|s| self.contains(*s))
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FromIterator<Speaker> for SpeakerSet {
    fn from_iter<I: IntoIterator<Item = Speaker>>(iter: I) -> Self {
        let mut set = SpeakerSet::none();
        for speaker in iter {
            set.insert(speaker);
        }
        set
    }
}

impl fmt::Display for SpeakerSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(Speaker::as_str).collect();
        if names.is_empty() {
            f.write_str("(none)")
        } else {
            f.write_str(&names.join(", "))
        }
    }
}

/// One flattened utterance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utterance {
    #[serde(rename = "type")]
    pub speaker: Speaker,
    pub text: String,
    /// Date of the turn's `created_at` value.
    pub time: NaiveDate,
}

impl Utterance {
    pub fn new(speaker: Speaker, text: impl Into<String>, time: NaiveDate) -> Self {
        Self {
            speaker,
            text: text.into(),
            time,
        }
    }
}

/// One user question paired with the bot answer of the next turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exchange {
    #[serde(rename = "First Name")]
    pub first_name: String,
    #[serde(rename = "Last Name")]
    pub last_name: String,
    #[serde(rename = "UserID")]
    pub user_id: String,
    pub ask: String,
    pub answer: String,
    /// Date of the answer.
    pub date: NaiveDate,
    /// Time of day of the answer.
    pub time: NaiveTime,
}

/// Counters describing what a transformation kept and dropped.
///
/// Invalid data never fails a transformation; these counters are the only
/// place it shows up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Input rows scanned.
    pub rows: usize,
    /// Records that had text and were considered for output.
    pub candidates: usize,
    /// Records written to the output.
    pub emitted: usize,
    /// Candidates dropped because their timestamp was missing or unparseable.
    pub invalid_time: usize,
    /// Candidates dropped by the date range.
    pub out_of_range: usize,
    /// Lower-precedence utterances hidden by another speaker in the same turn.
    pub shadowed: usize,
    /// User utterances without a bot answer in the next turn.
    pub unanswered: usize,
}

impl ExtractionStats {
    /// Total number of candidates that did not make it into the output.
    pub fn dropped(&self) -> usize {
        self.invalid_time + self.out_of_range
    }
}

/// Records plus the statistics of the run that produced them.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction<T> {
    pub records: Vec<T>,
    pub stats: ExtractionStats,
}

impl<T> Extraction<T> {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The first `n` records, for a quick look before writing.
    pub fn preview(&self, n: usize) -> &[T] {
        &self.records[..n.min(self.records.len())]
    }

    pub fn into_records(self) -> Vec<T> {
        self.records
    }
}
