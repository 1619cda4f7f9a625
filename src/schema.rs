//! Turn-column discovery for wide-format transcript exports.
//!
//! Exports store a conversation as repeated column groups, one group per
//! turn: `bot.N`, `agent.N`, `user.N` and `created_at.N`. [`TurnSchema`]
//! resolves every `(role, turn)` pair to a column position once per table,
//! so the transformers never format column names inside their row loops.
//!
//! # Turn count
//!
//! The number of turns is the number of columns whose name *contains* one of
//! the role prefixes, divided by four. This mirrors how the exports have
//! always been read: one column per role per turn is assumed, not checked.
//! When a file breaks that assumption the turn count is off and trailing
//! turns are silently ignored. [`TurnSchema::layout_issues`] reports such
//! files, and strict mode refuses them.
//!
//! ```
//! use chatsheet::schema::{Role, TurnSchema};
//! use chatsheet::table::Table;
//!
//! let table = Table::new(
//!     ["bot.0", "agent.0", "user.0", "created_at.0", "bot.1", "agent.1", "user.1", "created_at.1"]
//!         .map(String::from)
//!         .to_vec(),
//! );
//! let schema = TurnSchema::discover(&table);
//!
//! assert_eq!(schema.turn_count(), 2);
//! assert_eq!(schema.column(Role::User, 1), Some(6));
//! assert!(schema.layout_issues(&table).is_empty());
//! ```

use std::collections::BTreeSet;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{ChatsheetError, Result};
use crate::table::Table;

static TURN_COLUMN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(bot|agent|user|created_at)\.(\d+)$").expect("static pattern compiles")
});

/// A column role within a turn group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Bot,
    Agent,
    User,
    CreatedAt,
}

impl Role {
    /// All roles in column-group order.
    pub const ALL: [Role; 4] = [Role::Bot, Role::Agent, Role::User, Role::CreatedAt];

    /// Column name stem, without the trailing dot.
    pub fn stem(self) -> &'static str {
        match self {
            Role::Bot => "bot",
            Role::Agent => "agent",
            Role::User => "user",
            Role::CreatedAt => "created_at",
        }
    }

    /// The substring that marks a column as belonging to this role.
    pub fn prefix(self) -> &'static str {
        match self {
            Role::Bot => "bot.",
            Role::Agent => "agent.",
            Role::User => "user.",
            Role::CreatedAt => "created_at.",
        }
    }

    /// Column name of this role at turn `index`.
    pub fn column_name(self, index: usize) -> String {
        format!("{}.{}", self.stem(), index)
    }

    fn from_stem(stem: &str) -> Option<Role> {
        Role::ALL.into_iter().find(|r| r.stem() == stem)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.stem())
    }
}

/// Column positions of one turn group. `None` means the column is absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TurnSlots {
    pub bot: Option<usize>,
    pub agent: Option<usize>,
    pub user: Option<usize>,
    pub created_at: Option<usize>,
}

impl TurnSlots {
    pub fn get(&self, role: Role) -> Option<usize> {
        match role {
            Role::Bot => self.bot,
            Role::Agent => self.agent,
            Role::User => self.user,
            Role::CreatedAt => self.created_at,
        }
    }
}

/// Resolved `(role, turn) -> column` mapping for one table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TurnSchema {
    turn_count: usize,
    matched: Vec<String>,
    // One entry per turn in `0..=turn_count`; the extra trailing entry serves
    // lookups one turn ahead.
    slots: Vec<TurnSlots>,
}

/// Returns `true` if `name` contains any role prefix.
pub fn is_turn_column(name: &str) -> bool {
    Role::ALL.iter().any(|r| name.contains(r.prefix()))
}

impl TurnSchema {
    /// Discovers the turn layout of `table`.
    pub fn discover(table: &Table) -> Self {
        let matched: Vec<String> = table
            .columns()
            .iter()
            .filter(|c| is_turn_column(c))
            .cloned()
            .collect();
        let turn_count = matched.len() / 4;

        let slots = (0..=turn_count)
            .map(|i| TurnSlots {
                bot: table.column_index(&Role::Bot.column_name(i)),
                agent: table.column_index(&Role::Agent.column_name(i)),
                user: table.column_index(&Role::User.column_name(i)),
                created_at: table.column_index(&Role::CreatedAt.column_name(i)),
            })
            .collect();

        tracing::debug!(
            matched = matched.len(),
            turns = turn_count,
            "discovered turn columns"
        );

        Self {
            turn_count,
            matched,
            slots,
        }
    }

    /// Number of turn groups, derived as matched columns / 4.
    pub fn turn_count(&self) -> usize {
        self.turn_count
    }

    /// Names of all columns that matched a role prefix, in table order.
    pub fn matched_columns(&self) -> &[String] {
        &self.matched
    }

    /// Column slots of turn `index`. Turns past `turn_count` have no columns.
    pub fn slots(&self, index: usize) -> TurnSlots {
        self.slots.get(index).copied().unwrap_or_default()
    }

    /// Column position of `role` at turn `index`.
    pub fn column(&self, role: Role, index: usize) -> Option<usize> {
        self.slots(index).get(role)
    }

    /// Lists every way the table deviates from regular four-column turn
    /// groups. An empty list means the turn count is trustworthy.
    pub fn layout_issues(&self, table: &Table) -> Vec<String> {
        let mut issues = Vec::new();

        if self.matched.len() % 4 != 0 {
            issues.push(format!(
                "{} turn columns is not a multiple of 4",
                self.matched.len()
            ));
        }

        let mut seen_beyond: BTreeSet<usize> = BTreeSet::new();
        for name in &self.matched {
            match TURN_COLUMN.captures(name) {
                Some(caps) => {
                    let index = caps[2].parse::<usize>().unwrap_or(usize::MAX);
                    if index >= self.turn_count && Role::from_stem(&caps[1]).is_some() {
                        seen_beyond.insert(index);
                    }
                }
                None => issues.push(format!("column '{name}' is not a '<role>.<turn>' column")),
            }
        }

        for index in 0..self.turn_count {
            for role in Role::ALL {
                if table.column_index(&role.column_name(index)).is_none() {
                    issues.push(format!("turn {index} has no '{role}' column"));
                }
            }
        }

        for index in seen_beyond {
            issues.push(format!(
                "turn {index} is past the derived turn count {}",
                self.turn_count
            ));
        }

        issues
    }

    /// Applies the layout policy: in strict mode any layout issue is an
    /// error, otherwise each one is logged and processing continues.
    pub fn enforce(&self, table: &Table, strict: bool) -> Result<()> {
        let issues = self.layout_issues(table);
        if issues.is_empty() {
            return Ok(());
        }
        if strict {
            return Err(ChatsheetError::InconsistentLayout { issues });
        }
        for issue in &issues {
            tracing::warn!(%issue, "irregular turn layout");
        }
        Ok(())
    }
}
