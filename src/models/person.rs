//! Person model
//!
//! One record per distinct contact, carrying the running gift totals and the
//! signed net balance. Persons are created lazily by the engine the first
//! time a transaction references them and are never deleted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::PersonId;
use super::money::Money;
use super::transaction::TransactionKind;

/// A contact with running gift totals
///
/// Invariant: `balance == total_given - total_received` after every engine
/// operation, and both totals stay non-negative. All three fields are
/// adjusted only through [`apply`](Person::apply) and
/// [`revert`](Person::revert).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    /// Unique identifier, assigned at first appearance
    pub id: PersonId,

    /// Display name; not guaranteed unique
    pub name: String,

    /// Free-form labels, unordered for matching purposes
    #[serde(default)]
    pub tags: Vec<String>,

    /// Sum of all GIVE amounts toward this person
    pub total_given: Money,

    /// Sum of all RECEIVE amounts from this person
    pub total_received: Money,

    /// Signed net favor owed; positive means the user has given more
    pub balance: Money,

    /// Date of the most recent transaction touching this person
    pub last_interaction: NaiveDate,
}

impl Person {
    /// Seed a new person with zero totals, as the engine does when a
    /// transaction references an unknown id
    pub fn seeded(id: PersonId, name: impl Into<String>, first_date: NaiveDate) -> Self {
        Self {
            id,
            name: name.into(),
            tags: Vec::new(),
            total_given: Money::zero(),
            total_received: Money::zero(),
            balance: Money::zero(),
            last_interaction: first_date,
        }
    }

    /// Apply a transaction's effect to the running totals
    ///
    /// GIVE increases `total_given` and the balance (credit owed to the
    /// user); RECEIVE increases `total_received` and decreases the balance.
    pub fn apply(&mut self, kind: TransactionKind, amount: Money) {
        match kind {
            TransactionKind::Give => {
                self.total_given += amount;
                self.balance += amount;
            }
            TransactionKind::Receive => {
                self.total_received += amount;
                self.balance -= amount;
            }
        }
    }

    /// Undo a previously applied transaction effect, the exact inverse of
    /// [`apply`](Person::apply)
    pub fn revert(&mut self, kind: TransactionKind, amount: Money) {
        match kind {
            TransactionKind::Give => {
                self.total_given -= amount;
                self.balance -= amount;
            }
            TransactionKind::Receive => {
                self.total_received -= amount;
                self.balance += amount;
            }
        }
    }

    /// Raise `last_interaction` to `date` if it is more recent
    ///
    /// One-directional: an edit that moves a transaction earlier never
    /// lowers the recorded date.
    pub fn touch(&mut self, date: NaiveDate) {
        if date > self.last_interaction {
            self.last_interaction = date;
        }
    }

    /// Check the aggregate invariant; used by engine debug assertions
    pub fn totals_consistent(&self) -> bool {
        self.balance == self.total_given - self.total_received
            && !self.total_given.is_negative()
            && !self.total_received.is_negative()
    }

    /// Normalize a name for matching
    pub fn normalize_name(name: &str) -> String {
        name.trim().to_lowercase()
    }

    /// Check if this person matches a name exactly (case-insensitive)
    pub fn matches_name(&self, name: &str) -> bool {
        Self::normalize_name(&self.name) == Self::normalize_name(name)
    }

    /// Check if this person's name contains the query (case-insensitive)
    pub fn name_contains(&self, query: &str) -> bool {
        Self::normalize_name(&self.name).contains(&Self::normalize_name(query))
    }

    /// Check if this person carries a tag (case-insensitive)
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag.trim()))
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
