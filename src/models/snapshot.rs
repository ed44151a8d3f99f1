//! Ledger snapshot: the aggregate root
//!
//! The full in-memory ledger state at one point in time — all persons plus
//! the transaction log, newest first. The snapshot is the unit the engine
//! consumes and produces, and the unit of persistence.

use serde::{Deserialize, Serialize};

use super::ids::{PersonId, TransactionId};
use super::person::Person;
use super::transaction::Transaction;

/// The complete ledger state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// All known persons, unordered, keyed by id
    #[serde(default)]
    pub people: Vec<Person>,

    /// All recorded transactions, newest first
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

impl LedgerSnapshot {
    /// An empty ledger: zero persons, zero transactions
    pub fn empty() -> Self {
        Self::default()
    }

    /// Check if the ledger holds no data at all
    pub fn is_empty(&self) -> bool {
        self.people.is_empty() && self.transactions.is_empty()
    }

    /// Look up a person by id
    pub fn person(&self, id: PersonId) -> Option<&Person> {
        self.people.iter().find(|p| p.id == id)
    }

    /// Look up a person by id, mutably
    pub fn person_mut(&mut self, id: PersonId) -> Option<&mut Person> {
        self.people.iter_mut().find(|p| p.id == id)
    }

    /// Look up a transaction by id
    pub fn transaction(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    /// Position of a transaction in the log
    pub fn transaction_position(&self, id: TransactionId) -> Option<usize> {
        self.transactions.iter().position(|t| t.id == id)
    }

    /// Get the person with the given id, seeding a fresh zero-total record
    /// if none exists yet
    pub fn person_or_insert(
        &mut self,
        id: PersonId,
        name: &str,
        first_date: chrono::NaiveDate,
    ) -> &mut Person {
        let pos = match self.people.iter().position(|p| p.id == id) {
            Some(pos) => pos,
            None => {
                self.people.push(Person::seeded(id, name, first_date));
                self.people.len() - 1
            }
        };
        &mut self.people[pos]
    }

    /// Serialize the snapshot to its canonical JSON text form
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Parse a snapshot from its JSON text form
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}
