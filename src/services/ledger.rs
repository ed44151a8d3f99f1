//! Ledger service
//!
//! The caller-facing layer over the pure engine: each mutating operation is
//! one complete load → engine → save cycle against the store, so exactly one
//! cycle is ever in flight in this single-actor process. Queries load and
//! filter without writing.

use tracing::info;

use crate::engine;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{
    LedgerSnapshot, Person, PersonId, Transaction, TransactionDraft, TransactionId,
    TransactionKind,
};
use crate::storage::LedgerStore;

use super::resolver::{NameResolver, PersonResolver};

/// Options for filtering the transaction log
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Filter by person
    pub person_id: Option<PersonId>,
    /// Filter by direction
    pub kind: Option<TransactionKind>,
    /// Maximum number of transactions to return
    pub limit: Option<usize>,
}

impl TransactionFilter {
    /// Create a new empty filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by person
    pub fn person(mut self, person_id: PersonId) -> Self {
        self.person_id = Some(person_id);
        self
    }

    /// Filter by direction
    pub fn kind(mut self, kind: TransactionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Limit results
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Service for ledger queries and mutations
pub struct LedgerService {
    store: LedgerStore,
}

impl LedgerService {
    /// Create a service around a store
    pub fn new(store: LedgerStore) -> Self {
        Self { store }
    }

    /// The underlying store (used by backup commands)
    pub fn store(&self) -> &LedgerStore {
        &self.store
    }

    /// Load the current snapshot
    pub fn snapshot(&self) -> LedgerSnapshot {
        self.store.load()
    }

    /// Resolve a typed name against the current snapshot
    pub fn resolve_person(&self, query: &str) -> Option<PersonId> {
        NameResolver::new(&self.snapshot()).resolve(query)
    }

    /// Record a new gift and persist the result.
    ///
    /// Returns the stored transaction.
    pub fn record(&self, draft: TransactionDraft) -> LedgerResult<Transaction> {
        let snapshot = self.store.load();
        let snapshot = engine::add_transaction(snapshot, draft)?;
        self.store.save(&snapshot)?;

        let txn = snapshot
            .transactions
            .first()
            .cloned()
            .ok_or_else(|| LedgerError::Storage("snapshot empty after add".into()))?;
        info!(id = %txn.id, person = %txn.person_name, "gift recorded");
        Ok(txn)
    }

    /// Apply an edited transaction and persist the result.
    ///
    /// Unlike the engine's recoverable no-op, an unknown id is surfaced to
    /// the caller as a not-found error; the CLI user asked for a specific
    /// edit and should hear that nothing matched.
    pub fn amend(&self, edited: Transaction) -> LedgerResult<Transaction> {
        let id = edited.id;
        let snapshot = self.store.load();
        if snapshot.transaction(id).is_none() {
            return Err(LedgerError::transaction_not_found(id.to_string()));
        }

        let snapshot = engine::update_transaction(snapshot, edited)?;
        self.store.save(&snapshot)?;

        let txn = snapshot
            .transaction(id)
            .cloned()
            .ok_or_else(|| LedgerError::transaction_not_found(id.to_string()))?;
        info!(id = %txn.id, "transaction amended");
        Ok(txn)
    }

    /// Get a transaction by id
    pub fn transaction(&self, id: TransactionId) -> LedgerResult<Transaction> {
        self.snapshot()
            .transaction(id)
            .cloned()
            .ok_or_else(|| LedgerError::transaction_not_found(id.to_string()))
    }

    /// Find a transaction by a typed identifier.
    ///
    /// Accepts the full UUID or the short display form (`txn-1a2b3c4d`)
    /// printed by the register.
    pub fn find_transaction(&self, identifier: &str) -> LedgerResult<Transaction> {
        let identifier = identifier.trim();
        let snapshot = self.snapshot();

        if let Ok(id) = identifier.parse::<TransactionId>() {
            if let Some(txn) = snapshot.transaction(id) {
                return Ok(txn.clone());
            }
        }

        snapshot
            .transactions
            .iter()
            .find(|t| t.id.to_string() == identifier)
            .cloned()
            .ok_or_else(|| LedgerError::transaction_not_found(identifier.to_string()))
    }

    /// List transactions, newest first, with optional filtering
    pub fn list(&self, filter: TransactionFilter) -> Vec<Transaction> {
        let mut transactions = self.snapshot().transactions;

        if let Some(person_id) = filter.person_id {
            transactions.retain(|t| t.person_id == person_id);
        }
        if let Some(kind) = filter.kind {
            transactions.retain(|t| t.kind == kind);
        }
        if let Some(limit) = filter.limit {
            transactions.truncate(limit);
        }

        transactions
    }

    /// All persons, sorted by name for stable display
    pub fn people(&self) -> Vec<Person> {
        let mut people = self.snapshot().people;
        people.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        people
    }

    /// Get a person by id
    pub fn person(&self, id: PersonId) -> LedgerResult<Person> {
        self.snapshot()
            .person(id)
            .cloned()
            .ok_or_else(|| LedgerError::person_not_found(id.to_string()))
    }

    /// Replace a person's tags and persist the result
    pub fn tag_person(&self, id: PersonId, tags: Vec<String>) -> LedgerResult<Person> {
        let mut snapshot = self.store.load();
        let person = snapshot
            .person_mut(id)
            .ok_or_else(|| LedgerError::person_not_found(id.to_string()))?;
        person.tags = tags;
        let updated = person.clone();
        self.store.save(&snapshot)?;
        Ok(updated)
    }
}
