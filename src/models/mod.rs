//! Core data models for favor-ledger
//!
//! This module contains the data structures that represent the gift-ledger
//! domain: persons, transactions, the money type, and the snapshot that
//! aggregates them.

pub mod ids;
pub mod money;
pub mod person;
pub mod snapshot;
pub mod transaction;

pub use ids::{PersonId, TransactionId};
pub use money::Money;
pub use person::Person;
pub use snapshot::LedgerSnapshot;
pub use transaction::{DraftValidationError, Transaction, TransactionDraft, TransactionKind};
