//! Business logic layer
//!
//! Bridges the CLI to the pure engine: name resolution, draft construction,
//! and the load → engine → save cycle against the store.

pub mod ledger;
pub mod resolver;

pub use ledger::{LedgerService, TransactionFilter};
pub use resolver::{NameResolver, PersonResolver};
