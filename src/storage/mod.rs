//! Storage layer for favor-ledger
//!
//! One persisted slot holds the codec-encoded snapshot; writes are atomic
//! whole-file overwrites, last writer wins.

pub mod file_io;
pub mod store;

pub use file_io::{read_text_optional, write_text_atomic};
pub use store::LedgerStore;
