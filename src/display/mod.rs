//! Terminal display formatting

pub mod person;
pub mod transaction;

pub use person::format_people_table;
pub use transaction::{format_transaction_details, format_transaction_register};
