//! Flat-file exports

pub mod csv;

pub use csv::export_transactions_csv;
