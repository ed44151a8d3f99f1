//! Backup export and import
//!
//! Backups wrap the persisted opaque slot text in a versioned envelope;
//! import runs the payload back through the codec before saving.

pub mod exporter;
pub mod import;

pub use exporter::{export_backup, BackupEnvelope, BACKUP_VERSION};
pub use import::import_backup;
