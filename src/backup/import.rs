//! Backup import
//!
//! The symmetric counterpart of the exporter: parse the envelope, verify the
//! format version, decode the payload through the store's codec, and persist
//! the restored snapshot. All failures are strict — a bad backup must never
//! silently replace good data.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{LedgerError, LedgerResult};
use crate::models::LedgerSnapshot;
use crate::storage::LedgerStore;

use super::exporter::{BackupEnvelope, BACKUP_VERSION};

/// Restore the ledger from a backup file.
///
/// Returns the restored snapshot after it has been persisted.
pub fn import_backup(store: &LedgerStore, file: &Path) -> LedgerResult<LedgerSnapshot> {
    let contents = fs::read_to_string(file)
        .map_err(|e| LedgerError::Backup(format!("Failed to read {}: {}", file.display(), e)))?;

    let envelope: BackupEnvelope = serde_json::from_str(&contents)
        .map_err(|e| LedgerError::Backup(format!("Malformed backup file: {}", e)))?;

    if envelope.version != BACKUP_VERSION {
        return Err(LedgerError::Backup(format!(
            "Unsupported backup version: {} (expected {})",
            envelope.version, BACKUP_VERSION
        )));
    }

    let snapshot = store.restore_opaque(&envelope.payload)?;
    info!(
        file = %file.display(),
        people = snapshot.people.len(),
        transactions = snapshot.transactions.len(),
        "backup imported"
    );
    Ok(snapshot)
}
