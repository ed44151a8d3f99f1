//! Backup exporter
//!
//! Repackages the already-persisted opaque slot text into a versioned,
//! date-named JSON envelope. The exporter never decodes the payload; a
//! consumer must run it back through the codec on import.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{LedgerError, LedgerResult};
use crate::storage::{write_text_atomic, LedgerStore};

/// Current backup envelope format version
pub const BACKUP_VERSION: u32 = 1;

/// Backup file format: `{version, timestamp, payload}`
///
/// `payload` is the stored opaque text verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupEnvelope {
    pub version: u32,
    pub timestamp: DateTime<Utc>,
    pub payload: String,
}

/// Export the persisted ledger as a backup file in `dir`.
///
/// Returns the path of the written file, or `None` when nothing has been
/// persisted yet (a no-op, not an error).
pub fn export_backup(store: &LedgerStore, dir: &Path) -> LedgerResult<Option<PathBuf>> {
    let Some(payload) = store.raw_opaque()? else {
        return Ok(None);
    };

    fs::create_dir_all(dir)
        .map_err(|e| LedgerError::Backup(format!("Failed to create backup directory: {}", e)))?;

    let now = Utc::now();
    let envelope = BackupEnvelope {
        version: BACKUP_VERSION,
        timestamp: now,
        payload,
    };

    let filename = format!("favor_ledger_backup_{}.json", now.format("%Y-%m-%d"));
    let path = dir.join(filename);

    let json = serde_json::to_string_pretty(&envelope)
        .map_err(|e| LedgerError::Backup(format!("Failed to serialize backup: {}", e)))?;
    write_text_atomic(&path, &json)?;

    info!(file = %path.display(), "backup exported");
    Ok(Some(path))
}
