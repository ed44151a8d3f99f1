//! Ledger store: the single persisted snapshot slot
//!
//! Owns the one flat file holding the codec-encoded snapshot. `load` is
//! forgiving (an absent or unreadable slot degrades to an empty ledger with
//! a diagnostic); `save` is strict and overwrites the whole slot atomically.
//! The engine never touches this type — callers run load → engine → save.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::codec::SnapshotCodec;
use crate::error::{LedgerError, LedgerResult};
use crate::models::LedgerSnapshot;

use super::file_io::{read_text_optional, write_text_atomic};

/// The persisted snapshot slot with its codec
pub struct LedgerStore {
    path: PathBuf,
    codec: Box<dyn SnapshotCodec>,
}

impl LedgerStore {
    /// Create a store around a slot path and codec
    pub fn new(path: PathBuf, codec: Box<dyn SnapshotCodec>) -> Self {
        Self { path, codec }
    }

    /// Path of the persistence slot
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Name of the active codec, for the status command
    pub fn codec_name(&self) -> &'static str {
        self.codec.name()
    }

    /// Load the persisted snapshot.
    ///
    /// An absent slot is the valid initial state and yields an empty ledger.
    /// A slot that cannot be read, decoded, or parsed also yields an empty
    /// ledger, with a warning diagnostic; load never fails hard.
    pub fn load(&self) -> LedgerSnapshot {
        let opaque = match read_text_optional(&self.path) {
            Ok(Some(text)) => text,
            Ok(None) => {
                debug!(slot = %self.path.display(), "no persisted ledger, starting empty");
                return LedgerSnapshot::empty();
            }
            Err(e) => {
                warn!(slot = %self.path.display(), error = %e, "failed to read ledger slot, starting empty");
                return LedgerSnapshot::empty();
            }
        };

        match self.decode_snapshot(&opaque) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(slot = %self.path.display(), error = %e, "failed to decode ledger slot, starting empty");
                LedgerSnapshot::empty()
            }
        }
    }

    /// Serialize, encode, and atomically persist the full snapshot,
    /// overwriting the previous value
    pub fn save(&self, snapshot: &LedgerSnapshot) -> LedgerResult<()> {
        let json = snapshot.to_json()?;
        let opaque = self.codec.encode(&json)?;
        write_text_atomic(&self.path, &opaque)?;
        debug!(
            slot = %self.path.display(),
            people = snapshot.people.len(),
            transactions = snapshot.transactions.len(),
            "ledger saved"
        );
        Ok(())
    }

    /// The persisted opaque text verbatim, if any.
    ///
    /// Used by the backup exporter, which repackages the stored form
    /// without decoding it.
    pub fn raw_opaque(&self) -> LedgerResult<Option<String>> {
        read_text_optional(&self.path)
    }

    /// Strictly decode opaque text and persist the resulting snapshot.
    ///
    /// Unlike [`load`](LedgerStore::load), failures propagate: restoring a
    /// corrupt backup must not silently replace good data with an empty
    /// ledger. Used by backup import and codec switches.
    pub fn restore_opaque(&self, opaque: &str) -> LedgerResult<LedgerSnapshot> {
        let snapshot = self.decode_snapshot(opaque)?;
        self.save(&snapshot)?;
        Ok(snapshot)
    }

    /// Strict decode + parse of opaque text, without persisting.
    ///
    /// Used to verify a passphrase or a backup payload before committing
    /// to it.
    pub fn decode_snapshot(&self, opaque: &str) -> LedgerResult<LedgerSnapshot> {
        let json = self.codec.decode(opaque)?;
        LedgerSnapshot::from_json(&json)
            .map_err(|e| LedgerError::Storage(format!("Failed to parse snapshot: {}", e)))
    }
}
