//! CLI command handlers
//!
//! This module bridges the clap argument parsing with the service layer.
//! All draft validation and person-name resolution happens here, before the
//! engine is involved.

pub mod backup;
pub mod codec;
pub mod export;
pub mod person;
pub mod transaction;

pub use backup::{handle_backup_command, BackupCommands};
pub use codec::{handle_codec_command, CodecCommands};
pub use export::{handle_export_command, ExportCommands};
pub use person::{handle_people_command, handle_tag_command, PeopleArgs, TagArgs};
pub use transaction::{
    handle_add_command, handle_edit_command, handle_list_command, AddArgs, EditArgs, ListArgs,
};

use zeroize::Zeroizing;

use crate::codec::{derive_key, CipherCodec, ObfuscationCodec, SnapshotCodec};
use crate::config::{LedgerPaths, Settings};
use crate::error::{LedgerError, LedgerResult};
use crate::services::LedgerService;
use crate::storage::LedgerStore;

/// Open the ledger service with the codec the settings call for.
///
/// When the cipher codec is enabled this prompts for the passphrase.
pub fn open_service(paths: &LedgerPaths, settings: &Settings) -> LedgerResult<LedgerService> {
    let codec = build_codec(settings)?;
    let store = LedgerStore::new(paths.ledger_file(), codec);
    Ok(LedgerService::new(store))
}

/// Build the snapshot codec configured in settings
pub fn build_codec(settings: &Settings) -> LedgerResult<Box<dyn SnapshotCodec>> {
    if settings.is_encryption_enabled() {
        let params = settings.encryption.key_params.as_ref().ok_or_else(|| {
            LedgerError::Config("Encryption enabled but key parameters are missing".into())
        })?;
        let passphrase = prompt_passphrase("Passphrase: ")?;
        let key = derive_key(&passphrase, params)?;
        Ok(Box::new(CipherCodec::new(key)))
    } else {
        Ok(Box::new(ObfuscationCodec))
    }
}

/// Prompt for a passphrase without echoing it; the buffer is wiped on drop
pub fn prompt_passphrase(prompt: &str) -> LedgerResult<Zeroizing<String>> {
    rpassword::prompt_password(prompt)
        .map(Zeroizing::new)
        .map_err(|e| LedgerError::Io(format!("Failed to read passphrase: {}", e)))
}
