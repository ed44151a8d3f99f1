//! Codec management CLI commands
//!
//! The stored slot defaults to the base64 obfuscation codec, which keeps
//! casual eyes off the flat file but offers no confidentiality. These
//! commands switch the slot to the AES-256-GCM cipher codec and back,
//! re-encoding the persisted data through both codecs.

use clap::Subcommand;

use crate::codec::{derive_key, CipherCodec, KeyDerivationParams, ObfuscationCodec};
use crate::config::{LedgerPaths, Settings};
use crate::error::{LedgerError, LedgerResult};
use crate::storage::LedgerStore;

use super::prompt_passphrase;

/// Codec management commands
#[derive(Subcommand)]
pub enum CodecCommands {
    /// Encrypt the stored ledger with a passphrase (AES-256-GCM)
    Enable,

    /// Switch back to the obfuscation codec (requires current passphrase)
    Disable,

    /// Show which codec protects the stored ledger
    Status,
}

/// Handle a codec command
pub fn handle_codec_command(
    paths: &LedgerPaths,
    settings: &mut Settings,
    cmd: CodecCommands,
) -> LedgerResult<()> {
    match cmd {
        CodecCommands::Enable => enable_cipher(paths, settings),
        CodecCommands::Disable => disable_cipher(paths, settings),
        CodecCommands::Status => show_status(paths, settings),
    }
}

/// Switch the stored slot to the cipher codec
fn enable_cipher(paths: &LedgerPaths, settings: &mut Settings) -> LedgerResult<()> {
    if settings.is_encryption_enabled() {
        println!("The ledger is already encrypted.");
        return Ok(());
    }

    println!("Encrypting the stored ledger with AES-256-GCM.");
    println!("You will be asked for the passphrase on every run.");
    println!("IMPORTANT: if you forget the passphrase, the data cannot be recovered!");
    println!();

    let passphrase = prompt_passphrase("New passphrase: ")?;
    if passphrase.trim().is_empty() {
        return Err(LedgerError::Validation("Passphrase cannot be empty".into()));
    }
    let confirm = prompt_passphrase("Confirm passphrase: ")?;
    if *passphrase != *confirm {
        return Err(LedgerError::Validation("Passphrases do not match".into()));
    }

    let key_params = KeyDerivationParams::generate();
    let key = derive_key(&passphrase, &key_params)?;

    // Re-encode the slot: read through the old codec, write through the new.
    let old_store = LedgerStore::new(paths.ledger_file(), Box::new(ObfuscationCodec));
    let snapshot = old_store.load();
    let new_store = LedgerStore::new(paths.ledger_file(), Box::new(CipherCodec::new(key)));
    new_store.save(&snapshot)?;

    settings.encryption.enabled = true;
    settings.encryption.key_params = Some(key_params);
    settings.save(paths)?;

    println!();
    println!("Encryption enabled; the ledger has been re-encoded.");
    Ok(())
}

/// Switch the stored slot back to the obfuscation codec
fn disable_cipher(paths: &LedgerPaths, settings: &mut Settings) -> LedgerResult<()> {
    if !settings.is_encryption_enabled() {
        println!("The ledger is not encrypted.");
        return Ok(());
    }

    let params = settings.encryption.key_params.clone().ok_or_else(|| {
        LedgerError::Config("Encryption enabled but key parameters are missing".into())
    })?;

    let passphrase = prompt_passphrase("Current passphrase: ")?;
    let key = derive_key(&passphrase, &params)?;

    // Verify the passphrase against the stored slot before committing. A
    // wrong key must refuse here, not degrade to an empty ledger.
    let cipher_store = LedgerStore::new(paths.ledger_file(), Box::new(CipherCodec::new(key)));
    let snapshot = match cipher_store.raw_opaque()? {
        Some(opaque) => cipher_store.decode_snapshot(&opaque).map_err(|_| {
            LedgerError::Encryption("Wrong passphrase or corrupted ledger".into())
        })?,
        None => crate::models::LedgerSnapshot::empty(),
    };

    let plain_store = LedgerStore::new(paths.ledger_file(), Box::new(ObfuscationCodec));
    plain_store.save(&snapshot)?;

    settings.encryption.enabled = false;
    settings.encryption.key_params = None;
    settings.save(paths)?;

    println!("Encryption disabled; the ledger has been re-encoded.");
    println!("Note: the obfuscation codec is reversible and provides no confidentiality.");
    Ok(())
}

/// Show codec status
fn show_status(paths: &LedgerPaths, settings: &Settings) -> LedgerResult<()> {
    let codec = if settings.is_encryption_enabled() {
        "aes-256-gcm"
    } else {
        "obfuscation (base64, no confidentiality)"
    };

    println!("Codec:  {}", codec);
    println!("Slot:   {}", paths.ledger_file().display());
    println!(
        "Stored: {}",
        if paths.ledger_file().exists() { "yes" } else { "no" }
    );
    Ok(())
}
