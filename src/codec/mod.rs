//! Reversible codecs for the stored ledger slot
//!
//! A codec transforms snapshot JSON text into the opaque string kept in the
//! persistence slot and back, with `decode(encode(x)) == x` for all valid
//! UTF-8 input. Decoding malformed stored data is a recoverable error, never
//! a panic.
//!
//! The default [`ObfuscationCodec`] is a plain base64 transform. It is
//! obfuscation, not encryption, and must not be relied on for
//! confidentiality; enable the [`CipherCodec`] for real protection of data
//! at rest.

pub mod cipher;
pub mod key_derivation;

pub use cipher::CipherCodec;
pub use key_derivation::{derive_key, DerivedKey, KeyDerivationParams};

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::error::{LedgerError, LedgerResult};

/// Reversible transform between snapshot JSON text and stored opaque text
pub trait SnapshotCodec {
    /// Encode plain snapshot text into its stored opaque form.
    ///
    /// Must succeed for any well-formed UTF-8 input.
    fn encode(&self, plain: &str) -> LedgerResult<String>;

    /// Decode stored opaque text back into snapshot text.
    ///
    /// Malformed input is reported as a recoverable [`LedgerError::Codec`].
    fn decode(&self, opaque: &str) -> LedgerResult<String>;

    /// Short name for diagnostics and the status command
    fn name(&self) -> &'static str;
}

/// Base64 obfuscation codec, the default stored form
///
/// Keeps casual eyes off the flat file and nothing more.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObfuscationCodec;

impl SnapshotCodec for ObfuscationCodec {
    fn encode(&self, plain: &str) -> LedgerResult<String> {
        Ok(STANDARD.encode(plain.as_bytes()))
    }

    fn decode(&self, opaque: &str) -> LedgerResult<String> {
        let bytes = STANDARD
            .decode(opaque.trim())
            .map_err(|e| LedgerError::Codec(format!("Invalid base64 in stored data: {}", e)))?;
        String::from_utf8(bytes)
            .map_err(|e| LedgerError::Codec(format!("Invalid UTF-8 in stored data: {}", e)))
    }

    fn name(&self) -> &'static str {
        "obfuscation"
    }
}
