//! AES-256-GCM cipher codec
//!
//! The real-confidentiality alternative to the base64 obfuscation codec,
//! behind the same [`SnapshotCodec`] interface. Each encode uses a fresh
//! random nonce; the opaque stored text is the JSON of the nonce,
//! ciphertext, and format version.

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::{
    aead::{Aead, KeyInit, OsRng},
    Aes256Gcm, Nonce,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};

use super::{DerivedKey, SnapshotCodec};

/// Size of the AES-GCM nonce in bytes (96 bits)
const NONCE_SIZE: usize = 12;

/// Stored form of a ciphered slot
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CipherText {
    /// The nonce used for this encryption (base64 encoded)
    nonce: String,
    /// The ciphertext with authentication tag (base64 encoded)
    ciphertext: String,
    /// Version for future algorithm upgrades
    #[serde(default = "default_version")]
    version: u8,
}

fn default_version() -> u8 {
    1
}

/// Codec that encrypts the stored slot with AES-256-GCM
pub struct CipherCodec {
    key: DerivedKey,
}

impl CipherCodec {
    /// Create a cipher codec around a derived key
    pub fn new(key: DerivedKey) -> Self {
        Self { key }
    }

    fn cipher(&self) -> LedgerResult<Aes256Gcm> {
        Aes256Gcm::new_from_slice(self.key.as_bytes())
            .map_err(|e| LedgerError::Encryption(format!("Failed to create cipher: {}", e)))
    }
}

impl SnapshotCodec for CipherCodec {
    fn encode(&self, plain: &str) -> LedgerResult<String> {
        let cipher = self.cipher()?;

        let mut nonce_bytes = [0u8; NONCE_SIZE];
        OsRng.fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = cipher
            .encrypt(nonce, plain.as_bytes())
            .map_err(|e| LedgerError::Encryption(format!("Encryption failed: {}", e)))?;

        let stored = CipherText {
            nonce: STANDARD.encode(nonce_bytes),
            ciphertext: STANDARD.encode(&ciphertext),
            version: 1,
        };
        serde_json::to_string(&stored)
            .map_err(|e| LedgerError::Encryption(format!("Failed to serialize: {}", e)))
    }

    fn decode(&self, opaque: &str) -> LedgerResult<String> {
        let stored: CipherText = serde_json::from_str(opaque.trim())
            .map_err(|e| LedgerError::Codec(format!("Malformed cipher envelope: {}", e)))?;

        if stored.version != 1 {
            return Err(LedgerError::Codec(format!(
                "Unsupported cipher version: {}",
                stored.version
            )));
        }

        let nonce_bytes = STANDARD
            .decode(&stored.nonce)
            .map_err(|e| LedgerError::Codec(format!("Invalid nonce encoding: {}", e)))?;
        if nonce_bytes.len() != NONCE_SIZE {
            return Err(LedgerError::Codec(format!(
                "Invalid nonce size: expected {}, got {}",
                NONCE_SIZE,
                nonce_bytes.len()
            )));
        }

        let ciphertext = STANDARD
            .decode(&stored.ciphertext)
            .map_err(|e| LedgerError::Codec(format!("Invalid ciphertext encoding: {}", e)))?;

        let cipher = self.cipher()?;
        let plaintext = cipher
            .decrypt(Nonce::from_slice(&nonce_bytes), ciphertext.as_ref())
            .map_err(|_| {
                LedgerError::Codec("Decryption failed: wrong key or corrupted data".to_string())
            })?;

        String::from_utf8(plaintext)
            .map_err(|e| LedgerError::Codec(format!("Invalid UTF-8 in decrypted data: {}", e)))
    }

    fn name(&self) -> &'static str {
        "aes-256-gcm"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::key_derivation::{derive_key, KeyDerivationParams};

    fn test_codec(passphrase: &str) -> CipherCodec {
        let params = KeyDerivationParams::generate();
        CipherCodec::new(derive_key(passphrase, &params).unwrap())
    }

    #[test]
    fn test_round_trip() {
        let codec = test_codec("correct horse");
        let plain = r#"{"people":[],"transactions":[]}"#;

        let opaque = codec.encode(plain).unwrap();
        assert_eq!(codec.decode(&opaque).unwrap(), plain);
    }

    #[test]
    fn test_fresh_nonce_per_encode() {
        let codec = test_codec("correct horse");
        let opaque1 = codec.encode("same input").unwrap();
        let opaque2 = codec.encode("same input").unwrap();
        assert_ne!(opaque1, opaque2);
    }

    #[test]
    fn test_wrong_key_is_recoverable_error() {
        let codec1 = test_codec("passphrase one");
        let codec2 = test_codec("passphrase two");

        let opaque = codec1.encode("secret ledger").unwrap();
        let result = codec2.decode(&opaque);
        assert!(matches!(result, Err(LedgerError::Codec(_))));
    }

    #[test]
    fn test_tampered_ciphertext_fails() {
        let codec = test_codec("correct horse");
        let opaque = codec.encode("secret ledger").unwrap();

        let mut stored: CipherText = serde_json::from_str(&opaque).unwrap();
        let mut bytes = STANDARD.decode(&stored.ciphertext).unwrap();
        bytes[0] ^= 0xFF;
        stored.ciphertext = STANDARD.encode(&bytes);
        let tampered = serde_json::to_string(&stored).unwrap();

        assert!(codec.decode(&tampered).is_err());
    }

    #[test]
    fn test_garbage_opaque_is_recoverable() {
        let codec = test_codec("correct horse");
        assert!(matches!(
            codec.decode("definitely not a cipher envelope"),
            Err(LedgerError::Codec(_))
        ));
    }

    #[test]
    fn test_empty_plaintext() {
        let codec = test_codec("correct horse");
        let opaque = codec.encode("").unwrap();
        assert_eq!(codec.decode(&opaque).unwrap(), "");
    }
}
