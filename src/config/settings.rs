//! User settings for favor-ledger
//!
//! Manages user preferences: currency symbol, date format, and the stored
//! slot's codec configuration.

use serde::{Deserialize, Serialize};

use super::paths::LedgerPaths;
use crate::codec::KeyDerivationParams;
use crate::error::LedgerError;
use crate::storage::write_text_atomic;

/// Cipher-codec settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EncryptionSettings {
    /// Whether the stored slot uses the cipher codec instead of the
    /// default obfuscation codec
    #[serde(default)]
    pub enabled: bool,

    /// Key derivation parameters (salt, memory cost, etc.)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_params: Option<KeyDerivationParams>,
}

/// User settings for favor-ledger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used for display
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Cipher-codec settings for the stored slot
    #[serde(default)]
    pub encryption: EncryptionSettings,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "¥".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            encryption: EncryptionSettings::default(),
        }
    }
}

impl Settings {
    /// Check if the cipher codec is enabled
    pub fn is_encryption_enabled(&self) -> bool {
        self.encryption.enabled
    }

    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &LedgerPaths) -> Result<Self, LedgerError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| LedgerError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents)
                .map_err(|e| LedgerError::Config(format!("Failed to parse settings file: {}", e)))?;

            Ok(settings)
        } else {
            // Defaults are not persisted until the caller saves them.
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &LedgerPaths) -> Result<(), LedgerError> {
        paths.ensure_directories()?;
        let json = serde_json::to_string_pretty(self)?;
        write_text_atomic(paths.settings_file(), &json)
    }
}
