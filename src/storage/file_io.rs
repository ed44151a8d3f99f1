//! File I/O utilities with atomic writes
//!
//! The ledger slot is a single flat text file; writes go through a temp file
//! plus rename so the slot is either fully replaced or untouched.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{LedgerError, LedgerResult};

/// Read a text file, returning `None` if it does not exist
pub fn read_text_optional<P: AsRef<Path>>(path: P) -> LedgerResult<Option<String>> {
    let path = path.as_ref();

    if !path.exists() {
        return Ok(None);
    }

    fs::read_to_string(path)
        .map(Some)
        .map_err(|e| LedgerError::Storage(format!("Failed to read {}: {}", path.display(), e)))
}

/// Write text to a file atomically (write to temp, then rename)
///
/// The file is either completely written or not modified at all, so a crash
/// mid-write cannot corrupt the slot.
pub fn write_text_atomic<P: AsRef<Path>>(path: P, text: &str) -> LedgerResult<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            LedgerError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Temp file in the same directory, required for an atomic rename
    let temp_path = path.with_extension("tmp");

    let file = File::create(&temp_path)
        .map_err(|e| LedgerError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    writer
        .write_all(text.as_bytes())
        .map_err(|e| LedgerError::Storage(format!("Failed to write data: {}", e)))?;
    writer
        .flush()
        .map_err(|e| LedgerError::Storage(format!("Failed to flush data: {}", e)))?;

    // Sync to disk before rename
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| LedgerError::Storage(format!("Failed to sync data: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        LedgerError::Storage(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_nonexistent_returns_none() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.dat");

        assert!(read_text_optional(&path).unwrap().is_none());
    }

    #[test]
    fn test_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("slot.dat");

        write_text_atomic(&path, "opaque payload").unwrap();
        assert_eq!(
            read_text_optional(&path).unwrap().as_deref(),
            Some("opaque payload")
        );
    }

    #[test]
    fn test_overwrite_replaces_whole_value() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("slot.dat");

        write_text_atomic(&path, "a much longer first value").unwrap();
        write_text_atomic(&path, "short").unwrap();

        assert_eq!(read_text_optional(&path).unwrap().as_deref(), Some("short"));
    }

    #[test]
    fn test_atomic_write_no_temp_file_left() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("slot.dat");
        let temp_path = temp_dir.path().join("slot.tmp");

        write_text_atomic(&path, "payload").unwrap();

        assert!(path.exists());
        assert!(!temp_path.exists());
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("slot.dat");

        write_text_atomic(&path, "payload").unwrap();
        assert!(path.exists());
    }
}
