//! Settings Persistence
//!
//! Reads and writes the binary settings file: a single bincode blob holding
//! the whole [`StoredMap`], nested stores flattened into nested maps. There is
//! no header or version field; compatibility across releases is handled by
//! calling `establish_defaults` after loading.

use crate::error::{SettingsError, SettingsResult};
use crate::value::StoredMap;
use bincode::Options;
use std::fs;
use std::path::Path;

fn options() -> impl Options {
    bincode::DefaultOptions::new()
}

/// Encode entries to bytes
pub fn encode(entries: &StoredMap) -> SettingsResult<Vec<u8>> {
    options()
        .serialize(entries)
        .map_err(|e| SettingsError::Serialize(e.to_string()))
}

/// Decode bytes produced by [`encode`]
///
/// Trailing bytes are rejected and reads never go past the input length,
/// so truncated or corrupt files fail instead of allocating.
pub fn decode(bytes: &[u8]) -> Result<StoredMap, bincode::Error> {
    options()
        .with_limit(bytes.len() as u64)
        .deserialize(bytes)
}

/// Read the entries stored at `path`
///
/// Both I/O and decoding failures are reported as
/// [`SettingsError::Deserialize`].
pub fn read_entries(path: &Path) -> SettingsResult<StoredMap> {
    let deserialize_error = |reason: String| SettingsError::Deserialize {
        path: path.to_path_buf(),
        reason,
    };
    let bytes = fs::read(path).map_err(|e| deserialize_error(e.to_string()))?;
    let entries = decode(&bytes).map_err(|e| deserialize_error(e.to_string()))?;
    tracing::debug!(path = %path.display(), count = entries.len(), "read settings file");
    Ok(entries)
}

/// Write `entries` to `path`, replacing the file and creating missing
/// parent directories
pub fn write_entries(path: &Path, entries: &StoredMap) -> SettingsResult<()> {
    let bytes = encode(entries)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, bytes)?;
    tracing::debug!(path = %path.display(), count = entries.len(), "wrote settings file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::StoredValue;

    fn sample() -> StoredMap {
        let mut inner = StoredMap::new();
        inner.insert("line_width".to_string(), StoredValue::Float(0.25));

        let mut entries = StoredMap::new();
        entries.insert("count".to_string(), StoredValue::Int(-7));
        entries.insert("name".to_string(), StoredValue::Text("camera".to_string()));
        entries.insert("origin".to_string(), StoredValue::Vector([1.0, 2.0, 3.0]));
        entries.insert("enabled".to_string(), StoredValue::Bool(true));
        entries.insert("inner".to_string(), StoredValue::Map(inner));
        entries
    }

    #[test]
    fn test_encode_decode() {
        let entries = sample();
        let bytes = encode(&entries).unwrap();
        assert_eq!(decode(&bytes).unwrap(), entries);
    }

    #[test]
    fn test_decode_rejects_truncated_input() {
        let bytes = encode(&sample()).unwrap();
        assert!(decode(&bytes[..bytes.len() - 1]).is_err());
        assert!(decode(&[]).is_err());
    }

    #[test]
    fn test_decode_rejects_trailing_bytes() {
        let mut bytes = encode(&sample()).unwrap();
        bytes.push(0);
        assert!(decode(&bytes).is_err());
    }

    #[test]
    fn test_read_missing_file_is_deserialize_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_entries(&dir.path().join("absent.bin")).unwrap_err();
        assert!(matches!(err, SettingsError::Deserialize { .. }));
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a").join("b").join("settings.bin");
        write_entries(&path, &sample()).unwrap();
        assert_eq!(read_entries(&path).unwrap(), sample());
    }
}
