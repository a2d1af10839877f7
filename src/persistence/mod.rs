//! Save/load persistence
//!
//! Features:
//! - Versioned JSON envelope
//! - Atomic replace (write tmp, then rename over the target)
//! - Missing file is not an error; it loads as `None`

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Current envelope format version
pub const FORMAT_VERSION: u32 = 1;

/// Errors crossing the persistence boundary
#[derive(Debug)]
pub enum PersistError {
    Io(io::Error),
    Format(serde_json::Error),
    /// File was written by a newer or unknown format
    Version { found: u32, expected: u32 },
}

impl fmt::Display for PersistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistError::Io(e) => write!(f, "I/O error: {e}"),
            PersistError::Format(e) => write!(f, "malformed save data: {e}"),
            PersistError::Version { found, expected } => {
                write!(f, "unsupported save version {found} (expected {expected})")
            }
        }
    }
}

impl std::error::Error for PersistError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PersistError::Io(e) => Some(e),
            PersistError::Format(e) => Some(e),
            PersistError::Version { .. } => None,
        }
    }
}

impl From<io::Error> for PersistError {
    fn from(e: io::Error) -> Self {
        PersistError::Io(e)
    }
}

impl From<serde_json::Error> for PersistError {
    fn from(e: serde_json::Error) -> Self {
        PersistError::Format(e)
    }
}

/// Versioned wrapper around any saved payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub version: u32,
    pub payload: T,
}

impl<T> Envelope<T> {
    pub fn new(payload: T) -> Self {
        Self {
            version: FORMAT_VERSION,
            payload,
        }
    }
}

/// Load an enveloped value, `Ok(None)` if the file does not exist
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, PersistError> {
    let json = match fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let envelope: Envelope<T> = serde_json::from_str(&json)?;
    if envelope.version != FORMAT_VERSION {
        return Err(PersistError::Version {
            found: envelope.version,
            expected: FORMAT_VERSION,
        });
    }
    Ok(Some(envelope.payload))
}

/// Save a value inside an envelope, replacing the target atomically
pub fn save_json<T: Serialize>(path: &Path, value: &T) -> Result<(), PersistError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(&Envelope::new(value))?;
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    log::debug!("saved {}", path.display());
    Ok(())
}

#[cfg(test)]
pub(crate) fn scratch_path(name: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("star-siege-test-{}", std::process::id()));
    let _ = fs::create_dir_all(&dir);
    dir.join(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        score: u64,
        name: String,
    }

    #[test]
    fn test_missing_file_is_none() {
        let path = scratch_path("does-not-exist.json");
        let _ = fs::remove_file(&path);
        let loaded: Option<Sample> = load_json(&path).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_save_then_load() {
        let path = scratch_path("sample.json");
        let sample = Sample {
            score: 4200,
            name: "ace".into(),
        };
        save_json(&path, &sample).unwrap();
        assert!(!path.with_extension("tmp").exists());
        let loaded: Option<Sample> = load_json(&path).unwrap();
        assert_eq!(loaded, Some(sample));
    }

    #[test]
    fn test_corrupt_file_is_format_error() {
        let path = scratch_path("corrupt.json");
        fs::write(&path, "{ not json").unwrap();
        let err = load_json::<Sample>(&path).unwrap_err();
        assert!(matches!(err, PersistError::Format(_)));
    }

    #[test]
    fn test_future_version_rejected() {
        let path = scratch_path("future.json");
        fs::write(&path, r#"{"version": 99, "payload": {"score": 1, "name": "x"}}"#).unwrap();
        let err = load_json::<Sample>(&path).unwrap_err();
        assert!(matches!(
            err,
            PersistError::Version {
                found: 99,
                expected: FORMAT_VERSION
            }
        ));
        assert!(err.to_string().contains("99"));
    }
}
