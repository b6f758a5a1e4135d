//! Custom-term persistence.
//!
//! Custom terms added at runtime survive restarts through a small versioned
//! JSON envelope. Only [`TermSource::Custom`] entries round-trip; tabular and
//! builtin entries are reconstructed from their own sources on every load.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::errors::{Result, TermlintError};
use crate::dictionary::entry::{TermEntry, TermSource};
use crate::dictionary::store::TerminologyStore;

const ENVELOPE_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct CustomTermsFile {
    version: u32,
    saved_at: DateTime<Utc>,
    terms: Vec<TermEntry>,
}

/// Write the store's custom entries to `path`. Returns how many were saved.
pub fn save_custom_terms(store: &TerminologyStore, path: &Path) -> Result<usize> {
    let terms: Vec<TermEntry> = store
        .entries()
        .filter(|entry| entry.source == TermSource::Custom)
        .cloned()
        .collect();

    let envelope = CustomTermsFile {
        version: ENVELOPE_VERSION,
        saved_at: Utc::now(),
        terms,
    };

    let json = serde_json::to_string_pretty(&envelope)?;
    std::fs::write(path, json).map_err(|e| {
        TermlintError::io(
            format!("Failed to write custom terms file: {}", path.display()),
            e,
        )
    })?;

    debug!("saved {} custom terms to {}", envelope.terms.len(), path.display());
    Ok(envelope.terms.len())
}

/// Load custom entries from `path` into the store. Returns how many were
/// merged. Non-custom records in the file are ignored.
pub fn load_custom_terms_into(store: &mut TerminologyStore, path: &Path) -> Result<usize> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        TermlintError::io(
            format!("Failed to read custom terms file: {}", path.display()),
            e,
        )
    })?;

    let envelope: CustomTermsFile = serde_json::from_str(&content).map_err(|e| {
        TermlintError::dictionary_with_path(
            format!("invalid custom terms file: {e}"),
            path.display().to_string(),
        )
    })?;

    if envelope.version != ENVELOPE_VERSION {
        warn!(
            "custom terms file {} has version {}, expected {}",
            path.display(),
            envelope.version,
            ENVELOPE_VERSION
        );
    }

    let mut merged = 0;
    for entry in envelope.terms {
        if entry.source != TermSource::Custom {
            warn!("skipping non-custom record in custom terms file: {}", entry.term);
            continue;
        }
        store.insert_entry(entry);
        merged += 1;
    }
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_custom_entries_only() {
        let mut store = TerminologyStore::with_builtin_vocabulary();
        assert!(store.add("Session Key", "", "encryption key", &[]));
        assert!(store.add("Retry Budget", "rb", "", &[]));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom_terms.json");
        let saved = save_custom_terms(&store, &path).unwrap();
        assert_eq!(saved, 2);

        let mut restored = TerminologyStore::with_builtin_vocabulary();
        let merged = load_custom_terms_into(&mut restored, &path).unwrap();
        assert_eq!(merged, 2);

        let entry = restored.lookup("session_key").unwrap();
        assert_eq!(entry.source, TermSource::Custom);
        assert!(entry.added_at.is_some());
        assert!(restored.lookup("rb").is_some());
    }

    #[test]
    fn test_save_without_custom_entries() {
        let store = TerminologyStore::with_builtin_vocabulary();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom_terms.json");

        assert_eq!(save_custom_terms(&store, &path).unwrap(), 0);

        let mut restored = TerminologyStore::new();
        assert_eq!(load_custom_terms_into(&mut restored, &path).unwrap(), 0);
        assert!(restored.is_empty());
    }

    #[test]
    fn test_load_rejects_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{not json").unwrap();

        let mut store = TerminologyStore::new();
        let err = load_custom_terms_into(&mut store, &path).unwrap_err();
        assert!(matches!(err, TermlintError::Dictionary { .. }));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let mut store = TerminologyStore::new();
        let err =
            load_custom_terms_into(&mut store, Path::new("/nonexistent/custom.json")).unwrap_err();
        assert!(matches!(err, TermlintError::Io { .. }));
    }
}
