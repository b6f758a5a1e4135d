//! Tabular terminology source loading.
//!
//! The source is a delimited file whose first three columns are localized
//! name, canonical name, and abbreviation. There is no declared header and
//! no declared encoding: header-looking rows are skipped by exact label
//! match, and the bytes are decoded under an ordered list of candidate
//! encodings, the first one producing at least one valid row winning. When
//! nothing parses, the caller falls back to the built-in vocabulary.

use std::path::Path;

use csv::ReaderBuilder;
use tracing::{debug, info, warn};

use crate::core::file_utils::FileReader;
use crate::dictionary::entry::{
    derive_standard_form, generate_related_terms, TermEntry, TermSource,
};
use crate::dictionary::store::TerminologyStore;

/// Exact labels that mark a row as a header rather than data.
const LOCALIZED_HEADER_LABELS: &[&str] = &["한글명", "Korean", "KOR"];
const CANONICAL_HEADER_LABELS: &[&str] = &["영문명", "English", "ENG"];

/// Load a terminology store from a tabular source file.
///
/// Falls back to the built-in vocabulary when the file is absent, cannot be
/// decoded under any candidate encoding, or contains no valid rows. This
/// function never fails; the worst outcome is the default vocabulary.
pub fn load_or_builtin(path: &Path) -> TerminologyStore {
    match try_load(path) {
        Some(store) => {
            info!("loaded {} terms from {}", store.len(), path.display());
            store
        }
        None => {
            warn!(
                "could not load terminology source {}, using builtin vocabulary",
                path.display()
            );
            TerminologyStore::with_builtin_vocabulary()
        }
    }
}

fn try_load(path: &Path) -> Option<TerminologyStore> {
    let bytes = FileReader::read_bytes(path).ok()?;

    for (encoding, text) in FileReader::decode_candidates(&bytes) {
        let store = parse_rows(&text);
        if !store.is_empty() {
            debug!(
                "terminology source decoded as {} ({} terms)",
                encoding,
                store.len()
            );
            return Some(store);
        }
    }
    None
}

/// Parse decoded terminology text into a store. Malformed rows are skipped,
/// never fatal.
pub fn parse_rows(text: &str) -> TerminologyStore {
    let mut store = TerminologyStore::new();
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    for record in reader.records() {
        let record = match record {
            Ok(record) => record,
            Err(err) => {
                debug!("skipping malformed row: {err}");
                continue;
            }
        };

        if record.len() < 3 {
            continue;
        }

        let localized = record.get(0).unwrap_or("").trim();
        let canonical = record.get(1).unwrap_or("").trim();
        let abbreviation = record.get(2).unwrap_or("").trim();

        if localized.is_empty() && canonical.is_empty() {
            continue;
        }
        if LOCALIZED_HEADER_LABELS.contains(&localized)
            || CANONICAL_HEADER_LABELS.contains(&canonical)
        {
            continue;
        }
        if canonical.len() <= 2 {
            continue;
        }

        let standard_form = match derive_standard_form(canonical, abbreviation) {
            Some(form) => form,
            None => continue,
        };

        let mut related = generate_related_terms(canonical, abbreviation, &standard_form);
        let localized_key = localized.to_lowercase();
        if !localized_key.is_empty() && localized_key != standard_form {
            related.push(localized_key);
        }

        let description = if localized.is_empty() {
            canonical.to_string()
        } else {
            format!("{localized} ({canonical})")
        };

        store.insert_entry(TermEntry::new(
            standard_form.clone(),
            standard_form,
            description,
            related,
            TermSource::Tabular,
        ));
    }

    store
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_basic_rows() {
        let text = "사용자,User,usr\n비밀번호,Password,pwd\n";
        let store = parse_rows(text);

        assert_eq!(store.len(), 2);
        let entry = store.lookup("usr").unwrap();
        assert_eq!(entry.standard_form, "usr");
        assert_eq!(entry.source, TermSource::Tabular);
        // Localized name resolves to the same entry.
        assert_eq!(store.lookup("사용자").unwrap().standard_form, "usr");
    }

    #[test]
    fn test_parse_derives_from_canonical_when_abbreviation_missing() {
        let text = "오류 메시지,Error Message,\n";
        let store = parse_rows(text);

        let entry = store.lookup("error_message").unwrap();
        assert_eq!(entry.standard_form, "error_message");
        assert!(entry.related_terms.contains("errormessage"));
    }

    #[test]
    fn test_parse_skips_header_rows() {
        let text = "한글명,영문명,약어\n사용자,User Name,unm\n";
        let store = parse_rows(text);

        assert_eq!(store.len(), 1);
        assert!(store.lookup("unm").is_some());
    }

    #[test]
    fn test_parse_skips_invalid_rows() {
        let text = ",,\nshort,ab,\n좋은,Valid Term,vt\nonly_two,cols\n";
        let store = parse_rows(text);

        assert_eq!(store.len(), 1);
        assert!(store.lookup("vt").is_some());
    }

    #[test]
    fn test_load_or_builtin_missing_file() {
        let store = load_or_builtin(Path::new("/nonexistent/terms.csv"));
        // Builtin fallback resolves the pwd alias.
        assert_eq!(store.lookup("pwd").unwrap().standard_form, "password");
    }

    #[test]
    fn test_load_or_builtin_header_only_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "한글명,영문명,약어").unwrap();

        let store = load_or_builtin(file.path());
        assert!(store.lookup("pwd").is_some());
        assert!(store.entries().all(|e| e.source == TermSource::Builtin));
    }

    #[test]
    fn test_load_or_builtin_euc_kr_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let (bytes, _, _) = encoding_rs::EUC_KR.encode("사용자,User Identifier,uid\n");
        file.write_all(&bytes).unwrap();

        let store = load_or_builtin(file.path());
        assert_eq!(store.lookup("사용자").unwrap().standard_form, "uid");
    }

    #[test]
    fn test_load_or_builtin_utf8_bom_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0xEF, 0xBB, 0xBF]).unwrap();
        write!(file, "상태,Status Code,sc\n").unwrap();

        let store = load_or_builtin(file.path());
        assert_eq!(store.lookup("상태").unwrap().standard_form, "sc");
    }
}
