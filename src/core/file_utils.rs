//! File reading utilities with legacy-encoding support.
//!
//! Terminology source files in the wild are not reliably UTF-8: exports from
//! spreadsheet tools frequently arrive as UTF-8 with a BOM or in the CP949 /
//! EUC-KR family. The reader tries a fixed, ordered list of candidate
//! encodings and hands back every successful decode so the caller can pick
//! the first one that actually parses.

use std::fs;
use std::path::Path;

use encoding_rs::{Encoding, EUC_KR, UTF_8};
use tracing::debug;

use crate::core::errors::{Result, TermlintError};

/// Ordered candidate encodings for terminology sources.
///
/// UTF-8 with BOM is handled as its own candidate so that BOM bytes never
/// leak into the first column of the first row.
const ENCODING_CANDIDATES: &[(&str, &'static Encoding)] = &[
    ("utf-8-sig", UTF_8),
    ("utf-8", UTF_8),
    ("euc-kr", EUC_KR),
];

/// File reading helpers for dictionary sources.
pub struct FileReader;

impl FileReader {
    /// Read raw bytes, mapping failures to termlint errors.
    pub fn read_bytes(path: &Path) -> Result<Vec<u8>> {
        fs::read(path)
            .map_err(|e| TermlintError::io(format!("Failed to read {}", path.display()), e))
    }

    /// Decode bytes under each candidate encoding, in order.
    ///
    /// Returns one `(encoding_name, text)` pair per candidate that decodes
    /// without errors. A candidate that cannot represent the bytes is
    /// silently skipped; an empty result means no candidate fit.
    pub fn decode_candidates(bytes: &[u8]) -> Vec<(&'static str, String)> {
        let mut decoded = Vec::new();

        for (name, encoding) in ENCODING_CANDIDATES {
            let input = if *name == "utf-8-sig" {
                match bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]) {
                    Some(stripped) => stripped,
                    // No BOM present, let the plain utf-8 candidate handle it.
                    None => continue,
                }
            } else {
                bytes
            };

            let (text, _, had_errors) = encoding.decode(input);
            if had_errors {
                debug!("encoding candidate {} rejected", name);
                continue;
            }
            decoded.push((*name, text.into_owned()));
        }

        decoded
    }

    /// Read a file and return the first clean decode from the candidate list.
    pub fn read_with_encoding_fallback(path: &Path) -> Result<String> {
        let bytes = Self::read_bytes(path)?;
        Self::decode_candidates(&bytes)
            .into_iter()
            .next()
            .map(|(_, text)| text)
            .ok_or_else(|| {
                TermlintError::dictionary_with_path(
                    "no candidate encoding could decode the file",
                    path.display().to_string(),
                )
            })
    }
}
