//! Terminology entries and standard-form derivation.

use chrono::{DateTime, Utc};
use indexmap::IndexSet;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static NON_WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s]").expect("valid non-word regex"));

static UNDERSCORE_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"_+").expect("valid underscore-run regex"));

/// Where a terminology entry came from. Only custom entries may be updated
/// or deleted at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TermSource {
    /// Loaded from the delimited terminology source file
    Tabular,
    /// Part of the built-in default vocabulary
    Builtin,
    /// Added explicitly through the store API
    Custom,
}

/// A canonical vocabulary fact: one term, one standard identifier form, and
/// the aliases that resolve to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermEntry {
    /// Canonical term key (often equal to the standard form)
    pub term: String,
    /// The identifier string suggestions are rendered as; never empty
    pub standard_form: String,
    /// Human-readable description
    pub description: String,
    /// Synonyms, abbreviations, and localized forms that resolve here
    pub related_terms: IndexSet<String>,
    /// Provenance; gates mutation
    pub source: TermSource,
    /// Set for custom entries at add time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub added_at: Option<DateTime<Utc>>,
    /// Set for custom entries whenever they are updated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
}

impl TermEntry {
    /// Build an entry with normalized (lowercased, deduplicated) aliases.
    pub fn new(
        term: impl Into<String>,
        standard_form: impl Into<String>,
        description: impl Into<String>,
        related_terms: impl IntoIterator<Item = String>,
        source: TermSource,
    ) -> Self {
        let standard_form = standard_form.into();
        let related_terms = related_terms
            .into_iter()
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty() && *t != standard_form)
            .collect();

        Self {
            term: term.into(),
            standard_form,
            description: description.into(),
            related_terms,
            source,
            added_at: None,
            modified_at: None,
        }
    }

    /// All lookup keys this entry is reachable under, lowercased.
    pub fn alias_keys(&self) -> Vec<String> {
        let mut keys = vec![self.term.to_lowercase(), self.standard_form.to_lowercase()];
        keys.extend(self.related_terms.iter().cloned());
        keys.sort();
        keys.dedup();
        keys
    }
}

/// Derive a standard identifier form from a canonical name and an optional
/// abbreviation.
///
/// The abbreviation wins when it is at least two characters of alphanumerics,
/// underscores, or hyphens (lowercased, hyphens folded to underscores).
/// Otherwise the canonical name is lowercased, stripped of punctuation,
/// space-joined with underscores, and collapsed. Returns `None` when neither
/// path yields a form of length >= 2.
pub fn derive_standard_form(canonical_name: &str, abbreviation: &str) -> Option<String> {
    let abbreviation = abbreviation.trim();
    if abbreviation.len() >= 2
        && abbreviation
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
    {
        let form = abbreviation.to_lowercase().replace('-', "_");
        if form.len() >= 2 {
            return Some(form);
        }
    }

    let canonical_name = canonical_name.trim();
    if canonical_name.len() > 2 {
        let lowered = canonical_name.to_lowercase();
        let stripped = NON_WORD_RE.replace_all(&lowered, "");
        let underscored = stripped.replace(' ', "_");
        let collapsed = UNDERSCORE_RUN_RE.replace_all(&underscored, "_");
        let form = collapsed.trim_matches('_').to_string();
        if form.len() >= 2 {
            return Some(form);
        }
    }

    None
}

/// Generate alias variations of a canonical name and abbreviation, excluding
/// the standard form itself.
pub fn generate_related_terms(
    canonical_name: &str,
    abbreviation: &str,
    standard_form: &str,
) -> Vec<String> {
    let mut related = Vec::new();

    let abbrev = abbreviation.trim().to_lowercase();
    if abbrev.len() >= 2 && abbrev != standard_form {
        related.push(abbrev);
    }

    let lowered = canonical_name.trim().to_lowercase();
    if !lowered.is_empty() {
        let variations = [
            lowered.replace(' ', "_"),
            lowered.replace(' ', ""),
            lowered.replace(' ', "-"),
        ];
        for variation in variations {
            if variation != standard_form && variation.len() > 2 && !related.contains(&variation) {
                related.push(variation);
            }
        }
    }

    related
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_prefers_valid_abbreviation() {
        assert_eq!(
            derive_standard_form("User Identifier", "usr-id"),
            Some("usr_id".to_string())
        );
    }

    #[test]
    fn test_derive_falls_back_to_canonical_name() {
        assert_eq!(
            derive_standard_form("User  Account Name!", ""),
            Some("user_account_name".to_string())
        );
    }

    #[test]
    fn test_derive_rejects_short_results() {
        assert_eq!(derive_standard_form("ab", ""), None);
        assert_eq!(derive_standard_form("", "x"), None);
    }

    #[test]
    fn test_derive_rejects_punctuation_abbreviation() {
        // An abbreviation with punctuation is ignored, the name path wins.
        assert_eq!(
            derive_standard_form("Error Message", "e.m"),
            Some("error_message".to_string())
        );
    }

    #[test]
    fn test_derive_is_idempotent() {
        let first = derive_standard_form("User Account Name", "").unwrap();
        let second = derive_standard_form(&first, "").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_generate_related_terms() {
        let related = generate_related_terms("User Name", "unm", "username");
        assert!(related.contains(&"unm".to_string()));
        assert!(related.contains(&"user_name".to_string()));
        assert!(related.contains(&"user-name".to_string()));
        assert!(!related.contains(&"username".to_string()));
    }

    #[test]
    fn test_alias_keys_are_lowercased_and_deduplicated() {
        let entry = TermEntry::new(
            "user",
            "user",
            "System user",
            vec!["USR".to_string(), "usr".to_string(), "customer".to_string()],
            TermSource::Builtin,
        );

        let keys = entry.alias_keys();
        assert_eq!(keys.iter().filter(|k| *k == "usr").count(), 1);
        assert!(keys.contains(&"user".to_string()));
        assert!(keys.contains(&"customer".to_string()));
    }
}
