//! Rule-chain name analysis.
//!
//! Each identifier runs through a fixed priority chain and gets at most one
//! suggestion back: mixed-language rewrite, then abbreviation expansion, then
//! dictionary mismatch, then convention mismatch. Every rule that would
//! suggest the identifier unchanged falls through to the next rule, so a
//! returned suggestion always differs from the original name.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::convention::{split_parts, Convention};
use crate::dictionary::store::TerminologyStore;

/// Why a suggestion was made. Closed set; display text lives in
/// [`ReasonCode::label`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasonCode {
    /// The identifier resolves to a dictionary term with a different
    /// standard form.
    DictionaryMismatch,
    /// The identifier is built from abbreviations the expansion of which is
    /// a known term.
    MeaninglessAbbreviation,
    /// The identifier mixes a non-Latin script with Latin letters.
    MixedLanguage,
    /// The identifier does not match the target naming convention.
    ConventionMismatch,
}

impl ReasonCode {
    /// Human-readable reason text.
    pub fn label(self) -> &'static str {
        match self {
            ReasonCode::DictionaryMismatch => "does not match the standard terminology",
            ReasonCode::MeaninglessAbbreviation => "uses an unclear abbreviation",
            ReasonCode::MixedLanguage => "mixes languages in one name",
            ReasonCode::ConventionMismatch => "does not follow the naming convention",
        }
    }
}

/// One proposed rename for a single identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub original: String,
    pub suggested: String,
    pub reason_code: ReasonCode,
    /// The dictionary term (or rule description) backing the suggestion.
    pub evidence_term: String,
    /// Fixed per-rule confidence, always within [0, 1].
    pub confidence: f64,
}

/// Fixed table of common English abbreviations the expansion rule knows
/// about, independent of the terminology store.
pub(crate) const COMMON_ABBREVIATIONS: &[(&str, &str)] = &[
    ("usr", "user"),
    ("pwd", "password"),
    ("msg", "message"),
    ("err", "error"),
    ("res", "result"),
    ("req", "request"),
    ("resp", "response"),
    ("cfg", "config"),
    ("cnt", "count"),
    ("amt", "amount"),
    ("obj", "object"),
    ("lst", "list"),
    ("num", "number"),
    ("temp", "temporary"),
    ("val", "value"),
    ("idx", "index"),
    ("btn", "button"),
    ("img", "image"),
    ("src", "source"),
    ("dest", "destination"),
    ("dir", "directory"),
    ("db", "database"),
];

static NON_LATIN_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\x00-\x7F]+").expect("valid non-latin run regex"));

/// Rule-chain analyzer over a terminology store.
pub struct NameAnalyzer<'a> {
    store: &'a TerminologyStore,
}

impl<'a> NameAnalyzer<'a> {
    pub fn new(store: &'a TerminologyStore) -> Self {
        Self { store }
    }

    /// Analyze one identifier against the target convention. Returns `None`
    /// when no rule applies or every applicable rule would be a no-op.
    pub fn analyze(&self, identifier: &str, convention: Convention) -> Option<Suggestion> {
        self.mixed_language_rewrite(identifier, convention)
            .or_else(|| self.expand_abbreviation(identifier, convention))
            .or_else(|| self.dictionary_mismatch(identifier, convention))
            .or_else(|| Self::convention_mismatch(identifier, convention))
    }

    /// Rule 1: replace each non-Latin run that the store can resolve with its
    /// standard form, then apply the convention to the rewritten name.
    fn mixed_language_rewrite(&self, identifier: &str, convention: Convention) -> Option<Suggestion> {
        if !has_mixed_scripts(identifier) {
            return None;
        }

        let mut substituted = false;
        let rewritten = NON_LATIN_RUN_RE.replace_all(identifier, |captures: &regex::Captures| {
            let run = &captures[0];
            match self.rewrite_run(run) {
                Some(replacement) => {
                    substituted = true;
                    replacement
                }
                None => run.to_string(),
            }
        });

        if !substituted {
            debug!("mixed-script identifier with no resolvable run: {identifier}");
            return None;
        }

        let suggested = convention.apply(&rewritten);
        if suggested == identifier {
            return None;
        }

        Some(Suggestion {
            original: identifier.to_string(),
            suggested,
            reason_code: ReasonCode::MixedLanguage,
            evidence_term: "standard vocabulary".to_string(),
            confidence: 0.9,
        })
    }

    /// Rewrite one non-Latin run by greedy longest-prefix lookup against the
    /// store, concatenating standard forms with unresolved characters kept
    /// in place. A compound run like a two-word localized name rewrites even
    /// though the run as a whole is not a dictionary key. Returns `None`
    /// when nothing in the run resolves.
    fn rewrite_run(&self, run: &str) -> Option<String> {
        let chars: Vec<char> = run.chars().collect();
        let mut out = String::new();
        let mut replaced = false;
        let mut i = 0;

        while i < chars.len() {
            let mut advance = None;
            for j in (i + 1..=chars.len()).rev() {
                let candidate: String = chars[i..j].iter().collect();
                if let Some(entry) = self.store.lookup(&candidate) {
                    advance = Some((entry.standard_form.clone(), j));
                    break;
                }
            }
            match advance {
                Some((form, j)) => {
                    out.push_str(&form);
                    replaced = true;
                    i = j;
                }
                None => {
                    out.push(chars[i]);
                    i += 1;
                }
            }
        }

        replaced.then_some(out)
    }

    /// Rule 2: expand abbreviated word parts and rejoin with underscores;
    /// when the rejoined name differs and resolves to a known term, suggest
    /// that term's standard form.
    ///
    /// The rejoin alone can make the name differ (camelCase input), which is
    /// intentional: it lets snake-keyed dictionary terms catch their
    /// camelCase spellings here.
    fn expand_abbreviation(&self, identifier: &str, convention: Convention) -> Option<Suggestion> {
        let expanded = expand_parts(identifier);
        if expanded == identifier {
            return None;
        }
        let entry = self.store.resolve(&expanded)?;
        let suggested = convention.apply(&entry.standard_form);
        if suggested == identifier {
            return None;
        }

        Some(Suggestion {
            original: identifier.to_string(),
            suggested,
            reason_code: ReasonCode::MeaninglessAbbreviation,
            evidence_term: entry.term.clone(),
            confidence: 0.85,
        })
    }

    /// Rule 3: the raw identifier is itself a dictionary key whose standard
    /// form differs.
    fn dictionary_mismatch(&self, identifier: &str, convention: Convention) -> Option<Suggestion> {
        let entry = self.store.lookup(identifier)?;
        if entry.standard_form == identifier {
            return None;
        }

        let suggested = convention.apply(&entry.standard_form);
        if suggested == identifier {
            return None;
        }

        Some(Suggestion {
            original: identifier.to_string(),
            suggested,
            reason_code: ReasonCode::DictionaryMismatch,
            evidence_term: entry.term.clone(),
            confidence: 0.95,
        })
    }

    /// Rule 4: reformat identifiers that fail the target convention check.
    fn convention_mismatch(identifier: &str, convention: Convention) -> Option<Suggestion> {
        if convention.matches(identifier) {
            return None;
        }

        let suggested = convention.apply(identifier);
        if suggested == identifier {
            return None;
        }

        Some(Suggestion {
            original: identifier.to_string(),
            suggested,
            reason_code: ReasonCode::ConventionMismatch,
            evidence_term: "naming convention".to_string(),
            confidence: 0.8,
        })
    }
}

/// Whether a name contains both a non-ASCII codepoint and a Latin letter.
fn has_mixed_scripts(identifier: &str) -> bool {
    let has_non_latin = identifier.chars().any(|c| !c.is_ascii());
    let has_latin = identifier.chars().any(|c| c.is_ascii_alphabetic());
    has_non_latin && has_latin
}

/// Expand abbreviated word parts and rejoin with underscores. Parts with no
/// table entry pass through unchanged, so the result equals the input only
/// when the name was already a single underscore-joined spelling of itself.
pub(crate) fn expand_parts(identifier: &str) -> String {
    split_parts(identifier)
        .iter()
        .map(|part| {
            let lower = part.to_lowercase();
            match COMMON_ABBREVIATIONS.iter().find(|(abbr, _)| *abbr == lower) {
                Some((_, full)) => (*full).to_string(),
                None => part.clone(),
            }
        })
        .collect::<Vec<_>>()
        .join("_")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer_fixture() -> TerminologyStore {
        TerminologyStore::with_builtin_vocabulary()
    }

    #[test]
    fn test_abbreviation_expansion_hits_dictionary() {
        let store = analyzer_fixture();
        let analyzer = NameAnalyzer::new(&store);

        let suggestion = analyzer.analyze("usr_id", Convention::Snake).unwrap();
        assert_eq!(suggestion.suggested, "user_id");
        assert_eq!(suggestion.reason_code, ReasonCode::MeaninglessAbbreviation);
        assert!((suggestion.confidence - 0.85).abs() < f64::EPSILON);
    }

    #[test]
    fn test_dictionary_mismatch_on_direct_alias() {
        let store = analyzer_fixture();
        let analyzer = NameAnalyzer::new(&store);

        // "passwd" is an alias of password and not itself an abbreviation
        // table entry, so the dictionary rule fires.
        let suggestion = analyzer.analyze("passwd", Convention::Snake).unwrap();
        assert_eq!(suggestion.suggested, "password");
        assert_eq!(suggestion.reason_code, ReasonCode::DictionaryMismatch);
        assert!((suggestion.confidence - 0.95).abs() < f64::EPSILON);
    }

    #[test]
    fn test_convention_mismatch_for_unknown_identifier() {
        let store = analyzer_fixture();
        let analyzer = NameAnalyzer::new(&store);

        let suggestion = analyzer.analyze("myCustomThing", Convention::Snake).unwrap();
        assert_eq!(suggestion.suggested, "my_custom_thing");
        assert_eq!(suggestion.reason_code, ReasonCode::ConventionMismatch);
        assert!((suggestion.confidence - 0.8).abs() < f64::EPSILON);
    }

    #[test]
    fn test_mixed_language_rewrite_via_store() {
        let store = analyzer_fixture();
        let analyzer = NameAnalyzer::new(&store);

        // "사용자" is a builtin alias for user.
        let suggestion = analyzer.analyze("사용자_id", Convention::Snake).unwrap();
        assert_eq!(suggestion.suggested, "user_id");
        assert_eq!(suggestion.reason_code, ReasonCode::MixedLanguage);
        assert!((suggestion.confidence - 0.9).abs() < f64::EPSILON);
    }

    #[test]
    fn test_mixed_language_without_resolvable_run_falls_through() {
        let store = analyzer_fixture();
        let analyzer = NameAnalyzer::new(&store);

        // Nothing in the non-Latin run resolves, so rule 1 skips; the
        // convention rule still applies.
        let suggestion = analyzer.analyze("벚꽃Widget", Convention::Snake);
        assert_eq!(
            suggestion.map(|s| s.reason_code),
            Some(ReasonCode::ConventionMismatch)
        );
    }

    #[test]
    fn test_mixed_language_compound_run_decomposes() {
        let store = analyzer_fixture();
        let analyzer = NameAnalyzer::new(&store);

        // "사용자이름" is not a key itself, but its two words are: the run
        // rewrites piecewise to "user" + "name".
        let suggestion = analyzer.analyze("사용자이름_id", Convention::Snake).unwrap();
        assert_eq!(suggestion.reason_code, ReasonCode::MixedLanguage);
        assert_eq!(suggestion.suggested, "username_id");
        assert!((suggestion.confidence - 0.9).abs() < f64::EPSILON);
    }

    #[test]
    fn test_camel_alias_caught_by_abbreviation_rule() {
        let store = analyzer_fixture();
        let analyzer = NameAnalyzer::new(&store);

        // The rejoin alone turns "userName" into "user_Name", which resolves
        // to the username entry; the abbreviation rule fires before the
        // dictionary rule ever runs.
        let suggestion = analyzer.analyze("userName", Convention::Snake).unwrap();
        assert_eq!(suggestion.reason_code, ReasonCode::MeaninglessAbbreviation);
        assert_eq!(suggestion.suggested, "username");
        assert!((suggestion.confidence - 0.85).abs() < f64::EPSILON);
    }

    #[test]
    fn test_priority_abbreviation_beats_convention() {
        let store = analyzer_fixture();
        let analyzer = NameAnalyzer::new(&store);

        // usrId violates snake_case AND contains an abbreviation; the
        // higher-priority abbreviation rule wins.
        let suggestion = analyzer.analyze("usrId", Convention::Snake).unwrap();
        assert_eq!(suggestion.reason_code, ReasonCode::MeaninglessAbbreviation);
        assert_eq!(suggestion.suggested, "user_id");
    }

    #[test]
    fn test_conforming_identifier_yields_nothing() {
        let store = analyzer_fixture();
        let analyzer = NameAnalyzer::new(&store);

        assert!(analyzer.analyze("total_price", Convention::Snake).is_none());
    }

    #[test]
    fn test_compound_name_is_not_collapsed_onto_a_part() {
        let store = analyzer_fixture();
        let analyzer = NameAnalyzer::new(&store);

        // "error_details" is not a dictionary key and already conforms;
        // the dictionary rule must not shrink it to "error" via its part.
        assert!(analyzer.analyze("error_details", Convention::Snake).is_none());
    }

    #[test]
    fn test_no_op_suggestions_are_suppressed() {
        let store = analyzer_fixture();
        let analyzer = NameAnalyzer::new(&store);

        // "password" is its own standard form; no rule should emit a
        // suggestion equal to the original.
        assert!(analyzer.analyze("password", Convention::Snake).is_none());
        assert!(analyzer.analyze("user_id", Convention::Snake).is_none());
    }

    #[test]
    fn test_confidence_always_within_bounds() {
        let store = analyzer_fixture();
        let analyzer = NameAnalyzer::new(&store);

        for name in ["usr_id", "passwd", "myCustomThing", "사용자_id"] {
            if let Some(s) = analyzer.analyze(name, Convention::Snake) {
                assert!((0.0..=1.0).contains(&s.confidence), "{name}");
            }
        }
    }

    #[test]
    fn test_expand_parts_camel_case() {
        assert_eq!(expand_parts("usrMsg"), "user_message");
        assert_eq!(expand_parts("userName"), "user_Name");
        assert_eq!(expand_parts("plain_name"), "plain_name");
    }

    #[test]
    fn test_reason_labels_are_stable() {
        assert_eq!(
            ReasonCode::MeaninglessAbbreviation.label(),
            "uses an unclear abbreviation"
        );
    }
}
