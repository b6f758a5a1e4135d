//! Identifier extraction from source text.
//!
//! A fixed battery of lexical patterns pulls candidate identifiers out of
//! raw text: assignment targets, function parameters, loop bindings,
//! exception bindings, and compound-assignment targets. There is no scope
//! awareness; an identifier seen in several scopes collapses into one set
//! entry, and suggestions later apply to every occurrence of that token.
//!
//! Extraction is a pure function: identical input always yields the same
//! set, and unparseable text simply matches nothing.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

static ASSIGNMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([A-Za-z_][A-Za-z0-9_]*)\s*=[^=]").expect("valid assignment regex"));

static COMPOUND_ASSIGNMENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([A-Za-z_][A-Za-z0-9_]*)\s*(?:\+=|-=|\*=|/=)").expect("valid compound regex")
});

static PARAMETER_LIST_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"def\s+[A-Za-z_][A-Za-z0-9_]*\s*\(([^)]*)\)").expect("valid parameter regex")
});

static LOOP_BINDING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"for\s+([A-Za-z_][A-Za-z0-9_]*)\s+in\b").expect("valid loop regex"));

static EXCEPTION_BINDING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"except\s+[A-Za-z_][A-Za-z0-9_.]*\s+as\s+([A-Za-z_][A-Za-z0-9_]*)")
        .expect("valid exception regex")
});

static LEADING_IDENTIFIER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*").expect("valid leading identifier regex"));

/// Language keywords and literals excluded from the candidate set.
const EXCLUDED_KEYWORDS: &[&str] = &[
    "def", "class", "if", "else", "elif", "for", "while", "try", "except", "finally", "return",
    "import", "from", "True", "False", "None", "and", "or", "not", "in", "is", "as", "with",
    "lambda", "pass", "break", "continue", "global", "nonlocal", "yield", "raise", "del", "assert",
];

/// Extract the set of candidate identifiers from a source text.
///
/// The returned set iterates in lexicographic order, which is the stable
/// order the review pipeline reports suggestions in.
pub fn extract(source: &str) -> BTreeSet<String> {
    let mut identifiers = BTreeSet::new();

    for captures in ASSIGNMENT_RE.captures_iter(source) {
        identifiers.insert(captures[1].to_string());
    }
    for captures in COMPOUND_ASSIGNMENT_RE.captures_iter(source) {
        identifiers.insert(captures[1].to_string());
    }
    for captures in LOOP_BINDING_RE.captures_iter(source) {
        identifiers.insert(captures[1].to_string());
    }
    for captures in EXCEPTION_BINDING_RE.captures_iter(source) {
        identifiers.insert(captures[1].to_string());
    }
    for captures in PARAMETER_LIST_RE.captures_iter(source) {
        for name in parameter_names(&captures[1]) {
            identifiers.insert(name);
        }
    }

    identifiers.retain(|name| name.len() > 1 && !EXCLUDED_KEYWORDS.contains(&name.as_str()));
    identifiers
}

/// Pull bare parameter names out of a declared parameter list, dropping
/// defaults, annotations, and star markers.
fn parameter_names(parameter_list: &str) -> Vec<String> {
    parameter_list
        .split(',')
        .filter_map(|raw| {
            let trimmed = raw.trim().trim_start_matches('*').trim();
            LEADING_IDENTIFIER_RE
                .find(trimmed)
                .map(|m| m.as_str().to_string())
        })
        .collect()
}
