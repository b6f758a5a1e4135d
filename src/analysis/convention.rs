//! Naming convention detection, segmentation, and application.
//!
//! A convention is one of snake_case, camelCase, or PascalCase. Detection
//! votes over every identifier-shaped token in a text; application reformats
//! a name by segmenting it into word parts and rejoining them in the target
//! style. Application is idempotent: formatting an already-conforming name
//! returns it unchanged.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static IDENTIFIER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[a-zA-Z_][a-zA-Z0-9_]*\b").expect("valid identifier regex"));

static SNAKE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z]+(_[a-z]+)*$").expect("valid snake_case regex"));

static CAMEL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z]+([A-Z][a-z]+)*$").expect("valid camelCase regex"));

static PASCAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][a-z]+([A-Z][a-z]+)*$").expect("valid PascalCase regex"));

/// Supported naming conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Convention {
    /// snake_case
    Snake,
    /// camelCase
    Camel,
    /// PascalCase
    Pascal,
}

impl Convention {
    /// Human-readable label for reports and logs.
    pub fn label(&self) -> &'static str {
        match self {
            Convention::Snake => "snake_case",
            Convention::Camel => "camelCase",
            Convention::Pascal => "PascalCase",
        }
    }

    /// Detect the predominant convention in a source text by voting over
    /// every identifier-shaped token (all occurrences, not just declarations).
    ///
    /// Ties resolve in variant declaration order: Snake, then Camel, then
    /// Pascal. A text with no votes at all returns Snake.
    pub fn detect(source: &str) -> Convention {
        let mut votes = [0usize; 3];

        for token in IDENTIFIER_RE.find_iter(source) {
            let token = token.as_str();
            let mut chars = token.chars();
            let first = match chars.next() {
                Some(c) => c,
                None => continue,
            };

            let has_upper = token.chars().any(|c| c.is_ascii_uppercase());
            let has_lower = token.chars().any(|c| c.is_ascii_lowercase());

            if token.contains('_') && has_lower && !has_upper {
                votes[0] += 1;
            } else if first.is_ascii_lowercase() && chars.any(|c| c.is_ascii_uppercase()) {
                votes[1] += 1;
            } else if first.is_ascii_uppercase() && has_lower {
                votes[2] += 1;
            }
        }

        // Strict comparison keeps the declaration-order tie-break.
        let mut best = Convention::Snake;
        let mut best_votes = votes[0];
        for (convention, count) in [(Convention::Camel, votes[1]), (Convention::Pascal, votes[2])] {
            if count > best_votes {
                best = convention;
                best_votes = count;
            }
        }
        best
    }

    /// Check whether a name already conforms to this convention.
    pub fn matches(&self, name: &str) -> bool {
        match self {
            Convention::Snake => SNAKE_RE.is_match(name),
            Convention::Camel => CAMEL_RE.is_match(name),
            Convention::Pascal => PASCAL_RE.is_match(name),
        }
    }

    /// Reformat a name into this convention.
    pub fn apply(&self, name: &str) -> String {
        let parts = split_parts(name);
        if parts.is_empty() {
            return name.to_string();
        }

        match self {
            Convention::Snake => parts
                .iter()
                .map(|p| p.to_lowercase())
                .collect::<Vec<_>>()
                .join("_"),
            Convention::Camel => {
                let mut out = parts[0].to_lowercase();
                for part in &parts[1..] {
                    out.push_str(&capitalize(part));
                }
                out
            }
            Convention::Pascal => parts.iter().map(|p| capitalize(p)).collect(),
        }
    }
}

/// Split a name into word parts.
///
/// Underscores take precedence, then hyphens; otherwise the name is segmented
/// at case boundaries, which handles camelCase, PascalCase, and UPPERCASE
/// runs (`HTMLParser` becomes `HTML` + `Parser`).
pub fn split_parts(name: &str) -> Vec<String> {
    if name.contains('_') {
        return name
            .split('_')
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect();
    }
    if name.contains('-') {
        return name
            .split('-')
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect();
    }
    split_case_boundaries(name)
}

fn split_case_boundaries(name: &str) -> Vec<String> {
    let chars: Vec<char> = name.chars().collect();
    if chars.is_empty() {
        return Vec::new();
    }

    let mut parts = Vec::new();
    let mut start = 0;

    for i in 1..chars.len() {
        let prev = chars[i - 1];
        let cur = chars[i];

        if cur.is_uppercase() && prev.is_lowercase() {
            // aB -> a | B
            parts.push(chars[start..i].iter().collect());
            start = i;
        } else if cur.is_lowercase() && prev.is_uppercase() && i - start > 1 {
            // ABc -> A | Bc (the last uppercase letter starts the next word)
            parts.push(chars[start..i - 1].iter().collect());
            start = i - 1;
        }
    }
    parts.push(chars[start..].iter().collect());
    parts
}

fn capitalize(part: &str) -> String {
    let mut chars = part.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}
