//! Shallow usage-context extraction for evidence-based analysis.
//!
//! A line-oriented scan classifies each identifier by enclosing scope and
//! usage role, counts occurrences, and guesses a value type from literal
//! assignments. This is deliberately lexical: it tracks the most recent
//! `def`/`class` header and resets to module scope on an unindented
//! statement, which is accurate enough for the context heuristics that
//! consume it.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Enclosing scope of an identifier's first recorded occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "name")]
pub enum ScopeKind {
    Module,
    Function(String),
    Class(String),
}

impl ScopeKind {
    pub fn describe(&self) -> String {
        match self {
            ScopeKind::Module => "module".to_string(),
            ScopeKind::Function(name) => format!("function:{name}"),
            ScopeKind::Class(name) => format!("class:{name}"),
        }
    }
}

/// How an identifier is used where it is first seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UsageRole {
    Parameter,
    Local,
    Iterator,
}

/// Context attached to one identifier. The role and scope come from the
/// first recorded occurrence; later occurrences only bump the count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentifierContext {
    pub scope: ScopeKind,
    pub role: UsageRole,
    pub inferred_type: Option<String>,
    pub occurrences: usize,
}

impl IdentifierContext {
    /// Context used when an identifier was provided directly rather than
    /// found in scanned source.
    pub fn standalone() -> Self {
        Self {
            scope: ScopeKind::Module,
            role: UsageRole::Local,
            inferred_type: None,
            occurrences: 1,
        }
    }
}

static DEF_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*def\s+([A-Za-z_][A-Za-z0-9_]*)\s*\(([^)]*)\)").expect("valid def regex")
});
static CLASS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*class\s+([A-Za-z_][A-Za-z0-9_]*)").expect("valid class regex"));
static FOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*for\s+([A-Za-z_][A-Za-z0-9_]*)\s+in\b").expect("valid for regex"));
static ASSIGN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([A-Za-z_][A-Za-z0-9_]*)\s*=\s*([^=].*)$").expect("valid assign regex")
});
static CALL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z_][A-Za-z0-9_]*)\s*\(").expect("valid call regex"));
static PARAM_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*").expect("valid param regex"));

/// Per-source map from identifier to usage context.
#[derive(Debug, Clone, Default)]
pub struct ContextMap {
    entries: std::collections::HashMap<String, IdentifierContext>,
}

impl ContextMap {
    /// Scan a source text and build contexts for every binding it can see.
    pub fn scan(source: &str) -> Self {
        let mut map = Self::default();
        let mut scope = ScopeKind::Module;

        for line in source.lines() {
            if let Some(captures) = DEF_RE.captures(line) {
                scope = ScopeKind::Function(captures[1].to_string());
                for raw in captures[2].split(',') {
                    let trimmed = raw.trim().trim_start_matches('*').trim();
                    if let Some(m) = PARAM_NAME_RE.find(trimmed) {
                        map.record(m.as_str(), &scope, UsageRole::Parameter, None);
                    }
                }
                continue;
            }
            if let Some(captures) = CLASS_RE.captures(line) {
                scope = ScopeKind::Class(captures[1].to_string());
                continue;
            }
            // An unindented plain statement closes the current block scope.
            if !line.is_empty() && !line.starts_with([' ', '\t']) {
                scope = ScopeKind::Module;
            }

            if let Some(captures) = FOR_RE.captures(line) {
                map.record(&captures[1], &scope, UsageRole::Iterator, None);
                continue;
            }
            if let Some(captures) = ASSIGN_RE.captures(line) {
                let inferred = infer_literal_type(captures[2].trim());
                map.record(&captures[1], &scope, UsageRole::Local, inferred);
            }
        }

        map
    }

    pub fn get(&self, identifier: &str) -> Option<&IdentifierContext> {
        self.entries.get(identifier)
    }

    /// Context for an identifier, defaulting to a standalone local when the
    /// scan never saw a binding for it.
    pub fn get_or_default(&self, identifier: &str) -> IdentifierContext {
        self.entries
            .get(identifier)
            .cloned()
            .unwrap_or_else(IdentifierContext::standalone)
    }

    fn record(
        &mut self,
        identifier: &str,
        scope: &ScopeKind,
        role: UsageRole,
        inferred_type: Option<String>,
    ) {
        match self.entries.get_mut(identifier) {
            Some(context) => {
                context.occurrences += 1;
                if context.inferred_type.is_none() {
                    context.inferred_type = inferred_type;
                }
            }
            None => {
                self.entries.insert(
                    identifier.to_string(),
                    IdentifierContext {
                        scope: scope.clone(),
                        role,
                        inferred_type,
                        occurrences: 1,
                    },
                );
            }
        }
    }
}

/// Guess a value type from the right-hand side of an assignment.
fn infer_literal_type(rhs: &str) -> Option<String> {
    let rhs = rhs.trim();
    if rhs.is_empty() {
        return None;
    }
    if rhs.starts_with('[') {
        return Some("list".to_string());
    }
    if rhs.starts_with('{') {
        return Some("dict".to_string());
    }
    if rhs.starts_with('"') || rhs.starts_with('\'') {
        return Some("str".to_string());
    }
    if rhs == "True" || rhs == "False" {
        return Some("bool".to_string());
    }
    if rhs.chars().all(|c| c.is_ascii_digit()) {
        return Some("int".to_string());
    }
    if rhs.parse::<f64>().is_ok() {
        return Some("float".to_string());
    }
    if let Some(captures) = CALL_RE.captures(rhs) {
        return Some(format!("{}_result", &captures[1]));
    }
    None
}
