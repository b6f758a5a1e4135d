//! Evidence-based analysis.
//!
//! Where the rule chain returns the first matching rule, this mode gathers
//! every signal it can find for an identifier, records each as a weighted
//! [`Evidence`] item, and combines the candidate names into one ranked
//! suggestion with alternatives. Overall confidence is the mean of the
//! evidence weights clamped to 1.0; it is a summary of how much corroborating
//! signal exists, not the winning candidate's own confidence, and the two can
//! legitimately differ.

use edit_distance::edit_distance;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::analysis::analyzer::COMMON_ABBREVIATIONS;
use crate::analysis::context::{IdentifierContext, UsageRole};
use crate::analysis::convention::{split_parts, Convention};
use crate::core::config::EvidenceConfig;
use crate::dictionary::store::TerminologyStore;

/// Which signal produced a piece of evidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceSource {
    Dictionary,
    Abbreviation,
    Context,
    Similarity,
    Convention,
}

impl EvidenceSource {
    /// User-facing reason text for a suggestion led by this signal.
    pub fn label(self) -> &'static str {
        match self {
            EvidenceSource::Dictionary => "does not match the standard terminology",
            EvidenceSource::Abbreviation => "uses an unclear abbreviation",
            EvidenceSource::Context => "context suggests a clearer name",
            EvidenceSource::Similarity => "a similar standard term exists",
            EvidenceSource::Convention => "does not follow the naming convention",
        }
    }
}

/// One weighted signal backing a suggestion. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evidence {
    pub source: EvidenceSource,
    pub detail: String,
    pub weight: f64,
}

/// Aggregated suggestion with its full evidence trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceSuggestion {
    pub original: String,
    pub suggested: String,
    /// The winning candidate after convention application; kept alongside
    /// `suggested` so serialized reports name the backing term explicitly.
    pub evidence_term: String,
    /// Signal behind the highest-weight evidence item, which names the
    /// displayed reason. Not necessarily the signal behind `suggested`.
    pub reason: EvidenceSource,
    pub confidence: f64,
    /// All collected evidence, ordered by weight descending.
    pub evidence: Vec<Evidence>,
    pub context: IdentifierContext,
    /// Runner-up candidates as (name, confidence) pairs.
    pub alternatives: Vec<(String, f64)>,
}

/// Abbreviations recognized only by evidence mode, on top of the common
/// table the rule chain uses.
const EXTENDED_ABBREVIATIONS: &[(&str, &str)] = &[
    ("ctx", "context"),
    ("mgr", "manager"),
    ("ctrl", "controller"),
    ("svc", "service"),
    ("repo", "repository"),
    ("impl", "implementation"),
    ("util", "utility"),
    ("exc", "exception"),
    ("env", "environment"),
    ("conf", "configuration"),
    ("auth", "authentication"),
    ("perm", "permission"),
    ("admin", "administrator"),
];

/// `(keyword, preferred name)` pairs per usage role. The first keyword found
/// as a substring of the identifier wins.
const ROLE_PATTERNS: &[(UsageRole, &[(&str, &str)])] = &[
    (
        UsageRole::Parameter,
        &[("user", "user_id"), ("data", "input_data"), ("config", "configuration")],
    ),
    (
        UsageRole::Iterator,
        &[("item", "item"), ("user", "user"), ("data", "record")],
    ),
    (
        UsageRole::Local,
        &[("result", "result"), ("error", "error"), ("temp", "temporary")],
    ),
];

/// Multi-signal analyzer over a terminology store.
pub struct EvidenceAnalyzer<'a> {
    store: &'a TerminologyStore,
    config: &'a EvidenceConfig,
}

impl<'a> EvidenceAnalyzer<'a> {
    pub fn new(store: &'a TerminologyStore, config: &'a EvidenceConfig) -> Self {
        Self { store, config }
    }

    /// Collect all signals for one identifier and aggregate them. Returns
    /// `None` when no signal proposes a name that differs from the original.
    pub fn analyze_with_evidence(
        &self,
        identifier: &str,
        context: &IdentifierContext,
        convention: Convention,
    ) -> Option<EvidenceSuggestion> {
        let weights = &self.config.weights;
        let mut evidence: Vec<Evidence> = Vec::new();
        let mut candidates: Vec<(String, f64)> = Vec::new();

        // Signal 1: the identifier resolves to a dictionary term.
        if let Some(entry) = self.store.resolve(identifier) {
            evidence.push(Evidence {
                source: EvidenceSource::Dictionary,
                detail: format!("matches dictionary term: {}", entry.term),
                weight: weights.exact_match,
            });
            candidates.push((entry.standard_form.clone(), 0.95));
        }

        // Signal 2: abbreviated parts expand to something the store knows.
        let expanded = expand_extended(identifier);
        if expanded != identifier {
            evidence.push(Evidence {
                source: EvidenceSource::Abbreviation,
                detail: format!("abbreviation detected: {identifier} -> {expanded}"),
                weight: weights.abbreviation,
            });
            if let Some(entry) = self.store.resolve(&expanded) {
                candidates.push((entry.standard_form.clone(), 0.85));
            }
        }

        // Signal 3: usage role plus a keyword hit suggests a preferred name.
        if let Some(preferred) = role_based_suggestion(identifier, context.role) {
            evidence.push(Evidence {
                source: EvidenceSource::Context,
                detail: format!(
                    "context suggests: {preferred} (scope: {})",
                    context.scope.describe()
                ),
                weight: weights.context,
            });
            candidates.push((preferred.to_string(), 0.75));
        }

        // Signal 4: fuzzy similarity against every canonical term.
        for (standard_form, term, score) in self.similar_terms(identifier) {
            evidence.push(Evidence {
                source: EvidenceSource::Similarity,
                detail: format!("similar to standard term: {term} (score: {score:.2})"),
                weight: weights.similarity * score,
            });
            candidates.push((standard_form, 0.6 * score));
        }

        // Signal 5: convention violation. Contributes weight, no candidate.
        if !convention.matches(identifier) {
            evidence.push(Evidence {
                source: EvidenceSource::Convention,
                detail: format!("does not follow {} convention", convention.label()),
                weight: weights.convention,
            });
        }

        // Candidates whose applied form equals the original are no-ops.
        candidates.retain(|(name, _)| convention.apply(name) != identifier);
        if candidates.is_empty() {
            trace!("no actionable candidates for {identifier}");
            return None;
        }

        candidates.sort_by(|a, b| b.1.total_cmp(&a.1));
        let suggested = convention.apply(&candidates[0].0);

        let confidence = (evidence.iter().map(|e| e.weight).sum::<f64>()
            / evidence.len() as f64)
            .min(1.0);
        let reason = evidence
            .iter()
            .max_by(|a, b| a.weight.total_cmp(&b.weight))
            .map(|e| e.source)
            .unwrap_or(EvidenceSource::Dictionary);

        evidence.sort_by(|a, b| b.weight.total_cmp(&a.weight));
        let alternatives = candidates
            .iter()
            .skip(1)
            .take(self.config.max_alternatives)
            .cloned()
            .collect();

        Some(EvidenceSuggestion {
            original: identifier.to_string(),
            evidence_term: suggested.clone(),
            suggested,
            reason,
            confidence,
            evidence,
            context: context.clone(),
            alternatives,
        })
    }

    /// Canonical terms whose names are fuzzily similar to the identifier,
    /// above the configured threshold, best first, capped.
    fn similar_terms(&self, identifier: &str) -> Vec<(String, String, f64)> {
        let lower = identifier.to_lowercase();
        let mut hits: Vec<(String, String, f64)> = self
            .store
            .entries()
            .filter_map(|entry| {
                let score = similarity_ratio(&lower, &entry.term.to_lowercase());
                (score > self.config.similarity_threshold).then(|| {
                    (entry.standard_form.clone(), entry.term.clone(), score)
                })
            })
            .collect();

        hits.sort_by(|a, b| b.2.total_cmp(&a.2));
        hits.truncate(self.config.max_similar_terms);
        hits
    }
}

/// Normalized edit similarity in [0, 1]. Identical strings score 1.0.
pub(crate) fn similarity_ratio(a: &str, b: &str) -> f64 {
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 1.0;
    }
    1.0 - edit_distance(a, b) as f64 / longest as f64
}

/// Abbreviation expansion over the combined common and extended tables.
/// Parts with no table entry pass through unchanged; the rejoin is always
/// underscore-separated, so a camelCase input differs from its expansion
/// even when no part was abbreviated.
fn expand_extended(identifier: &str) -> String {
    split_parts(identifier)
        .iter()
        .map(|part| {
            let lower = part.to_lowercase();
            let hit = COMMON_ABBREVIATIONS
                .iter()
                .chain(EXTENDED_ABBREVIATIONS)
                .find(|(abbr, _)| *abbr == lower);
            match hit {
                Some((_, full)) => (*full).to_string(),
                None => part.clone(),
            }
        })
        .collect::<Vec<_>>()
        .join("_")
}

fn role_based_suggestion(identifier: &str, role: UsageRole) -> Option<&'static str> {
    let lower = identifier.to_lowercase();
    ROLE_PATTERNS
        .iter()
        .find(|(r, _)| *r == role)
        .and_then(|(_, patterns)| {
            patterns
                .iter()
                .find(|(keyword, _)| lower.contains(keyword))
                .map(|(_, preferred)| *preferred)
        })
}
