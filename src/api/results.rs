//! Review report structure and text rendering.

use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::{ReasonCode, Suggestion};
use crate::analysis::convention::Convention;

/// Outcome of reviewing one source text. Suggestions keep extraction order
/// (lexicographic by identifier); callers wanting confidence order re-sort.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewReport {
    /// Convention the review was run against (configured or detected).
    pub convention: Convention,
    /// How many identifiers were analyzed.
    pub analyzed: usize,
    pub suggestions: Vec<Suggestion>,
}

impl ReviewReport {
    pub fn new(convention: Convention, analyzed: usize, suggestions: Vec<Suggestion>) -> Self {
        Self {
            convention,
            analyzed,
            suggestions,
        }
    }

    /// Whether every analyzed identifier already conforms.
    pub fn is_clean(&self) -> bool {
        self.suggestions.is_empty()
    }

    /// Suggestion counts grouped by reason, in first-seen order.
    pub fn counts_by_reason(&self) -> Vec<(ReasonCode, usize)> {
        let mut counts: Vec<(ReasonCode, usize)> = Vec::new();
        for suggestion in &self.suggestions {
            match counts.iter_mut().find(|(code, _)| *code == suggestion.reason_code) {
                Some((_, count)) => *count += 1,
                None => counts.push((suggestion.reason_code, 1)),
            }
        }
        counts
    }

    /// Plain-text rendering for terminal output.
    pub fn render_text(&self) -> String {
        if self.suggestions.is_empty() {
            return "All identifier names follow the standard.".to_string();
        }

        let mut lines = Vec::with_capacity(self.suggestions.len() + 1);
        for suggestion in &self.suggestions {
            lines.push(format!(
                "{} -> {} : {} (evidence: {}, confidence: {:.0}%)",
                suggestion.original,
                suggestion.suggested,
                suggestion.reason_code.label(),
                suggestion.evidence_term,
                suggestion.confidence * 100.0
            ));
        }
        lines.push(format!(
            "{} suggestion(s) across {} identifier(s), {} convention",
            self.suggestions.len(),
            self.analyzed,
            self.convention.label()
        ));
        lines.join("\n")
    }
}
