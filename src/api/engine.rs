//! The review engine: the main entry point tying the store and analyzers
//! together.

use std::path::Path;

use regex::Regex;
use tracing::{debug, info};

use crate::analysis::analyzer::{NameAnalyzer, Suggestion};
use crate::analysis::context::ContextMap;
use crate::analysis::convention::Convention;
use crate::analysis::evidence::{EvidenceAnalyzer, EvidenceSuggestion};
use crate::analysis::extract;
use crate::api::results::ReviewReport;
use crate::core::config::TermlintConfig;
use crate::core::errors::{Result, TermlintError};
use crate::dictionary::loader;
use crate::dictionary::store::TerminologyStore;
use crate::io::persistence;

/// Reviews source texts against a terminology store.
///
/// The engine owns its store. Construction loads the configured tabular
/// source (falling back to the built-in vocabulary) and merges any persisted
/// custom terms on top.
pub struct ReviewEngine {
    config: TermlintConfig,
    store: TerminologyStore,
}

impl ReviewEngine {
    /// Build an engine from configuration.
    pub fn new(config: TermlintConfig) -> Result<Self> {
        config.validate()?;

        let mut store = match &config.dictionary.csv_path {
            Some(path) => loader::load_or_builtin(path),
            None => TerminologyStore::with_builtin_vocabulary(),
        };

        if let Some(path) = &config.dictionary.custom_terms_path {
            if path.exists() {
                let merged = persistence::load_custom_terms_into(&mut store, path)?;
                debug!("merged {merged} custom terms from {}", path.display());
            }
        }

        info!("review engine ready: {} terms", store.len());
        Ok(Self { config, store })
    }

    /// Build an engine around an existing store, bypassing the loaders.
    pub fn with_store(config: TermlintConfig, store: TerminologyStore) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, store })
    }

    pub fn store(&self) -> &TerminologyStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut TerminologyStore {
        &mut self.store
    }

    pub fn config(&self) -> &TermlintConfig {
        &self.config
    }

    /// Convention used for a given source: the configured one if pinned,
    /// otherwise detected from the text itself.
    pub fn convention_for(&self, source: &str) -> Convention {
        self.config
            .analysis
            .convention
            .unwrap_or_else(|| Convention::detect(source))
    }

    /// Run the rule chain over every identifier in a source text.
    pub fn review(&self, source: &str) -> ReviewReport {
        let convention = self.convention_for(source);
        let analyzer = NameAnalyzer::new(&self.store);
        let min_len = self.config.analysis.min_identifier_length;

        let identifiers: Vec<String> = extract::extract(source)
            .into_iter()
            .filter(|name| name.chars().count() >= min_len)
            .collect();

        let suggestions = identifiers
            .iter()
            .filter_map(|name| analyzer.analyze(name, convention))
            .collect();

        ReviewReport::new(convention, identifiers.len(), suggestions)
    }

    /// Analyze one identifier directly, outside any source text.
    pub fn review_identifier(&self, identifier: &str, convention: Convention) -> Option<Suggestion> {
        NameAnalyzer::new(&self.store).analyze(identifier, convention)
    }

    /// Run evidence-aggregated analysis over every identifier in a source
    /// text, with usage context from a shallow scan.
    pub fn review_with_evidence(&self, source: &str) -> Vec<EvidenceSuggestion> {
        let convention = self.convention_for(source);
        let contexts = ContextMap::scan(source);
        let analyzer = EvidenceAnalyzer::new(&self.store, &self.config.evidence);
        let min_len = self.config.analysis.min_identifier_length;

        extract::extract(source)
            .into_iter()
            .filter(|name| name.chars().count() >= min_len)
            .filter_map(|name| {
                let context = contexts.get_or_default(&name);
                analyzer.analyze_with_evidence(&name, &context, convention)
            })
            .collect()
    }

    /// Rewrite a source text by applying suggestions as whole-word literal
    /// substitutions. Occurrences inside longer identifiers are untouched.
    pub fn apply_suggestions(&self, source: &str, suggestions: &[Suggestion]) -> Result<String> {
        let mut output = source.to_string();
        for suggestion in suggestions {
            let pattern = format!(r"\b{}\b", regex::escape(&suggestion.original));
            let re = Regex::new(&pattern).map_err(|e| {
                TermlintError::internal(format!(
                    "could not build substitution pattern for {}: {e}",
                    suggestion.original
                ))
            })?;
            output = re
                .replace_all(&output, suggestion.suggested.as_str())
                .into_owned();
        }
        Ok(output)
    }

    /// Persist the store's custom terms to the configured path, if any.
    pub fn save_custom_terms(&self) -> Result<usize> {
        match &self.config.dictionary.custom_terms_path {
            Some(path) => persistence::save_custom_terms(&self.store, path),
            None => Ok(0),
        }
    }

    /// Persist the store's custom terms to an explicit path.
    pub fn save_custom_terms_to(&self, path: &Path) -> Result<usize> {
        persistence::save_custom_terms(&self.store, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyzer::ReasonCode;

    fn engine() -> ReviewEngine {
        ReviewEngine::new(TermlintConfig::default()).unwrap()
    }

    #[test]
    fn test_review_full_pipeline() {
        let source = "\
def process_data(usr_id, pwd):
    res = None
    err_msg = ''
    for itm in items:
        res = transform(itm)
    return res
";
        let report = engine().review(source);

        assert_eq!(report.convention, Convention::Snake);
        let originals: Vec<&str> = report
            .suggestions
            .iter()
            .map(|s| s.original.as_str())
            .collect();
        assert!(originals.contains(&"usr_id"));
        assert!(originals.contains(&"pwd"));
        assert!(originals.contains(&"err_msg"));

        let usr = report
            .suggestions
            .iter()
            .find(|s| s.original == "usr_id")
            .unwrap();
        assert_eq!(usr.suggested, "user_id");
    }

    #[test]
    fn test_review_clean_source() {
        let report = engine().review("total_price = compute_total()\n");
        assert!(report.is_clean());
    }

    #[test]
    fn test_review_respects_min_identifier_length() {
        let mut config = TermlintConfig::default();
        config.analysis.min_identifier_length = 6;
        let engine = ReviewEngine::new(config).unwrap();

        // "pwd" is under the length floor, so it is never analyzed.
        let report = engine.review("pwd = 'secret'\n");
        assert_eq!(report.analyzed, 0);
        assert!(report.is_clean());
    }

    #[test]
    fn test_review_pinned_convention() {
        let mut config = TermlintConfig::default();
        config.analysis.convention = Some(Convention::Camel);
        let engine = ReviewEngine::new(config).unwrap();

        // Snake-dominant source, but the configured convention wins.
        let report = engine.review("my_custom_thing = 1\nother_custom_thing = 2\n");
        assert_eq!(report.convention, Convention::Camel);
        assert!(report
            .suggestions
            .iter()
            .any(|s| s.reason_code == ReasonCode::ConventionMismatch
                && s.suggested == "myCustomThing"));
    }

    #[test]
    fn test_review_with_evidence_pipeline() {
        let suggestions = engine().review_with_evidence("def handle(usr_id):\n    pass\n");
        let usr = suggestions.iter().find(|s| s.original == "usr_id").unwrap();
        assert_eq!(usr.suggested, "user_id");
        assert!(!usr.evidence.is_empty());
    }

    #[test]
    fn test_apply_suggestions_word_boundaries() {
        let engine = engine();
        let source = "usr = load()\nusr_cache = {}\nprint(usr)\n";
        let suggestion = engine
            .review_identifier("usr", Convention::Snake)
            .unwrap();

        let rewritten = engine.apply_suggestions(source, &[suggestion]).unwrap();
        assert!(rewritten.contains("user = load()"));
        assert!(rewritten.contains("print(user)"));
        // Longer identifiers that merely contain the original are untouched.
        assert!(rewritten.contains("usr_cache = {}"));
    }

    #[test]
    fn test_with_store_uses_given_store() {
        let mut store = TerminologyStore::new();
        assert!(store.add("Frobnicator", "frb", "", &[]));
        let engine = ReviewEngine::with_store(TermlintConfig::default(), store).unwrap();

        let suggestion = engine.review_identifier("FRB", Convention::Snake).unwrap();
        assert_eq!(suggestion.suggested, "frb");
    }
}
