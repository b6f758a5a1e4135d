//! Configuration types and management for termlint.
//!
//! Configuration is serde-backed and round-trips through YAML. Defaults match
//! the documented analysis contract; `validate` catches out-of-range values
//! before an engine is built on top of them.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::analysis::convention::Convention;
use crate::core::errors::{Result, TermlintError};

/// Main configuration for the termlint engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TermlintConfig {
    /// Terminology dictionary sources
    #[serde(default)]
    pub dictionary: DictionaryConfig,

    /// Rule-chain analysis settings
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Evidence-aggregation (advanced mode) settings
    #[serde(default)]
    pub evidence: EvidenceConfig,
}

impl TermlintConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            TermlintError::io(format!("Failed to read config file: {}", path.display()), e)
        })?;

        let config: Self = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn to_yaml_file(&self, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        let content = serde_yaml::to_string(self)?;
        std::fs::write(&path, content).map_err(|e| {
            TermlintError::io(
                format!("Failed to write config file: {}", path.display()),
                e,
            )
        })
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<()> {
        self.analysis.validate()?;
        self.evidence.validate()?;
        Ok(())
    }
}

/// Where the terminology store loads its entries from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DictionaryConfig {
    /// Delimited terminology source (localized name, canonical name,
    /// abbreviation). When absent or unreadable the built-in vocabulary is
    /// used instead.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub csv_path: Option<PathBuf>,

    /// JSON file holding custom-added terms, loaded after the tabular source.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_terms_path: Option<PathBuf>,
}

/// Settings for the rule-chain analyzer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Target convention. When unset, the engine detects the dominant
    /// convention of each reviewed text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub convention: Option<Convention>,

    /// Identifiers shorter than this are never analyzed.
    pub min_identifier_length: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            convention: None,
            min_identifier_length: 2,
        }
    }
}

impl AnalysisConfig {
    fn validate(&self) -> Result<()> {
        if self.min_identifier_length == 0 {
            return Err(TermlintError::config_field(
                "min_identifier_length must be at least 1",
                "analysis.min_identifier_length",
            ));
        }
        Ok(())
    }
}

/// Settings for evidence-aggregated analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvidenceConfig {
    /// Minimum normalized similarity for a fuzzy dictionary match.
    pub similarity_threshold: f64,

    /// How many fuzzy matches may contribute evidence.
    pub max_similar_terms: usize,

    /// How many runner-up candidates are reported as alternatives.
    pub max_alternatives: usize,

    /// Per-signal evidence weights.
    #[serde(default)]
    pub weights: EvidenceWeights,
}

impl Default for EvidenceConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.6,
            max_similar_terms: 3,
            max_alternatives: 3,
            weights: EvidenceWeights::default(),
        }
    }
}

impl EvidenceConfig {
    fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err(TermlintError::config_field(
                format!(
                    "similarity_threshold must be within [0.0, 1.0], got {}",
                    self.similarity_threshold
                ),
                "evidence.similarity_threshold",
            ));
        }
        self.weights.validate()
    }
}

/// How much each evidence signal contributes to the aggregate confidence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvidenceWeights {
    /// Exact dictionary match
    pub exact_match: f64,
    /// Abbreviation expansion with a dictionary hit
    pub abbreviation: f64,
    /// Usage-role context heuristic
    pub context: f64,
    /// Fuzzy similarity (scaled by the match ratio)
    pub similarity: f64,
    /// Convention violation note
    pub convention: f64,
}

impl Default for EvidenceWeights {
    fn default() -> Self {
        Self {
            exact_match: 1.0,
            abbreviation: 0.7,
            context: 0.5,
            similarity: 0.4,
            convention: 0.6,
        }
    }
}

impl EvidenceWeights {
    fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("exact_match", self.exact_match),
            ("abbreviation", self.abbreviation),
            ("context", self.context),
            ("similarity", self.similarity),
            ("convention", self.convention),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(TermlintError::config_field(
                    format!("evidence weight must be within [0.0, 1.0], got {value}"),
                    format!("evidence.weights.{name}"),
                ));
            }
        }
        Ok(())
    }
}
