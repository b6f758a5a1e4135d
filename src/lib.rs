//! # Termlint: Terminology-Driven Identifier Review
//!
//! A library for reviewing identifier names in source text against an
//! organization's terminology dictionary. It extracts identifiers, detects
//! the dominant naming convention, and proposes standardized replacements
//! with per-suggestion confidence:
//!
//! - **Terminology Store**: multi-key dictionary loaded from a delimited
//!   source file (with encoding auto-detection) or a built-in vocabulary
//! - **Rule-Chain Analysis**: mixed-language rewrite, abbreviation
//!   expansion, dictionary mismatch, and convention mismatch, in fixed
//!   priority order
//! - **Evidence Mode**: multi-signal weighted analysis with usage context,
//!   fuzzy similarity, and ranked alternatives
//! - **Application**: whole-word substitution of accepted suggestions back
//!   into the source text
//!
//! ## Quick Start
//!
//! ```rust
//! use termlint::{ReviewEngine, TermlintConfig};
//!
//! fn main() -> termlint::Result<()> {
//!     let engine = ReviewEngine::new(TermlintConfig::default())?;
//!     let report = engine.review("usr_id = fetch()\n");
//!
//!     for suggestion in &report.suggestions {
//!         println!("{} -> {}", suggestion.original, suggestion.suggested);
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(unsafe_code)]
#![allow(clippy::module_name_repetitions)]

// Core support modules
pub mod core {
    //! Configuration, errors, and file utilities.

    pub mod config;
    pub mod errors;
    pub mod file_utils;
}

// Terminology dictionary
pub mod dictionary {
    //! Terminology entries, the multi-key store, and its loaders.

    pub mod builtin;
    pub mod entry;
    pub mod loader;
    pub mod store;
}

// Identifier analysis
pub mod analysis {
    //! Identifier extraction, conventions, the rule chain, and evidence mode.

    pub mod analyzer;
    pub mod context;
    pub mod convention;
    pub mod evidence;
    pub mod extract;
}

// Public API and engine interface
pub mod api {
    //! High-level engine interface and report types.

    pub mod engine;
    pub mod results;
}

// Persistence
pub mod io {
    //! File-backed persistence for runtime state.

    pub mod persistence;
}

// Re-export primary types for convenience
pub use analysis::analyzer::{NameAnalyzer, ReasonCode, Suggestion};
pub use analysis::convention::Convention;
pub use analysis::evidence::{Evidence, EvidenceAnalyzer, EvidenceSource, EvidenceSuggestion};
pub use api::engine::ReviewEngine;
pub use api::results::ReviewReport;
pub use core::config::TermlintConfig;
pub use core::errors::{Result, ResultExt, TermlintError};
pub use dictionary::store::TerminologyStore;

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
