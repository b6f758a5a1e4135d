//! The terminology store: canonical entries plus a multi-key alias index.
//!
//! Each entry is stored exactly once under its canonical key; every alias
//! (term, standard form, related terms) maps back to that key through a
//! separate index, so updates and deletes have a single source of truth.
//!
//! The store is plain shared-read state. Analyzers borrow it immutably;
//! callers that mutate at runtime serialize `add`/`update`/`delete` against
//! concurrent lookups themselves (an `RwLock` around the store suffices).

use std::collections::HashMap;

use chrono::Utc;
use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use crate::analysis::convention::split_parts;
use crate::dictionary::builtin::builtin_entries;
use crate::dictionary::entry::{
    derive_standard_form, generate_related_terms, TermEntry, TermSource,
};

/// Counts describing the store contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    /// Unique canonical entries
    pub total_terms: usize,
    /// Entries loaded from the tabular source
    pub tabular_terms: usize,
    /// Entries from the built-in vocabulary
    pub builtin_terms: usize,
    /// Entries added through the store API
    pub custom_terms: usize,
    /// Total lookup keys across all entries
    pub alias_keys: usize,
}

/// In-memory terminology dictionary with multi-key lookup.
#[derive(Debug, Clone, Default)]
pub struct TerminologyStore {
    entries: IndexMap<String, TermEntry>,
    aliases: HashMap<String, String>,
}

impl TerminologyStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store populated with the built-in default vocabulary.
    pub fn with_builtin_vocabulary() -> Self {
        let mut store = Self::new();
        for entry in builtin_entries() {
            store.insert_entry(entry);
        }
        debug!("initialized builtin vocabulary: {} terms", store.len());
        store
    }

    /// Number of canonical entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate canonical entries in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = &TermEntry> {
        self.entries.values()
    }

    /// Case-insensitive exact lookup against every indexed key.
    pub fn lookup(&self, key: &str) -> Option<&TermEntry> {
        let key = key.trim().to_lowercase();
        self.aliases
            .get(&key)
            .and_then(|canonical| self.entries.get(canonical))
    }

    /// Resolve an identifier to an entry: exact lookup first, then a lookup
    /// of each word part of the identifier, first hit wins.
    ///
    /// This is what the analyzer rules use so that a compound identifier like
    /// `err_msg` can still be anchored to a known term.
    pub fn resolve(&self, identifier: &str) -> Option<&TermEntry> {
        if let Some(entry) = self.lookup(identifier) {
            return Some(entry);
        }
        split_parts(identifier)
            .iter()
            .find_map(|part| self.lookup(part))
    }

    /// Case-insensitive substring search over terms, standard forms, and
    /// aliases. Results keep store insertion order; no relevance ranking.
    pub fn search(&self, query: &str) -> Vec<&TermEntry> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }

        self.entries
            .values()
            .filter(|entry| {
                entry.term.to_lowercase().contains(&query)
                    || entry.standard_form.to_lowercase().contains(&query)
                    || entry.description.to_lowercase().contains(&query)
                    || entry.related_terms.iter().any(|t| t.contains(&query))
            })
            .collect()
    }

    /// Add a custom term. Returns `false` when no standard form of length
    /// >= 2 can be derived from the name/abbreviation pair.
    ///
    /// On success the entry is indexed under all of its keys atomically and
    /// marked [`TermSource::Custom`] so it can later be updated or deleted.
    pub fn add(
        &mut self,
        name: &str,
        abbreviation: &str,
        description: &str,
        related: &[String],
    ) -> bool {
        let standard_form = match derive_standard_form(name, abbreviation) {
            Some(form) => form,
            None => return false,
        };

        let mut related_terms = generate_related_terms(name, abbreviation, &standard_form);
        for extra in related {
            let extra = extra.trim().to_lowercase();
            if !extra.is_empty() && extra != standard_form && !related_terms.contains(&extra) {
                related_terms.push(extra);
            }
        }

        let description = if description.is_empty() {
            name.to_string()
        } else {
            description.to_string()
        };

        let mut entry = TermEntry::new(
            standard_form.clone(),
            standard_form,
            description,
            related_terms,
            TermSource::Custom,
        );
        entry.added_at = Some(Utc::now());
        entry.modified_at = entry.added_at;

        self.insert_entry(entry);
        true
    }

    /// Update a custom entry's description and related terms. Returns `false`
    /// for unknown keys and for tabular/builtin entries.
    pub fn update(&mut self, key: &str, description: Option<&str>, related: Option<&[String]>) -> bool {
        let canonical = match self.canonical_key(key) {
            Some(c) => c,
            None => return false,
        };

        let mut entry = match self.entries.get(&canonical) {
            Some(e) if e.source == TermSource::Custom => e.clone(),
            _ => return false,
        };

        if let Some(description) = description {
            entry.description = description.to_string();
        }
        if let Some(related) = related {
            entry.related_terms = related
                .iter()
                .map(|t| t.trim().to_lowercase())
                .filter(|t| !t.is_empty() && *t != entry.standard_form)
                .collect();
        }
        entry.modified_at = Some(Utc::now());

        // Re-index: drop the old alias set, then insert the revised entry.
        self.remove_entry(&canonical);
        self.insert_entry(entry);
        true
    }

    /// Delete a custom entry and every alias key pointing at it. Returns
    /// `false` for unknown keys and for tabular/builtin entries.
    pub fn delete(&mut self, key: &str) -> bool {
        let canonical = match self.canonical_key(key) {
            Some(c) => c,
            None => return false,
        };

        match self.entries.get(&canonical) {
            Some(entry) if entry.source == TermSource::Custom => {
                self.remove_entry(&canonical);
                true
            }
            _ => false,
        }
    }

    /// Counts by provenance.
    pub fn stats(&self) -> StoreStats {
        let mut stats = StoreStats {
            total_terms: self.entries.len(),
            tabular_terms: 0,
            builtin_terms: 0,
            custom_terms: 0,
            alias_keys: self.aliases.len(),
        };
        for entry in self.entries.values() {
            match entry.source {
                TermSource::Tabular => stats.tabular_terms += 1,
                TermSource::Builtin => stats.builtin_terms += 1,
                TermSource::Custom => stats.custom_terms += 1,
            }
        }
        stats
    }

    /// Insert an entry and index all of its alias keys. A later entry claims
    /// alias keys from an earlier one (last writer wins per key), but the
    /// earlier record itself stays reachable under its remaining keys.
    pub(crate) fn insert_entry(&mut self, entry: TermEntry) {
        let canonical = entry.standard_form.to_lowercase();
        for key in entry.alias_keys() {
            self.aliases.insert(key, canonical.clone());
        }
        self.entries.insert(canonical, entry);
    }

    fn remove_entry(&mut self, canonical: &str) {
        if let Some(entry) = self.entries.shift_remove(canonical) {
            for key in entry.alias_keys() {
                // Only drop alias keys still owned by this entry.
                if self.aliases.get(&key).map(String::as_str) == Some(canonical) {
                    self.aliases.remove(&key);
                }
            }
        }
    }

    fn canonical_key(&self, key: &str) -> Option<String> {
        self.aliases.get(&key.trim().to_lowercase()).cloned()
    }
}
