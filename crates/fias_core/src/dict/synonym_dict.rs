//! Synonym dictionary keyed by object GUID.
//!
//! # Responsibility
//! - Attach curated alternate names (historical or colloquial) to composed
//!   addresses. Synonyms are advisory display data and never influence
//!   resolution.
//!
//! # Invariants
//! - A miss yields an empty list, never an error.
//! - Insertion order per GUID is preserved; duplicates are dropped.

use std::collections::BTreeMap;

use uuid::Uuid;

/// Resolves alternate names for a registry object.
pub trait SynonymDictionary {
    fn synonyms(&self, object_guid: &Uuid) -> Vec<String>;
}

/// Map-backed synonym store.
#[derive(Debug, Clone, Default)]
pub struct InMemorySynonymDictionary {
    entries: BTreeMap<Uuid, Vec<String>>,
}

impl InMemorySynonymDictionary {
    pub fn new() -> Self {
        InMemorySynonymDictionary::default()
    }

    /// Registers one synonym. Blank names and duplicates are ignored.
    pub fn insert(&mut self, object_guid: Uuid, name: &str) {
        let name = name.trim();
        if name.is_empty() {
            return;
        }
        let names = self.entries.entry(object_guid).or_default();
        if !names.iter().any(|existing| existing == name) {
            names.push(name.to_owned());
        }
    }
}

impl SynonymDictionary for InMemorySynonymDictionary {
    fn synonyms(&self, object_guid: &Uuid) -> Vec<String> {
        self.entries.get(object_guid).cloned().unwrap_or_default()
    }
}
