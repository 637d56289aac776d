//! Source section id to destination section id lookup

use std::collections::HashMap;

use tasklift_import_types::EntityId;

/// Sections created for one project, keyed by source section id
///
/// Lives only as long as the project's subtree import.
#[derive(Debug, Clone, Default)]
pub struct IdentifierMap {
    entries: HashMap<String, EntityId>,
}

impl IdentifierMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a created section; a repeated source id overwrites the earlier entry
    pub fn insert(&mut self, source_id: impl Into<String>, destination_id: EntityId) {
        self.entries.insert(source_id.into(), destination_id);
    }

    pub fn resolve(&self, source_id: Option<&str>) -> Option<EntityId> {
        source_id.and_then(|id| self.entries.get(id)).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
