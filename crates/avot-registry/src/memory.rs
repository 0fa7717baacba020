//! In-memory registry: the reference implementation, used in tests and
//! anywhere entries are assembled programmatically.

use std::collections::BTreeMap;

use avot_contracts::{AvotId, GovernanceResult, RegistryEntry};
use avot_core::traits::RegistryStore;

/// A registry held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRegistry {
    entries: BTreeMap<AvotId, RegistryEntry>,
    metadata: BTreeMap<String, serde_json::Value>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an entity's entry.
    pub fn insert(&mut self, avot_id: AvotId, entry: RegistryEntry) {
        self.entries.insert(avot_id, entry);
    }

    /// Set a registry-wide metadata attribute.
    pub fn set_metadata(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.metadata.insert(key.into(), value);
    }
}

impl RegistryStore for InMemoryRegistry {
    fn entry(&self, avot_id: &AvotId) -> GovernanceResult<Option<RegistryEntry>> {
        Ok(self.entries.get(avot_id).cloned())
    }

    fn metadata(&self) -> GovernanceResult<BTreeMap<String, serde_json::Value>> {
        Ok(self.metadata.clone())
    }
}
