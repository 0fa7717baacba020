//! TOML-file registry: an immutable snapshot read once at construction.
//!
//! The registry document looks like:
//!
//! ```toml
//! [registry]
//! name = "tyme-avot-registry"
//! version = "2.0"
//!
//! [registry.avots.tyme-archivist]
//! purpose = "archive stewardship"
//! steward = "ordinary-human"
//! lifecycle_state = "S1"
//! maturity = "M1"
//! binding = false
//! ```
//!
//! Everything under `[registry]` except `avots` is registry-wide metadata.
//! The file is read and parsed exactly once; later edits to the file are
//! invisible until an entity is re-provisioned against a fresh snapshot.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use avot_contracts::{AvotId, GovernanceError, GovernanceResult, RegistryEntry};
use avot_core::traits::RegistryStore;

#[derive(Debug, Deserialize)]
struct RegistryDocument {
    registry: RegistrySection,
}

#[derive(Debug, Deserialize)]
struct RegistrySection {
    #[serde(default)]
    avots: BTreeMap<String, RegistryEntry>,
    #[serde(flatten)]
    metadata: BTreeMap<String, toml::Value>,
}

/// A read-only registry backed by a TOML file snapshot.
#[derive(Debug, Clone)]
pub struct TomlRegistry {
    avots: BTreeMap<String, RegistryEntry>,
    metadata: BTreeMap<String, serde_json::Value>,
}

impl TomlRegistry {
    /// Parse `s` as a registry document.
    ///
    /// Any parse failure is `Err(RegistryRead)` — a malformed registry is
    /// an outage, never an empty registry.
    pub fn from_toml_str(s: &str) -> GovernanceResult<Self> {
        let document: RegistryDocument =
            toml::from_str(s).map_err(|e| GovernanceError::RegistryRead {
                reason: format!("failed to parse registry TOML: {e}"),
            })?;

        let mut metadata = BTreeMap::new();
        for (key, value) in document.registry.metadata {
            let value = serde_json::to_value(&value).map_err(|e| GovernanceError::RegistryRead {
                reason: format!("registry metadata key '{key}' is not representable: {e}"),
            })?;
            metadata.insert(key, value);
        }

        info!(entries = document.registry.avots.len(), "registry snapshot loaded");

        Ok(Self {
            avots: document.registry.avots,
            metadata,
        })
    }

    /// Read the file at `path` and parse it as a registry document.
    pub fn from_file(path: &Path) -> GovernanceResult<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| GovernanceError::RegistryRead {
                reason: format!("failed to read registry file '{}': {e}", path.display()),
            })?;
        Self::from_toml_str(&contents)
    }

    /// The number of configured entities.
    pub fn len(&self) -> usize {
        self.avots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.avots.is_empty()
    }
}

impl RegistryStore for TomlRegistry {
    fn entry(&self, avot_id: &AvotId) -> GovernanceResult<Option<RegistryEntry>> {
        Ok(self.avots.get(avot_id.as_str()).cloned())
    }

    fn metadata(&self) -> GovernanceResult<BTreeMap<String, serde_json::Value>> {
        Ok(self.metadata.clone())
    }
}
