//! # avot-registry
//!
//! Registry store adapters: the read path for AVOT entity configuration.
//!
//! The registry is read-mostly and the engine reads it exactly once per
//! provisioning, so both adapters hand out immutable snapshots. An
//! unknown id is `Ok(None)` (a normal condition the engine refuses with
//! `scope`); a read or parse failure is `Err(RegistryRead)` and is never
//! collapsed into "unknown entity".

pub mod memory;
pub mod toml_store;

pub use memory::InMemoryRegistry;
pub use toml_store::TomlRegistry;

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::io::Write;

    use avot_contracts::{AvotId, GovernanceError, LifecycleState, Maturity, RegistryEntry};
    use avot_core::traits::RegistryStore;

    use super::{InMemoryRegistry, TomlRegistry};

    const SAMPLE: &str = r#"
        [registry]
        name = "tyme-avot-registry"
        version = "2.0"

        [registry.avots.tyme-archivist]
        purpose = "archive stewardship"
        steward = "ordinary-human"
        header_ref = "headers/archivist-v2"
        lifecycle_state = "S1"
        maturity = "M1"
        binding = false

        [registry.avots.tyme-fabricator]
        purpose = "sandboxed fabrication"
        lifecycle_state = "S3"
        maturity = "M2"
        binding = true
        sandbox = "strict"
    "#;

    #[test]
    fn known_entry_is_returned_with_all_fields() {
        let registry = TomlRegistry::from_toml_str(SAMPLE).unwrap();
        let entry = registry
            .entry(&AvotId::new("tyme-archivist"))
            .unwrap()
            .expect("archivist must be configured");

        assert_eq!(entry.purpose.as_deref(), Some("archive stewardship"));
        assert_eq!(entry.steward.as_deref(), Some("ordinary-human"));
        assert_eq!(entry.lifecycle_state, LifecycleState::S1);
        assert_eq!(entry.maturity, Maturity::M1);
        assert!(!entry.binding);
    }

    #[test]
    fn unknown_id_is_ok_none_not_an_error() {
        let registry = TomlRegistry::from_toml_str(SAMPLE).unwrap();
        let entry = registry.entry(&AvotId::new("ghost")).unwrap();
        assert!(entry.is_none());
    }

    #[test]
    fn unrecognized_entry_keys_land_in_attributes() {
        let registry = TomlRegistry::from_toml_str(SAMPLE).unwrap();
        let entry = registry
            .entry(&AvotId::new("tyme-fabricator"))
            .unwrap()
            .unwrap();

        assert_eq!(
            entry.attributes.get("sandbox"),
            Some(&serde_json::json!("strict"))
        );
    }

    #[test]
    fn metadata_excludes_the_entity_entries() {
        let registry = TomlRegistry::from_toml_str(SAMPLE).unwrap();
        let metadata = registry.metadata().unwrap();

        assert_eq!(metadata.get("name"), Some(&serde_json::json!("tyme-avot-registry")));
        assert_eq!(metadata.get("version"), Some(&serde_json::json!("2.0")));
        assert!(!metadata.contains_key("avots"));
    }

    #[test]
    fn malformed_registry_is_a_registry_read_error() {
        let result = TomlRegistry::from_toml_str("registry = \"not a table\"");
        match result {
            Err(GovernanceError::RegistryRead { reason }) => {
                assert!(reason.contains("failed to parse"), "got: {reason}");
            }
            other => panic!("expected RegistryRead, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_a_registry_read_error() {
        let result = TomlRegistry::from_file(std::path::Path::new("/nonexistent/registry.toml"));
        assert!(matches!(result, Err(GovernanceError::RegistryRead { .. })));
    }

    #[test]
    fn file_snapshot_is_immutable_after_load() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        file.flush().unwrap();

        let registry = TomlRegistry::from_file(file.path()).unwrap();
        assert_eq!(registry.len(), 2);

        // Rewriting the file does not affect the loaded snapshot.
        file.write_all(b"\n[registry.avots.sneaky]\nlifecycle_state = \"S0\"\nmaturity = \"M0\"\n")
            .unwrap();
        file.flush().unwrap();
        assert_eq!(registry.len(), 2);
        assert!(registry.entry(&AvotId::new("sneaky")).unwrap().is_none());
    }

    #[test]
    fn in_memory_registry_round_trips_entries() {
        let mut registry = InMemoryRegistry::new();
        registry.set_metadata("name", serde_json::json!("test-registry"));
        registry.insert(
            AvotId::new("avot-x"),
            RegistryEntry {
                purpose: None,
                steward: None,
                header_ref: None,
                lifecycle_state: LifecycleState::S0,
                maturity: Maturity::M0,
                binding: false,
                attributes: Default::default(),
            },
        );

        assert!(registry.entry(&AvotId::new("avot-x")).unwrap().is_some());
        assert!(registry.entry(&AvotId::new("avot-y")).unwrap().is_none());
        assert_eq!(
            registry.metadata().unwrap().get("name"),
            Some(&serde_json::json!("test-registry"))
        );
    }
}
