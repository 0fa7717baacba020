//! # avot-contracts
//!
//! Shared types, enumerations, and error contracts for the AVOT governance
//! engine.
//!
//! All crates in the workspace import from here. No business logic lives in
//! this crate — only data definitions, closed enumerations, and error types.
//! The enumerations (`LifecycleState`, `Maturity`, `ActionType`,
//! `RefusalReason`, `NextStep`) are closed sum types so the permission
//! policy can match on them exhaustively; a missing case is a compile
//! error, not a runtime default branch.

pub mod action;
pub mod entity;
pub mod error;
pub mod outcome;
pub mod refusal;
pub mod registry;
pub mod signal;

pub use action::{ActionType, Verdict};
pub use entity::{AvotId, AvotIdentity, AvotState, LifecycleState, Maturity};
pub use error::{GovernanceError, GovernanceResult};
pub use outcome::AttemptOutcome;
pub use refusal::{NextStep, Refusal, RefusalReason};
pub use registry::RegistryEntry;
pub use signal::{NewSignal, Severity, Signal, SignalId};

#[cfg(test)]
mod tests {
    use super::*;

    // ── Wire names ────────────────────────────────────────────────────────────

    #[test]
    fn lifecycle_state_serializes_to_stage_name() {
        let json = serde_json::to_string(&LifecycleState::S3).unwrap();
        assert_eq!(json, "\"S3\"");

        let decoded: LifecycleState = serde_json::from_str("\"S9\"").unwrap();
        assert_eq!(decoded, LifecycleState::S9);
    }

    #[test]
    fn lifecycle_state_is_ordered_by_stage() {
        assert!(LifecycleState::S0 < LifecycleState::S1);
        assert!(LifecycleState::S8 < LifecycleState::S9);
    }

    #[test]
    fn action_type_uses_snake_case_wire_names() {
        for action in ActionType::ALL {
            let json = serde_json::to_string(&action).unwrap();
            assert_eq!(json, format!("\"{}\"", action.as_str()));
        }

        let decoded: ActionType = serde_json::from_str("\"communicate\"").unwrap();
        assert_eq!(decoded, ActionType::Communicate);
    }

    #[test]
    fn action_type_parses_from_wire_name() {
        assert_eq!("bind".parse::<ActionType>().unwrap(), ActionType::Bind);
        assert!("delete".parse::<ActionType>().is_err());
    }

    #[test]
    fn maturity_parses_from_level_name() {
        assert_eq!("M2".parse::<Maturity>().unwrap(), Maturity::M2);
        assert!("M5".parse::<Maturity>().is_err());
    }

    // ── RefusalReason open escape ─────────────────────────────────────────────

    #[test]
    fn refusal_reason_round_trips() {
        for reason in [
            RefusalReason::Scope,
            RefusalReason::Lifecycle,
            RefusalReason::Consent,
            RefusalReason::Covenant,
        ] {
            let json = serde_json::to_string(&reason).unwrap();
            let decoded: RefusalReason = serde_json::from_str(&json).unwrap();
            assert_eq!(reason, decoded);
        }
    }

    #[test]
    fn unrecognized_refusal_reason_degrades_to_unknown() {
        // A reason emitted by a future version must not break this reader.
        let decoded: RefusalReason = serde_json::from_str("\"quorum\"").unwrap();
        assert_eq!(decoded, RefusalReason::Unknown);
    }

    // ── SignalId ──────────────────────────────────────────────────────────────

    #[test]
    fn signal_id_new_produces_unique_values() {
        let ids: std::collections::HashSet<String> =
            (0..100).map(|_| SignalId::new().to_string()).collect();
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn signal_id_displays_with_sig_prefix() {
        let id = SignalId::new();
        assert!(id.to_string().starts_with("SIG-"));
    }

    // ── NewSignal builder defaults ────────────────────────────────────────────

    #[test]
    fn new_signal_defaults_severity_and_payloads() {
        let req = NewSignal::new(AvotId::new("tyme-archivist"), "status_update", "all quiet");
        assert_eq!(req.severity, Severity::Low);
        assert_eq!(req.context, serde_json::json!({}));
        assert_eq!(req.metadata, serde_json::json!({}));
    }

    // ── RegistryEntry provisioning split ──────────────────────────────────────

    #[test]
    fn registry_entry_splits_into_identity_and_state() {
        let entry = RegistryEntry {
            purpose: Some("archive stewardship".to_string()),
            steward: Some("ordinary-human".to_string()),
            header_ref: Some("headers/archivist-v2".to_string()),
            lifecycle_state: LifecycleState::S1,
            maturity: Maturity::M1,
            binding: false,
            attributes: Default::default(),
        };

        let id = AvotId::new("tyme-archivist");
        let identity = entry.identity(&id);
        assert_eq!(identity.avot_id, id);
        assert_eq!(identity.steward.as_deref(), Some("ordinary-human"));

        let state = entry.initial_state();
        assert_eq!(state.lifecycle, LifecycleState::S1);
        assert_eq!(state.maturity, Maturity::M1);
        assert!(!state.binding);
    }

    // ── AttemptOutcome accessors ──────────────────────────────────────────────

    fn make_signal(signal_type: &str) -> Signal {
        Signal {
            signal_id: SignalId::new(),
            avot_id: AvotId::new("test-avot"),
            signal_type: signal_type.to_string(),
            timestamp: chrono::Utc::now(),
            severity: Severity::Low,
            description: "test".to_string(),
            context: serde_json::json!({}),
            metadata: serde_json::json!({}),
        }
    }

    #[test]
    fn attempt_outcome_proceeded_accessors() {
        let outcome = AttemptOutcome::Proceeded {
            action: ActionType::Propose,
            signal: make_signal("action_attempted"),
        };
        assert!(outcome.proceeded());
        assert!(outcome.refusal().is_none());
        assert_eq!(outcome.action(), ActionType::Propose);
        assert_eq!(outcome.signal().signal_type, "action_attempted");
    }

    #[test]
    fn attempt_outcome_refused_accessors() {
        let outcome = AttemptOutcome::Refused {
            action: ActionType::Bind,
            refusal: Refusal::new(
                RefusalReason::Consent,
                "binding flag not granted",
                NextStep::Propose,
            ),
            signal: make_signal("action_refused"),
        };
        assert!(!outcome.proceeded());
        let refusal = outcome.refusal().unwrap();
        assert_eq!(refusal.reason, RefusalReason::Consent);
        assert_eq!(refusal.next_step, NextStep::Propose);
    }

    // ── Error display messages ────────────────────────────────────────────────

    #[test]
    fn error_registry_read_display() {
        let err = GovernanceError::RegistryRead {
            reason: "file vanished".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("registry read failed"));
        assert!(msg.contains("file vanished"));
    }

    #[test]
    fn error_ledger_write_display() {
        let err = GovernanceError::LedgerWrite {
            reason: "disk full".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("ledger write failed"));
        assert!(msg.contains("disk full"));
    }

    #[test]
    fn error_unknown_entity_display() {
        let err = GovernanceError::UnknownEntity {
            avot_id: AvotId::new("ghost"),
        };
        assert!(err.to_string().contains("ghost"));
    }

    #[test]
    fn error_lifecycle_display() {
        let err = GovernanceError::Lifecycle {
            reason: "S9 is terminal".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("lifecycle error"));
        assert!(msg.contains("S9 is terminal"));
    }
}
