//! # avot-core
//!
//! The governance engine for AVOT entities, and the trait seams it is
//! built against.
//!
//! This crate provides:
//! - The five collaborator traits (`RegistryStore`, `LedgerStore`,
//!   `PermissionPolicy`, `ActionClassifier`, `TransitionPolicy`)
//! - The [`GovernanceEngine`] that wires them together: the attempt
//!   pipeline, explicit lifecycle transitions, voluntary signal emission,
//!   and the identity/state query surface
//!
//! The engine decides whether an entity may *attempt* an action and
//! records that decision; it never executes the action itself.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use avot_core::{GovernanceEngine, traits::RegistryStore};
//!
//! let engine = GovernanceEngine::provision(
//!     avot_id, &registry, policy, classifier, transitions, ledger,
//! )?;
//! match engine.attempt("propose a new archive layout")? {
//!     avot_contracts::AttemptOutcome::Proceeded { .. } => { /* act */ }
//!     avot_contracts::AttemptOutcome::Refused { refusal, .. } => { /* branch */ }
//! }
//! ```

pub mod engine;
pub mod traits;

pub use engine::{
    recommended_next_step, GovernanceEngine, SIGNAL_ACTION_ATTEMPTED, SIGNAL_ACTION_REFUSED,
    SIGNAL_LIFECYCLE_REJECTED, SIGNAL_LIFECYCLE_TRANSITION,
};
