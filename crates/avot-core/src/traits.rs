//! Trait seams for the governance engine's collaborators.
//!
//! Five traits define the complete boundary of the engine:
//!
//! - `RegistryStore`     — read path for entity configuration
//! - `LedgerStore`       — append-only sink for signals, the system of record
//! - `PermissionPolicy`  — pure verdict function over (state, action)
//! - `ActionClassifier`  — total mapping from free-form intent to action type
//! - `TransitionPolicy`  — the lifecycle transition allow-list and terminal set
//!
//! The engine is constructed with explicit implementations of each — no
//! ambient globals — so it can be tested end to end against in-memory fakes.

use std::collections::BTreeMap;

use avot_contracts::{
    ActionType, AvotId, AvotState, GovernanceResult, LifecycleState, NewSignal, RegistryEntry,
    Signal, Verdict,
};

/// Read path into the entity registry.
///
/// Implementations are read-mostly snapshots: the engine reads an entry
/// exactly once, at provisioning time, and treats it as immutable for the
/// lifetime of the in-memory state. Changing registry data takes effect by
/// re-provisioning, never by silent hot-swap.
pub trait RegistryStore: Send + Sync {
    /// Look up the configured attributes of one entity.
    ///
    /// Returns `Ok(None)` for an id the registry does not hold — an
    /// unconfigured entity is a normal condition the engine refuses with
    /// `scope`, not an error. A read or parse failure returns
    /// `Err(GovernanceError::RegistryRead)` and must never be collapsed
    /// into `Ok(None)`.
    fn entry(&self, avot_id: &AvotId) -> GovernanceResult<Option<RegistryEntry>>;

    /// Registry-wide attributes, excluding the entity entries themselves.
    fn metadata(&self) -> GovernanceResult<BTreeMap<String, serde_json::Value>>;
}

/// Append-only sink for signals.
///
/// Appends for one entity are totally ordered: `read` returns signals in
/// exactly the order they were appended, and nothing appended is ever
/// modified or deleted. No global order across entities is required.
pub trait LedgerStore: Send + Sync {
    /// Append one signal, assigning its `signal_id` and `timestamp`.
    ///
    /// The signal must be durably persisted before this returns. If the
    /// backing structure is absent or malformed the append is rejected
    /// with `Err(GovernanceError::LedgerWrite)` — never silently dropped.
    fn append(&self, signal: NewSignal) -> GovernanceResult<Signal>;

    /// Read signals in append order, optionally filtered to one entity.
    fn read(&self, avot_id: Option<&AvotId>) -> GovernanceResult<Vec<Signal>>;
}

/// Pure permission verdict over `(lifecycle, maturity, binding, action)`.
///
/// Implementations must be **total** (every combination of the closed
/// enumerations yields a verdict; default is deny, never "undefined") and
/// **deterministic** (no time or randomness dependence — the same inputs
/// always produce the same verdict, so an audit can be replayed).
///
/// One rule is not table data: `ActionType::Bind` with `binding == false`
/// is denied with reason `consent` before any table is consulted. Every
/// implementation carries this hard gate.
pub trait PermissionPolicy: Send + Sync {
    fn evaluate(&self, state: &AvotState, action: ActionType) -> Verdict;
}

/// Total, stateless mapping from a free-form intent to an [`ActionType`].
///
/// Classification never fails and never has side effects — in particular
/// it must not append signals. An unrecognizable intent classifies to
/// `Think`, the least-privileged category, so an unparseable intent can
/// never bypass gating by erroring out before permission is checked.
pub trait ActionClassifier: Send + Sync {
    fn classify(&self, intent: &str) -> ActionType;
}

/// The lifecycle transition allow-list and terminal-state set.
///
/// Loaded from policy configuration at provisioning. A state in the
/// terminal set is absorbing: `is_allowed` must be false for every
/// transition out of it (implementations validate this at load time).
pub trait TransitionPolicy: Send + Sync {
    /// True if an explicit `(from, to)` transition is on the allow-list.
    fn is_allowed(&self, from: LifecycleState, to: LifecycleState) -> bool;

    /// True if `state` is terminal (dissolution; queries only from here on).
    fn is_terminal(&self, state: LifecycleState) -> bool;
}
