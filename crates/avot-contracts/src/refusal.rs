//! The refusal protocol: structured "no" as a first-class value.
//!
//! A refusal is a normal outcome, never an error. Callers branch on it the
//! same way they branch on a proceeded attempt; the error channel is
//! reserved for operational failures (store unreachable, invalid
//! transition request, malformed configuration).

use serde::{Deserialize, Serialize};

/// Why an attempt was refused.
///
/// A closed set plus the `Unknown` escape: deserializing a reason string
/// this version does not recognize degrades to `Unknown` instead of
/// failing, so foreign ledgers stay readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefusalReason {
    /// The entity is not configured for this at all (e.g. absent from the
    /// registry).
    Scope,
    /// The entity's lifecycle stage does not permit the action.
    Lifecycle,
    /// The action needs binding force the entity does not carry.
    Consent,
    /// The action would breach a standing covenant clause.
    Covenant,
    /// Escape hatch for reasons this version does not know.
    #[serde(other)]
    Unknown,
}

impl RefusalReason {
    pub fn as_str(self) -> &'static str {
        match self {
            RefusalReason::Scope => "scope",
            RefusalReason::Lifecycle => "lifecycle",
            RefusalReason::Consent => "consent",
            RefusalReason::Covenant => "covenant",
            RefusalReason::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for RefusalReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The engine's recommendation for what the refused caller should do next.
///
/// Advisory only — the engine never executes the recommendation itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NextStep {
    /// The action may become permissible later (lifecycle too early).
    Wait,
    /// Ask the steward: advance a proposal instead of acting.
    Propose,
    /// Raise to a human authority (covenant or scope problem).
    Escalate,
    /// The entity is winding down; stop attempting.
    Dissolve,
}

impl NextStep {
    pub fn as_str(self) -> &'static str {
        match self {
            NextStep::Wait => "wait",
            NextStep::Propose => "propose",
            NextStep::Escalate => "escalate",
            NextStep::Dissolve => "dissolve",
        }
    }
}

impl std::fmt::Display for NextStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A dignified, machine-actionable refusal.
///
/// `reference` is an opaque pointer into the policy or context that
/// produced the denial — it goes into the audit signal verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Refusal {
    pub reason: RefusalReason,
    pub reference: String,
    pub next_step: NextStep,
}

impl Refusal {
    pub fn new(reason: RefusalReason, reference: impl Into<String>, next_step: NextStep) -> Self {
        Self {
            reason,
            reference: reference.into(),
            next_step,
        }
    }
}
