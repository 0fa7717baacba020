//! Action classification and permission verdict types.

use serde::{Deserialize, Serialize};

use crate::refusal::RefusalReason;

/// The closed set of action categories an AVOT may attempt.
///
/// Every intent classifies to exactly one of these. `Bind` is special:
/// it additionally requires the entity's `binding` flag, a hard gate the
/// permission policy checks before any table lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    /// Internal reasoning; no observable side effect. The least-privileged
    /// category and the classifier's safe fallback.
    Think,
    /// Outward, non-binding communication.
    Communicate,
    /// Performing an operation with observable effect.
    Execute,
    /// Committing resources on the steward's behalf.
    Bind,
    /// Advancing a non-binding proposal for someone else to act on.
    Propose,
}

impl ActionType {
    /// Every action type. Used to prove policy totality.
    pub const ALL: [ActionType; 5] = [
        ActionType::Think,
        ActionType::Communicate,
        ActionType::Execute,
        ActionType::Bind,
        ActionType::Propose,
    ];

    /// The wire name of this action type (`"think"`, `"bind"`, …).
    pub fn as_str(self) -> &'static str {
        match self {
            ActionType::Think => "think",
            ActionType::Communicate => "communicate",
            ActionType::Execute => "execute",
            ActionType::Bind => "bind",
            ActionType::Propose => "propose",
        }
    }
}

impl std::fmt::Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ActionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| format!("unknown action type '{s}'"))
    }
}

/// The decision a permission policy produces for one `(state, action)` pair.
///
/// Policies are total and deterministic: every combination of lifecycle,
/// maturity, binding flag, and action type yields exactly one verdict, and
/// the same inputs always yield the same verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// The attempt may proceed.
    Allow,

    /// The attempt is denied. The engine turns this into a [`Refusal`]
    /// with a policy-derived recommended next step.
    ///
    /// [`Refusal`]: crate::refusal::Refusal
    Deny {
        /// Why the policy said no.
        reason: RefusalReason,
        /// Opaque pointer to the policy clause that produced the denial,
        /// recorded for audit.
        reference: String,
    },
}
