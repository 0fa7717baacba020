//! Entity identity and state types.
//!
//! An AVOT is identified by a stable [`AvotId`] and carries two orthogonal
//! axes of governed state: a [`LifecycleState`] (where it is in its
//! provisioning → operation → dissolution arc) and a [`Maturity`] level
//! (how much competency/trust it has earned). Both are closed enumerations;
//! the permission policy matches on them exhaustively.

use serde::{Deserialize, Serialize};

/// Stable, human-readable identifier for an AVOT.
///
/// Used across registry entries, policy references, and every signal
/// appended to the ledger. Example: `AvotId("tyme-archivist")`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AvotId(pub String);

impl AvotId {
    /// Construct an id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw id string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AvotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Immutable identity of a provisioned AVOT.
///
/// Created once from the registry entry at provisioning time and never
/// mutated afterwards. `header_ref` points back at the declarative
/// definition the entity was provisioned from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvotIdentity {
    /// The entity's stable identifier.
    pub avot_id: AvotId,
    /// What the entity exists to do, if declared.
    pub purpose: Option<String>,
    /// The principal accountable for the entity's actions.
    pub steward: Option<String>,
    /// Pointer to the declarative definition (e.g. a registry entry id).
    pub header_ref: Option<String>,
}

/// Lifecycle stage of an AVOT, from provisioning through dissolution.
///
/// The stages are an ordered, closed set. Their exact semantics are policy
/// data — the engine only requires that transitions between them are
/// explicit, allow-list validated, and that the policy's terminal set is
/// absorbing.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum LifecycleState {
    S0,
    S1,
    S2,
    S3,
    S4,
    S5,
    S6,
    S7,
    S8,
    S9,
}

impl LifecycleState {
    /// Every lifecycle stage, in order. Used to prove policy totality.
    pub const ALL: [LifecycleState; 10] = [
        LifecycleState::S0,
        LifecycleState::S1,
        LifecycleState::S2,
        LifecycleState::S3,
        LifecycleState::S4,
        LifecycleState::S5,
        LifecycleState::S6,
        LifecycleState::S7,
        LifecycleState::S8,
        LifecycleState::S9,
    ];

    /// The stage name as it appears on the wire (`"S0"` … `"S9"`).
    pub fn as_str(self) -> &'static str {
        match self {
            LifecycleState::S0 => "S0",
            LifecycleState::S1 => "S1",
            LifecycleState::S2 => "S2",
            LifecycleState::S3 => "S3",
            LifecycleState::S4 => "S4",
            LifecycleState::S5 => "S5",
            LifecycleState::S6 => "S6",
            LifecycleState::S7 => "S7",
            LifecycleState::S8 => "S8",
            LifecycleState::S9 => "S9",
        }
    }
}

impl std::fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LifecycleState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| format!("unknown lifecycle state '{s}' (expected S0..S9)"))
    }
}

/// Competency/trust level of an AVOT, orthogonal to lifecycle.
///
/// Intended to be monotonically earned, though the engine does not enforce
/// monotonicity — maturity is registry data, changed by re-provisioning.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Maturity {
    M0,
    M1,
    M2,
    M3,
    M4,
}

impl Maturity {
    /// Every maturity level, in order. Used to prove policy totality.
    pub const ALL: [Maturity; 5] = [
        Maturity::M0,
        Maturity::M1,
        Maturity::M2,
        Maturity::M3,
        Maturity::M4,
    ];

    /// The level name as it appears on the wire (`"M0"` … `"M4"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Maturity::M0 => "M0",
            Maturity::M1 => "M1",
            Maturity::M2 => "M2",
            Maturity::M3 => "M3",
            Maturity::M4 => "M4",
        }
    }
}

impl std::fmt::Display for Maturity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Maturity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| format!("unknown maturity level '{s}' (expected M0..M4)"))
    }
}

/// The mutable governed state of one AVOT.
///
/// Owned exclusively by the governance engine instance responsible for the
/// entity. `binding == true` means the entity's proposals carry committing
/// force on the steward's behalf; `false` means advisory-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvotState {
    pub lifecycle: LifecycleState,
    pub maturity: Maturity,
    pub binding: bool,
}
