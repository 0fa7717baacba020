//! Registry entry: the configured attributes of one AVOT.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::entity::{AvotId, AvotIdentity, AvotState, LifecycleState, Maturity};

/// Everything the registry knows about one AVOT.
///
/// A registry lookup returns this mapping as an immutable snapshot; the
/// engine splits it into an [`AvotIdentity`] (never mutated) and an initial
/// [`AvotState`] (owned by the engine thereafter). Reload requires
/// re-provisioning — there is no hot-swap, so no decision ever straddles
/// two policy versions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryEntry {
    #[serde(default)]
    pub purpose: Option<String>,
    #[serde(default)]
    pub steward: Option<String>,
    #[serde(default)]
    pub header_ref: Option<String>,
    pub lifecycle_state: LifecycleState,
    pub maturity: Maturity,
    /// Whether the entity's proposals carry binding force. Absent means
    /// advisory-only.
    #[serde(default)]
    pub binding: bool,
    /// Any further configured attributes (declared capabilities, policy
    /// overrides). Captured by flattening, so unrecognized keys in an
    /// entry land here instead of being dropped; the engine carries them
    /// opaquely.
    #[serde(flatten)]
    pub attributes: BTreeMap<String, serde_json::Value>,
}

impl RegistryEntry {
    /// The immutable identity this entry provisions.
    pub fn identity(&self, avot_id: &AvotId) -> AvotIdentity {
        AvotIdentity {
            avot_id: avot_id.clone(),
            purpose: self.purpose.clone(),
            steward: self.steward.clone(),
            header_ref: self.header_ref.clone(),
        }
    }

    /// The initial governed state this entry provisions.
    pub fn initial_state(&self) -> AvotState {
        AvotState {
            lifecycle: self.lifecycle_state,
            maturity: self.maturity,
            binding: self.binding,
        }
    }
}
