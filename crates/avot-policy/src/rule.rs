//! Permission rule types and the TOML policy document schema.
//!
//! A policy document holds an ordered list of `[[rules]]`, a `[classifier]`
//! keyword table, and a `[lifecycle]` transition section. Rules are
//! evaluated in declaration order — the first matching rule wins. If no
//! rule matches, the table denies by default.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use avot_contracts::{ActionType, AvotState, RefusalReason};

/// The decision a rule produces when it matches.
///
/// Expressed as a plain lowercase string in TOML:
/// ```toml
/// verdict = "allow"
/// verdict = "deny"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleVerdict {
    Allow,
    Deny,
}

/// A single permission rule loaded from TOML.
///
/// `lifecycle`, `maturity`, and `action` are match patterns: either the
/// exact wire name (`"S3"`, `"M1"`, `"execute"`) or the wildcard `"*"`.
/// Patterns are validated against the closed enumerations at load time, so
/// a typo fails fast instead of silently never matching.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionRule {
    /// Stable identifier, used as the refusal reference when no explicit
    /// one is configured.
    pub id: String,

    /// Human-readable explanation of what this rule governs.
    pub description: String,

    /// Lifecycle stage pattern (`"S0"`..`"S9"` or `"*"`).
    pub lifecycle: String,

    /// Maturity level pattern (`"M0"`..`"M4"` or `"*"`).
    pub maturity: String,

    /// Action type pattern (`"think"`, …, or `"*"`).
    pub action: String,

    /// The decision this rule produces when it matches.
    pub verdict: RuleVerdict,

    /// Refusal reason when `verdict = "deny"`. Defaults to `lifecycle`.
    pub deny_reason: Option<RefusalReason>,

    /// Opaque audit pointer carried into the refusal. Defaults to a
    /// reference naming the rule id.
    pub reference: Option<String>,
}

impl PermissionRule {
    /// Return true if this rule matches the given state and action.
    pub fn matches(&self, state: &AvotState, action: ActionType) -> bool {
        let lifecycle_matches =
            self.lifecycle == "*" || self.lifecycle == state.lifecycle.as_str();
        let maturity_matches = self.maturity == "*" || self.maturity == state.maturity.as_str();
        let action_matches = self.action == "*" || self.action == action.as_str();
        lifecycle_matches && maturity_matches && action_matches
    }
}

/// One explicit `(from, to)` edge of the lifecycle transition allow-list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionEdge {
    pub from: String,
    pub to: String,
}

/// The `[lifecycle]` section: terminal set and transition allow-list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LifecycleSection {
    /// Stage names of terminal (absorbing) states.
    #[serde(default)]
    pub terminal: Vec<String>,

    /// Explicit transition edges. Anything not listed is rejected.
    #[serde(default)]
    pub transitions: Vec<TransitionEdge>,
}

/// The top-level structure deserialized from a governance policy TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PolicyDocument {
    /// Ordered permission rules. First match wins; no match denies.
    #[serde(default)]
    pub rules: Vec<PermissionRule>,

    /// Keyword table for the action classifier: action name → keywords.
    /// Empty means the built-in defaults apply.
    #[serde(default)]
    pub classifier: BTreeMap<String, Vec<String>>,

    /// Lifecycle transition allow-list and terminal set.
    #[serde(default)]
    pub lifecycle: LifecycleSection,
}
