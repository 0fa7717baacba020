//! # avot-policy
//!
//! TOML-driven governance policy for AVOT entities: the deny-by-default
//! permission table, the keyword action classifier, and the lifecycle
//! transition allow-list.
//!
//! ## Overview
//!
//! A single TOML document carries all three policy artifacts:
//!
//! ```toml
//! [[rules]]
//! id = "propose-anywhere"
//! description = "Proposals are non-binding and allowed at any stage"
//! lifecycle = "*"
//! maturity = "*"
//! action = "propose"
//! verdict = "allow"
//!
//! [classifier]
//! propose = ["propose", "suggest", "request"]
//!
//! [lifecycle]
//! terminal = ["S8", "S9"]
//! transitions = [{ from = "S0", to = "S1" }]
//! ```
//!
//! [`GovernancePolicy::from_file`] loads and validates the document once;
//! the resulting tables are immutable for the lifetime of the entity's
//! in-memory state (reload requires re-provisioning).
//!
//! ## Rule matching
//!
//! Rules are applied in declaration order; the first rule whose
//! `lifecycle`, `maturity`, and `action` patterns all match wins. Each
//! pattern is an exact wire name or the wildcard `"*"`. If no rule
//! matches, the request is denied. The `bind`-without-binding-force
//! consent gate is checked in code before any rule.

pub mod classify;
pub mod rule;
pub mod table;
pub mod transition;

pub use classify::KeywordClassifier;
pub use rule::{LifecycleSection, PermissionRule, PolicyDocument, RuleVerdict, TransitionEdge};
pub use table::PermissionTable;
pub use transition::TransitionTable;

use std::path::Path;

use avot_contracts::{GovernanceError, GovernanceResult};

/// The baseline governance policy: reflective and advisory actions are
/// allowed everywhere, effectful actions only in the operational stages.
const BASELINE_POLICY: &str = r#"
[[rules]]
id = "think-anywhere"
description = "Internal reasoning has no side effects"
lifecycle = "*"
maturity = "*"
action = "think"
verdict = "allow"

[[rules]]
id = "communicate-anywhere"
description = "Non-binding communication is allowed at any stage"
lifecycle = "*"
maturity = "*"
action = "communicate"
verdict = "allow"

[[rules]]
id = "propose-anywhere"
description = "Proposals are advisory and allowed at any stage"
lifecycle = "*"
maturity = "*"
action = "propose"
verdict = "allow"

[[rules]]
id = "execute-operational-s3"
description = "Execution is reserved for the operational stages"
lifecycle = "S3"
maturity = "*"
action = "execute"
verdict = "allow"

[[rules]]
id = "execute-operational-s4"
description = "Execution is reserved for the operational stages"
lifecycle = "S4"
maturity = "*"
action = "execute"
verdict = "allow"

[[rules]]
id = "execute-operational-s5"
description = "Execution is reserved for the operational stages"
lifecycle = "S5"
maturity = "*"
action = "execute"
verdict = "allow"

[[rules]]
id = "bind-operational-s3"
description = "Binding commitments are reserved for the operational stages"
lifecycle = "S3"
maturity = "*"
action = "bind"
verdict = "allow"

[[rules]]
id = "bind-operational-s4"
description = "Binding commitments are reserved for the operational stages"
lifecycle = "S4"
maturity = "*"
action = "bind"
verdict = "allow"

[[rules]]
id = "bind-operational-s5"
description = "Binding commitments are reserved for the operational stages"
lifecycle = "S5"
maturity = "*"
action = "bind"
verdict = "allow"

[lifecycle]
terminal = ["S8", "S9"]
transitions = [
    { from = "S0", to = "S1" },
    { from = "S1", to = "S2" },
    { from = "S2", to = "S3" },
    { from = "S3", to = "S4" },
    { from = "S4", to = "S5" },
    { from = "S5", to = "S6" },
    { from = "S6", to = "S7" },
    { from = "S7", to = "S8" },
]
"#;

/// The complete, validated policy artifact for one entity.
///
/// All three components are loaded from one document and validated
/// together, so a policy that parses is also total and internally
/// consistent (patterns name real enum members, terminal states have no
/// outgoing transitions, classifier actions exist).
#[derive(Debug, Clone)]
pub struct GovernancePolicy {
    pub permissions: PermissionTable,
    pub classifier: KeywordClassifier,
    pub transitions: TransitionTable,
}

impl GovernancePolicy {
    /// Parse `s` as a TOML policy document and validate every section.
    pub fn from_toml_str(s: &str) -> GovernanceResult<Self> {
        let document: PolicyDocument =
            toml::from_str(s).map_err(|e| GovernanceError::Config {
                reason: format!("failed to parse policy TOML: {e}"),
            })?;

        Ok(Self {
            permissions: PermissionTable::new(document.rules)?,
            classifier: KeywordClassifier::from_config(&document.classifier)?,
            transitions: TransitionTable::from_section(&document.lifecycle)?,
        })
    }

    /// Read the file at `path` and parse it as a policy document.
    pub fn from_file(path: &Path) -> GovernanceResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| GovernanceError::Config {
            reason: format!("failed to read policy file '{}': {e}", path.display()),
        })?;
        Self::from_toml_str(&contents)
    }

    /// The built-in baseline policy. Fixed data; cannot fail to parse.
    pub fn baseline() -> Self {
        Self::from_toml_str(BASELINE_POLICY)
            .unwrap_or_else(|e| unreachable!("baseline policy must be valid: {e}"))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
