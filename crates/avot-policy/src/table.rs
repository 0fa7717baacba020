//! The deny-by-default permission table.
//!
//! Evaluation algorithm:
//!
//! 1. Consent hard gate: `bind` with `binding == false` is denied with
//!    reason `consent` before any rule is consulted. This is code, not
//!    table data — no rule set can grant binding force.
//! 2. Iterate rules in declaration order; the first rule whose lifecycle,
//!    maturity, and action patterns all match produces the verdict.
//! 3. No match → deny by default with reason `lifecycle`.
//!
//! Totality follows from the closed input enumerations plus the default
//! branch; determinism from the table being immutable after load.

use tracing::{debug, warn};

use avot_contracts::{
    ActionType, AvotState, GovernanceError, GovernanceResult, LifecycleState, Maturity,
    RefusalReason, Verdict,
};
use avot_core::traits::PermissionPolicy;

use crate::rule::{PermissionRule, RuleVerdict};

/// An immutable, ordered permission rule table.
///
/// Loaded once per entity at provisioning and never hot-swapped, so no
/// decision ever straddles two policy versions.
#[derive(Debug, Clone)]
pub struct PermissionTable {
    rules: Vec<PermissionRule>,
}

impl PermissionTable {
    /// Build a table from already-parsed rules, validating every pattern.
    pub fn new(rules: Vec<PermissionRule>) -> GovernanceResult<Self> {
        for rule in &rules {
            validate_pattern::<LifecycleState>(&rule.id, "lifecycle", &rule.lifecycle)?;
            validate_pattern::<Maturity>(&rule.id, "maturity", &rule.maturity)?;
            validate_pattern::<ActionType>(&rule.id, "action", &rule.action)?;
        }
        Ok(Self { rules })
    }

    /// The rules in evaluation order.
    pub fn rules(&self) -> &[PermissionRule] {
        &self.rules
    }
}

/// A non-wildcard pattern must name a member of the closed enumeration.
fn validate_pattern<T: std::str::FromStr>(
    rule_id: &str,
    field: &str,
    pattern: &str,
) -> GovernanceResult<()>
where
    T::Err: std::fmt::Display,
{
    if pattern == "*" {
        return Ok(());
    }
    pattern.parse::<T>().map_err(|e| GovernanceError::Config {
        reason: format!("rule '{rule_id}': invalid {field} pattern '{pattern}': {e}"),
    })?;
    Ok(())
}

impl PermissionPolicy for PermissionTable {
    fn evaluate(&self, state: &AvotState, action: ActionType) -> Verdict {
        // Consent hard gate, checked before the table.
        if action == ActionType::Bind && !state.binding {
            debug!(%action, "bind without binding force; consent gate denies");
            return Verdict::Deny {
                reason: RefusalReason::Consent,
                reference: "consent: binding force not granted".to_string(),
            };
        }

        for rule in &self.rules {
            if !rule.matches(state, action) {
                continue;
            }

            debug!(rule_id = %rule.id, %action, lifecycle = %state.lifecycle, "rule matched");

            return match rule.verdict {
                RuleVerdict::Allow => Verdict::Allow,
                RuleVerdict::Deny => Verdict::Deny {
                    reason: rule.deny_reason.unwrap_or(RefusalReason::Lifecycle),
                    reference: rule
                        .reference
                        .clone()
                        .unwrap_or_else(|| format!("denied by rule '{}'", rule.id)),
                },
            };
        }

        warn!(
            %action,
            lifecycle = %state.lifecycle,
            maturity = %state.maturity,
            "no permission rule matched; denying by default"
        );

        Verdict::Deny {
            reason: RefusalReason::Lifecycle,
            reference: format!(
                "permissions: no rule matched '{action}' at ({}, {})",
                state.lifecycle, state.maturity
            ),
        }
    }
}
