//! The governance engine: the per-entity authority that gates and records.
//!
//! The engine enforces the attempt pipeline:
//!
//!   classify → load state → scope check → terminal check → evaluate → append → verdict
//!
//! Two invariants are enforced structurally:
//!
//! - A verdict is never returned before its audit signal is durably
//!   appended. If the append fails, the caller gets the ledger error, not
//!   a verdict (write-before-respond).
//! - The read-evaluate-append region runs under the entity's state lock,
//!   so no attempt ever observes a lifecycle state that a concurrent
//!   transition makes stale before the signal lands. Engines for
//!   different entities share nothing but the ledger and proceed
//!   independently.

use std::sync::{Arc, Mutex, PoisonError};

use serde_json::json;
use tracing::{debug, info, warn};

use avot_contracts::{
    ActionType, AttemptOutcome, AvotId, AvotIdentity, AvotState, GovernanceError,
    GovernanceResult, LifecycleState, NewSignal, NextStep, Refusal, RefusalReason, Severity,
    Signal, Verdict,
};

use crate::traits::{ActionClassifier, LedgerStore, PermissionPolicy, RegistryStore, TransitionPolicy};

// ── Signal discriminants the engine emits ─────────────────────────────────────

/// Appended for every attempt the policy allowed.
pub const SIGNAL_ACTION_ATTEMPTED: &str = "action_attempted";
/// Appended for every attempt that was refused.
pub const SIGNAL_ACTION_REFUSED: &str = "action_refused";
/// Appended when a lifecycle transition commits.
pub const SIGNAL_LIFECYCLE_TRANSITION: &str = "lifecycle_transition";
/// Appended when a lifecycle transition request is rejected.
pub const SIGNAL_LIFECYCLE_REJECTED: &str = "lifecycle_rejected";

// ── Next-step derivation ──────────────────────────────────────────────────────

/// The policy-derived recommendation accompanying a refusal.
///
/// Terminal-state refusals are handled separately and always carry
/// [`NextStep::Dissolve`]; this mapping covers every other denial.
pub fn recommended_next_step(reason: RefusalReason) -> NextStep {
    match reason {
        // The stage is too early; the action may become legal later.
        RefusalReason::Lifecycle => NextStep::Wait,
        // Missing binding force: advance a proposal instead.
        RefusalReason::Consent => NextStep::Propose,
        // A covenant breach or an unconfigured entity needs a human.
        RefusalReason::Covenant | RefusalReason::Scope => NextStep::Escalate,
        RefusalReason::Unknown => NextStep::Wait,
    }
}

// ── Engine ────────────────────────────────────────────────────────────────────

/// The single authority for one AVOT's governed state.
///
/// Exactly one engine instance owns an entity's state at a time; a higher
/// layer (leasing, supervision) enforces single ownership across
/// processes. Within the instance, the state `Mutex` serializes
/// transitions and the attempt pipeline against each other.
pub struct GovernanceEngine {
    identity: AvotIdentity,
    /// `None` means the registry held no entry for this id: the entity is
    /// unconfigured and every attempt refuses with `scope`.
    state: Mutex<Option<AvotState>>,
    policy: Arc<dyn PermissionPolicy>,
    classifier: Arc<dyn ActionClassifier>,
    transitions: Arc<dyn TransitionPolicy>,
    ledger: Arc<dyn LedgerStore>,
}

impl GovernanceEngine {
    /// Provision an engine for `avot_id` from the registry.
    ///
    /// The registry entry is read exactly once; the resulting identity and
    /// state are immutable/engine-owned from here on. A registry read
    /// failure propagates as `Err(RegistryRead)` — it is never treated as
    /// "unknown entity". An id the registry does not hold produces an
    /// *unconfigured* engine whose attempts all refuse with `scope`.
    pub fn provision(
        avot_id: AvotId,
        registry: &dyn RegistryStore,
        policy: Arc<dyn PermissionPolicy>,
        classifier: Arc<dyn ActionClassifier>,
        transitions: Arc<dyn TransitionPolicy>,
        ledger: Arc<dyn LedgerStore>,
    ) -> GovernanceResult<Self> {
        let entry = registry.entry(&avot_id)?;

        let (identity, state) = match entry {
            Some(entry) => {
                let identity = entry.identity(&avot_id);
                let state = entry.initial_state();
                info!(
                    avot_id = %avot_id,
                    lifecycle = %state.lifecycle,
                    maturity = %state.maturity,
                    binding = state.binding,
                    "provisioned governance engine"
                );
                (identity, Some(state))
            }
            None => {
                warn!(avot_id = %avot_id, "no registry entry; provisioning unconfigured engine");
                let identity = AvotIdentity {
                    avot_id: avot_id.clone(),
                    purpose: None,
                    steward: None,
                    header_ref: None,
                };
                (identity, None)
            }
        };

        Ok(Self {
            identity,
            state: Mutex::new(state),
            policy,
            classifier,
            transitions,
            ledger,
        })
    }

    // ── Identity & state queries ──────────────────────────────────────────────

    /// The entity's immutable identity. Pure read; appends nothing.
    pub fn identify(&self) -> AvotIdentity {
        self.identity.clone()
    }

    /// The entity's current governed state, or `None` if unconfigured.
    /// Pure read; appends nothing.
    pub fn state(&self) -> Option<AvotState> {
        *self.lock_state()
    }

    /// The entity's id.
    pub fn avot_id(&self) -> &AvotId {
        &self.identity.avot_id
    }

    // ── Attempt pipeline ──────────────────────────────────────────────────────

    /// Decide whether the entity may attempt `intent`, and record the
    /// decision.
    ///
    /// The engine never executes the underlying action — it classifies,
    /// gates, appends the audit signal, and returns the verdict. A refusal
    /// is a normal [`AttemptOutcome`]; `Err` means the verdict could not
    /// be determined or could not be recorded.
    pub fn attempt(&self, intent: &str) -> GovernanceResult<AttemptOutcome> {
        // Classification is pure and happens before any gate, so even an
        // unparseable intent flows through permission checking as Think.
        let action = self.classifier.classify(intent);

        // Hold the lock across read-evaluate-append: the verdict and its
        // signal must observe the same state.
        let guard = self.lock_state();

        let state = match *guard {
            Some(state) => state,
            None => {
                debug!(avot_id = %self.identity.avot_id, %action, "attempt by unconfigured entity");
                let refusal = Refusal::new(
                    RefusalReason::Scope,
                    format!("registry: no entry for '{}'", self.identity.avot_id),
                    recommended_next_step(RefusalReason::Scope),
                );
                return self.refuse(intent, action, None, refusal);
            }
        };

        if self.transitions.is_terminal(state.lifecycle) {
            debug!(
                avot_id = %self.identity.avot_id,
                lifecycle = %state.lifecycle,
                %action,
                "attempt in terminal lifecycle state"
            );
            let refusal = Refusal::new(
                RefusalReason::Lifecycle,
                format!("lifecycle: {} is terminal", state.lifecycle),
                NextStep::Dissolve,
            );
            return self.refuse(intent, action, Some(state), refusal);
        }

        match self.policy.evaluate(&state, action) {
            Verdict::Allow => {
                debug!(
                    avot_id = %self.identity.avot_id,
                    %action,
                    lifecycle = %state.lifecycle,
                    "attempt allowed"
                );

                let request = NewSignal::new(
                    self.identity.avot_id.clone(),
                    SIGNAL_ACTION_ATTEMPTED,
                    format!("attempt permitted: {action}"),
                )
                .with_context(json!({
                    "intent": intent,
                    "action": action,
                    "lifecycle": state.lifecycle,
                    "maturity": state.maturity,
                    "binding": state.binding,
                }));

                // Write-before-respond: a failed append surfaces as the
                // error, never as a fabricated Proceeded.
                let signal = self.ledger.append(request)?;
                Ok(AttemptOutcome::Proceeded { action, signal })
            }

            Verdict::Deny { reason, reference } => {
                warn!(
                    avot_id = %self.identity.avot_id,
                    %action,
                    %reason,
                    reference = %reference,
                    "attempt denied by policy"
                );
                let refusal = Refusal::new(reason, reference, recommended_next_step(reason));
                self.refuse(intent, action, Some(state), refusal)
            }
        }
    }

    /// Append the `action_refused` signal and wrap the refusal.
    fn refuse(
        &self,
        intent: &str,
        action: ActionType,
        state: Option<AvotState>,
        refusal: Refusal,
    ) -> GovernanceResult<AttemptOutcome> {
        let context = json!({
            "intent": intent,
            "action": action,
            "reason": refusal.reason,
            "reference": refusal.reference,
            "next_step": refusal.next_step,
            "lifecycle": state.map(|s| s.lifecycle),
        });

        let request = NewSignal::new(
            self.identity.avot_id.clone(),
            SIGNAL_ACTION_REFUSED,
            format!("attempt refused: {action} ({})", refusal.reason),
        )
        .with_severity(Severity::Medium)
        .with_context(context);

        let signal = self.ledger.append(request)?;
        Ok(AttemptOutcome::Refused {
            action,
            refusal,
            signal,
        })
    }

    // ── Lifecycle transitions ─────────────────────────────────────────────────

    /// Request an explicit lifecycle transition to `to`.
    ///
    /// Validated against the transition allow-list as one atomic unit with
    /// the commit. A rejected request appends a `lifecycle_rejected`
    /// signal, leaves state untouched, and returns `Err(Lifecycle)`.
    /// A committed transition appends `lifecycle_transition` *before* the
    /// state mutation becomes visible, so every committed transition has a
    /// durable record.
    pub fn transition(&self, to: LifecycleState) -> GovernanceResult<LifecycleState> {
        let mut guard = self.lock_state();

        let state = guard.as_mut().ok_or_else(|| GovernanceError::UnknownEntity {
            avot_id: self.identity.avot_id.clone(),
        })?;
        let from = state.lifecycle;

        let rejection = if self.transitions.is_terminal(from) {
            Some(format!("{from} is terminal; no further transitions"))
        } else if !self.transitions.is_allowed(from, to) {
            Some(format!("transition {from} -> {to} is not on the allow-list"))
        } else {
            None
        };

        if let Some(reason) = rejection {
            warn!(avot_id = %self.identity.avot_id, %from, %to, %reason, "lifecycle transition rejected");

            let request = NewSignal::new(
                self.identity.avot_id.clone(),
                SIGNAL_LIFECYCLE_REJECTED,
                format!("transition rejected: {from} -> {to}"),
            )
            .with_severity(Severity::High)
            .with_context(json!({ "from": from, "to": to, "reason": reason }));
            self.ledger.append(request)?;

            return Err(GovernanceError::Lifecycle { reason });
        }

        let request = NewSignal::new(
            self.identity.avot_id.clone(),
            SIGNAL_LIFECYCLE_TRANSITION,
            format!("lifecycle transition: {from} -> {to}"),
        )
        .with_context(json!({ "from": from, "to": to }));
        self.ledger.append(request)?;

        state.lifecycle = to;
        info!(avot_id = %self.identity.avot_id, %from, %to, "lifecycle transition committed");
        Ok(to)
    }

    // ── Voluntary signal emission ─────────────────────────────────────────────

    /// Emit a voluntary, non-binding signal on the entity's behalf.
    ///
    /// Emission is observability, not an action type: it is never gated by
    /// the permission policy and never touches the state lock. It succeeds
    /// whenever the ledger is reachable; a store failure is
    /// `Err(LedgerWrite)`, not a refusal.
    pub fn emit(
        &self,
        signal_type: &str,
        description: &str,
        severity: Severity,
        context: serde_json::Value,
        metadata: serde_json::Value,
    ) -> GovernanceResult<Signal> {
        let request = NewSignal {
            avot_id: self.identity.avot_id.clone(),
            signal_type: signal_type.to_string(),
            description: description.to_string(),
            severity,
            context,
            metadata,
        };
        self.ledger.append(request)
    }

    // ── Internals ─────────────────────────────────────────────────────────────

    /// A poisoned lock only means another thread panicked mid-query; the
    /// state itself is a plain value and stays coherent, so recover it.
    fn lock_state(&self) -> std::sync::MutexGuard<'_, Option<AvotState>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
