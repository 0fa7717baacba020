//! Attempt outcomes: two success-shaped variants, never an error channel.
//!
//! "Refusal is a valid outcome, not an error" is the load-bearing design
//! decision of the whole engine. Callers pattern-match on
//! [`AttemptOutcome`]; `Result::Err` is reserved for operational failures
//! where no verdict could be determined at all.

use serde::{Deserialize, Serialize};

use crate::{action::ActionType, refusal::Refusal, signal::Signal};

/// The outcome of one call to the attempt pipeline.
///
/// Both variants carry the audit [`Signal`] the engine appended before
/// returning — the ledger write happens whether or not the caller ever
/// inspects it, because the ledger is the system of record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttemptOutcome {
    /// Policy allowed the attempt. The engine does not execute the
    /// underlying action — it only gates and records; acting is the
    /// caller's business.
    Proceeded {
        /// What the intent classified to.
        action: ActionType,
        /// The `action_attempted` signal appended to the ledger.
        signal: Signal,
    },

    /// Policy (or lifecycle, or scope) said no.
    Refused {
        /// What the intent classified to.
        action: ActionType,
        /// The structured refusal, including the recommended next step.
        refusal: Refusal,
        /// The `action_refused` signal appended to the ledger.
        signal: Signal,
    },
}

impl AttemptOutcome {
    /// True if the attempt may proceed.
    pub fn proceeded(&self) -> bool {
        matches!(self, AttemptOutcome::Proceeded { .. })
    }

    /// The refusal, if the attempt was refused.
    pub fn refusal(&self) -> Option<&Refusal> {
        match self {
            AttemptOutcome::Refused { refusal, .. } => Some(refusal),
            AttemptOutcome::Proceeded { .. } => None,
        }
    }

    /// The action type the intent classified to.
    pub fn action(&self) -> ActionType {
        match self {
            AttemptOutcome::Proceeded { action, .. } => *action,
            AttemptOutcome::Refused { action, .. } => *action,
        }
    }

    /// The audit signal recorded for this attempt.
    pub fn signal(&self) -> &Signal {
        match self {
            AttemptOutcome::Proceeded { signal, .. } => signal,
            AttemptOutcome::Refused { signal, .. } => signal,
        }
    }
}
