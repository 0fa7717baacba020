//! Operational error types for the governance engine.
//!
//! These are the failures where the engine could not even determine a
//! verdict. Policy denials are NOT here — a refusal is a normal outcome
//! and travels on the success channel as
//! [`AttemptOutcome::Refused`](crate::outcome::AttemptOutcome).

use thiserror::Error;

use crate::entity::AvotId;

/// The unified operational error type for the AVOT governance crates.
#[derive(Debug, Error)]
pub enum GovernanceError {
    /// The registry could not be read or parsed. Never conflated with
    /// "unknown entity" — an unreadable registry is an outage, not an
    /// empty lookup.
    #[error("registry read failed: {reason}")]
    RegistryRead { reason: String },

    /// The signal ledger could not be read.
    #[error("ledger read failed: {reason}")]
    LedgerRead { reason: String },

    /// The signal ledger could not be appended to.
    ///
    /// Fatal for the attempt pipeline: a verdict whose audit record could
    /// not be written is reported as this error, never as a verdict.
    #[error("ledger write failed: {reason}")]
    LedgerWrite { reason: String },

    /// An invalid lifecycle transition was requested, or a transition was
    /// requested on a terminal (absorbing) state.
    #[error("lifecycle error: {reason}")]
    Lifecycle { reason: String },

    /// The caller demanded a configured entity that the registry does not
    /// hold. The attempt pipeline itself never raises this — it refuses
    /// with `scope` instead.
    #[error("unknown entity '{avot_id}'")]
    UnknownEntity { avot_id: AvotId },

    /// A policy or registry configuration is missing, malformed, or fails
    /// load-time validation.
    #[error("configuration error: {reason}")]
    Config { reason: String },
}

/// Convenience alias used throughout the AVOT crates.
pub type GovernanceResult<T> = Result<T, GovernanceError>;
