//! Signal types: the immutable audit records of the ledger.
//!
//! A [`Signal`] is the only durable trace of an engine decision or an
//! entity-initiated event. The ledger store assigns `signal_id` and
//! `timestamp` at append time; everything else arrives in a [`NewSignal`]
//! request. Once appended, a signal is never modified or deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::AvotId;

/// Globally unique signal identifier, rendered as `SIG-<uuid>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SignalId(pub uuid::Uuid);

impl SignalId {
    /// Generate a fresh, globally unique id.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for SignalId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SignalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SIG-{}", self.0)
    }
}

/// How urgent a signal is for whoever reads the ledger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    #[default]
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One immutable entry in the signal ledger.
///
/// `signal_type` is an open discriminant string — the engine itself emits
/// `"action_attempted"`, `"action_refused"`, `"lifecycle_transition"`, and
/// `"lifecycle_rejected"`; entities may emit anything (e.g.
/// `"status_update"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    /// Globally unique id, assigned by the ledger store at append time.
    pub signal_id: SignalId,
    /// The entity this signal belongs to.
    pub avot_id: AvotId,
    /// Discriminant string for the kind of event recorded.
    pub signal_type: String,
    /// Wall-clock emission time (UTC, ISO-8601 on the wire), assigned by
    /// the ledger store.
    pub timestamp: DateTime<Utc>,
    pub severity: Severity,
    /// Human-readable account of what happened.
    pub description: String,
    /// Structured context for the event (verdicts, references, intents).
    pub context: serde_json::Value,
    /// Free-form supplementary metadata.
    pub metadata: serde_json::Value,
}

/// An append request: everything the ledger store does not assign itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSignal {
    pub avot_id: AvotId,
    pub signal_type: String,
    pub description: String,
    pub severity: Severity,
    pub context: serde_json::Value,
    pub metadata: serde_json::Value,
}

impl NewSignal {
    /// Build a request with default severity (`low`) and empty
    /// context/metadata objects.
    pub fn new(
        avot_id: AvotId,
        signal_type: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            avot_id,
            signal_type: signal_type.into(),
            description: description.into(),
            severity: Severity::default(),
            context: serde_json::json!({}),
            metadata: serde_json::json!({}),
        }
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn with_context(mut self, context: serde_json::Value) -> Self {
        self.context = context;
        self
    }

    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = metadata;
        self
    }
}
