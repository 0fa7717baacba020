//! In-memory implementation of `LedgerStore`.
//!
//! The reference implementation: all entries in a `Vec` behind a `Mutex`,
//! which also gives the per-entity append ordering guarantee — appends are
//! serialized store-wide, so each entity's signals are totally ordered.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use tracing::debug;

use avot_contracts::{
    AvotId, GovernanceError, GovernanceResult, NewSignal, Signal, SignalId,
};
use avot_core::traits::LedgerStore;

use crate::{
    chain::{hash_entry, verify_chain},
    entry::{LedgerEntry, GENESIS_HASH},
};

// ── Internal mutable state ────────────────────────────────────────────────────

struct LedgerState {
    /// All entries written so far, in append order.
    entries: Vec<LedgerEntry>,
    /// The next sequence number to assign.
    sequence: u64,
    /// `this_hash` of the last entry, or `GENESIS_HASH` before any entry.
    last_hash: String,
}

// ── Public store ──────────────────────────────────────────────────────────────

/// An in-memory, append-only signal ledger backed by a SHA-256 hash chain.
///
/// Cloning shares the underlying chain — engines for different entities
/// can hold clones and append to one logical ledger.
#[derive(Clone)]
pub struct InMemoryLedger {
    state: Arc<Mutex<LedgerState>>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(LedgerState {
                entries: Vec::new(),
                sequence: 0,
                last_hash: GENESIS_HASH.to_string(),
            })),
        }
    }

    /// All chain entries, in append order.
    pub fn entries(&self) -> Vec<LedgerEntry> {
        self.state.lock().expect("ledger state lock poisoned").entries.clone()
    }

    /// Verify the in-memory chain has not been tampered with.
    pub fn verify_integrity(&self) -> bool {
        let state = self.state.lock().expect("ledger state lock poisoned");
        verify_chain(&state.entries)
    }

    #[cfg(test)]
    pub(crate) fn tamper_with(&self, index: usize, description: &str) {
        let mut state = self.state.lock().unwrap();
        state.entries[index].signal.description = description.to_string();
    }
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl LedgerStore for InMemoryLedger {
    /// Append one signal, assigning its id and timestamp.
    ///
    /// Returns `Err(LedgerWrite)` only if the internal mutex is poisoned,
    /// which cannot happen under normal operation.
    fn append(&self, request: NewSignal) -> GovernanceResult<Signal> {
        let mut state = self.state.lock().map_err(|e| GovernanceError::LedgerWrite {
            reason: format!("ledger state lock poisoned: {e}"),
        })?;

        let signal = Signal {
            signal_id: SignalId::new(),
            avot_id: request.avot_id,
            signal_type: request.signal_type,
            timestamp: Utc::now(),
            severity: request.severity,
            description: request.description,
            context: request.context,
            metadata: request.metadata,
        };

        let sequence = state.sequence;
        let prev_hash = state.last_hash.clone();
        let this_hash = hash_entry(sequence, &prev_hash, &signal);

        debug!(
            signal_id = %signal.signal_id,
            avot_id = %signal.avot_id,
            signal_type = %signal.signal_type,
            sequence,
            "signal appended"
        );

        state.entries.push(LedgerEntry {
            sequence,
            signal: signal.clone(),
            prev_hash,
            this_hash: this_hash.clone(),
        });
        state.sequence += 1;
        state.last_hash = this_hash;

        Ok(signal)
    }

    fn read(&self, avot_id: Option<&AvotId>) -> GovernanceResult<Vec<Signal>> {
        let state = self.state.lock().map_err(|e| GovernanceError::LedgerRead {
            reason: format!("ledger state lock poisoned: {e}"),
        })?;

        Ok(state
            .entries
            .iter()
            .map(|entry| &entry.signal)
            .filter(|signal| avot_id.is_none_or(|id| &signal.avot_id == id))
            .cloned()
            .collect())
    }
}
