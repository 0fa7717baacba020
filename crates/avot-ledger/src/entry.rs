//! Ledger entry: a signal wrapped with its position in the hash chain.
//!
//! The [`Signal`] itself keeps exactly its wire shape; the chain fields
//! live one layer out, in the entry that wraps it. Modifying any field of
//! a stored entry — including fields of the embedded signal — invalidates
//! `this_hash` and every later `prev_hash`, which `verify_chain` detects.

use serde::{Deserialize, Serialize};

use avot_contracts::Signal;

/// One entry in a ledger's SHA-256 hash chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Monotonically increasing position in the chain, starting at 0.
    pub sequence: u64,

    /// The immutable signal this entry records.
    pub signal: Signal,

    /// SHA-256 hash (hex) of the previous entry, or [`GENESIS_HASH`] for
    /// the first.
    pub prev_hash: String,

    /// SHA-256 hash (hex) of this entry's canonical content, computed by
    /// [`hash_entry`](crate::chain::hash_entry).
    pub this_hash: String,
}

/// The sentinel `prev_hash` of the first entry in every chain.
///
/// 64 hex zeros — a value that can never be the SHA-256 of real data, so
/// genesis detection is unambiguous.
pub const GENESIS_HASH: &str =
    "0000000000000000000000000000000000000000000000000000000000000000";
