//! Hash-chain primitives: entry hashing and chain verification.
//!
//! Hash input layout (bytes, in order):
//!   1. sequence as 8-byte little-endian
//!   2. prev_hash as UTF-8 bytes (64 ASCII hex chars)
//!   3. canonical JSON of the signal (serde_json, no pretty-printing)

use sha2::{Digest, Sha256};

use avot_contracts::Signal;

use crate::entry::{LedgerEntry, GENESIS_HASH};

/// Compute the SHA-256 hash for one ledger entry.
///
/// Commits to the entry's position (`sequence`), its link to the previous
/// entry (`prev_hash`), and the full signal. Returns a lowercase
/// 64-character hex string.
///
/// # Panics
///
/// Panics if `signal` cannot be serialized to JSON — which cannot happen
/// for the well-formed `Signal` type.
pub fn hash_entry(sequence: u64, prev_hash: &str, signal: &Signal) -> String {
    let signal_json =
        serde_json::to_vec(signal).expect("Signal must always be serializable to JSON");

    let mut hasher = Sha256::new();
    hasher.update(sequence.to_le_bytes());
    hasher.update(prev_hash.as_bytes());
    hasher.update(&signal_json);

    hex::encode(hasher.finalize())
}

/// Verify the integrity of a ledger chain.
///
/// Valid means both rules hold for every entry:
///
/// 1. **Prev-hash linkage** — each entry's `prev_hash` equals the
///    `this_hash` of the preceding entry (or `GENESIS_HASH` for entry 0).
/// 2. **Hash correctness** — each entry's `this_hash` matches the value
///    recomputed from its own fields.
///
/// An empty chain is trivially valid.
pub fn verify_chain(entries: &[LedgerEntry]) -> bool {
    let mut expected_prev = GENESIS_HASH.to_string();

    for entry in entries {
        if entry.prev_hash != expected_prev {
            return false;
        }

        let recomputed = hash_entry(entry.sequence, &entry.prev_hash, &entry.signal);
        if entry.this_hash != recomputed {
            return false;
        }

        expected_prev = entry.this_hash.clone();
    }

    true
}
