//! # avot-ledger
//!
//! Append-only, SHA-256 hash-chained signal ledger stores.
//!
//! ## Overview
//!
//! The ledger is the system of record for everything the governance
//! engine decides and everything an entity voluntarily emits. Both
//! implementations wrap each [`Signal`](avot_contracts::Signal) in a
//! [`LedgerEntry`] that links to the previous entry via its SHA-256 hash:
//! tampering with any stored signal — even a single byte — breaks the
//! chain and is detected by [`verify_chain`].
//!
//! ## Usage
//!
//! ```rust,ignore
//! use avot_ledger::{InMemoryLedger, JsonlLedger};
//! use avot_core::traits::LedgerStore;
//!
//! let ledger = JsonlLedger::create("signals.jsonl")?;
//! let signal = ledger.append(NewSignal::new(avot_id, "status_update", "ok"))?;
//! assert!(ledger.verify_integrity()?);
//! ```

pub mod chain;
pub mod entry;
pub mod jsonl;
pub mod memory;

pub use chain::{hash_entry, verify_chain};
pub use entry::{LedgerEntry, GENESIS_HASH};
pub use jsonl::JsonlLedger;
pub use memory::InMemoryLedger;

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use avot_contracts::{AvotId, GovernanceError, NewSignal, Severity};
    use avot_core::traits::LedgerStore;

    use super::{verify_chain, InMemoryLedger, JsonlLedger, GENESIS_HASH};

    fn request(avot: &str, n: usize) -> NewSignal {
        NewSignal::new(AvotId::new(avot), "status_update", format!("update {n}"))
            .with_context(serde_json::json!({ "n": n }))
    }

    // ── Append-only law ───────────────────────────────────────────────────────

    /// After N appends, read returns exactly those N signals in append
    /// order, and nothing earlier has been altered.
    #[test]
    fn test_append_only_law() {
        let ledger = InMemoryLedger::new();
        let avot = AvotId::new("avot-a");

        let mut appended = Vec::new();
        for n in 0..5 {
            appended.push(ledger.append(request("avot-a", n)).unwrap());
        }

        let read = ledger.read(Some(&avot)).unwrap();
        assert_eq!(read.len(), 5);
        for (returned, stored) in appended.iter().zip(&read) {
            assert_eq!(returned, stored);
        }

        assert!(ledger.verify_integrity());
    }

    #[test]
    fn test_store_assigns_fresh_unique_ids() {
        let ledger = InMemoryLedger::new();
        let ids: std::collections::HashSet<String> = (0..50)
            .map(|n| ledger.append(request("avot-a", n)).unwrap().signal_id.to_string())
            .collect();
        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn test_per_entity_reads_preserve_order() {
        let ledger = InMemoryLedger::new();
        for n in 0..6 {
            let avot = if n % 2 == 0 { "avot-a" } else { "avot-b" };
            ledger.append(request(avot, n)).unwrap();
        }

        let a = ledger.read(Some(&AvotId::new("avot-a"))).unwrap();
        assert_eq!(a.len(), 3);
        assert_eq!(a[0].context["n"], 0);
        assert_eq!(a[1].context["n"], 2);
        assert_eq!(a[2].context["n"], 4);

        let all = ledger.read(None).unwrap();
        assert_eq!(all.len(), 6);
    }

    // ── Hash chain ────────────────────────────────────────────────────────────

    #[test]
    fn test_first_entry_links_to_genesis() {
        let ledger = InMemoryLedger::new();
        ledger.append(request("avot-a", 0)).unwrap();

        let entries = ledger.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].prev_hash, GENESIS_HASH);
        assert_eq!(entries[0].sequence, 0);
    }

    #[test]
    fn test_tampering_breaks_the_chain() {
        let ledger = InMemoryLedger::new();
        for n in 0..3 {
            ledger.append(request("avot-a", n)).unwrap();
        }
        assert!(ledger.verify_integrity());

        ledger.tamper_with(1, "REWRITTEN HISTORY");
        assert!(!ledger.verify_integrity());
    }

    #[test]
    fn test_empty_chain_is_valid() {
        assert!(verify_chain(&[]));
        assert!(InMemoryLedger::new().verify_integrity());
    }

    // ── JSONL file ledger ─────────────────────────────────────────────────────

    #[test]
    fn test_jsonl_create_append_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("signals.jsonl");

        {
            let ledger = JsonlLedger::create(&path).unwrap();
            ledger.append(request("avot-a", 0)).unwrap();
            ledger.append(request("avot-b", 1)).unwrap();
        }

        // Reopen recovers the chain position; new appends keep linking.
        let ledger = JsonlLedger::open(&path).unwrap();
        ledger.append(request("avot-a", 2)).unwrap();

        let all = ledger.read(None).unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[2].context["n"], 2);

        let a = ledger.read(Some(&AvotId::new("avot-a"))).unwrap();
        assert_eq!(a.len(), 2);

        assert!(ledger.verify_integrity().unwrap());
        let entries = ledger.entries().unwrap();
        assert_eq!(entries[0].prev_hash, GENESIS_HASH);
        assert_eq!(entries[2].sequence, 2);
    }

    /// The backing structure must exist: open never invents a ledger.
    #[test]
    fn test_jsonl_open_requires_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = JsonlLedger::open(dir.path().join("missing.jsonl"));
        assert!(matches!(result, Err(GovernanceError::LedgerRead { .. })));
    }

    /// An append-only store is never re-initialized in place.
    #[test]
    fn test_jsonl_create_refuses_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("signals.jsonl");
        let _ledger = JsonlLedger::create(&path).unwrap();

        let result = JsonlLedger::create(&path);
        assert!(matches!(result, Err(GovernanceError::LedgerWrite { .. })));
    }

    #[test]
    fn test_jsonl_malformed_content_is_rejected_at_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("signals.jsonl");
        std::fs::write(&path, "this is not a ledger entry\n").unwrap();

        let result = JsonlLedger::open(&path);
        match result {
            Err(GovernanceError::LedgerRead { reason }) => {
                assert!(reason.contains("malformed ledger entry"), "got: {reason}");
            }
            other => panic!("expected LedgerRead, got {other:?}"),
        }
    }

    #[test]
    fn test_jsonl_tampered_file_fails_verification_at_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("signals.jsonl");

        {
            let ledger = JsonlLedger::create(&path).unwrap();
            ledger.append(request("avot-a", 0)).unwrap();
            ledger.append(request("avot-a", 1)).unwrap();
        }

        // Flip the description inside the first stored entry.
        let contents = std::fs::read_to_string(&path).unwrap();
        let tampered = contents.replacen("update 0", "update X", 1);
        assert_ne!(contents, tampered);
        std::fs::write(&path, tampered).unwrap();

        let result = JsonlLedger::open(&path);
        match result {
            Err(GovernanceError::LedgerRead { reason }) => {
                assert!(reason.contains("chain verification"), "got: {reason}");
            }
            other => panic!("expected LedgerRead, got {other:?}"),
        }
    }

    #[test]
    fn test_severity_and_metadata_survive_the_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("signals.jsonl");

        let ledger = JsonlLedger::create(&path).unwrap();
        let appended = ledger
            .append(
                NewSignal::new(AvotId::new("avot-a"), "covenant_breach", "boundary crossed")
                    .with_severity(Severity::Critical)
                    .with_metadata(serde_json::json!({ "clause": 4 })),
            )
            .unwrap();

        let read = ledger.read(None).unwrap();
        assert_eq!(read.len(), 1);
        assert_eq!(read[0], appended);
        assert_eq!(read[0].severity, Severity::Critical);
        assert_eq!(read[0].metadata["clause"], 4);
    }
}
