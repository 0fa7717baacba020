//! AVOT Governance Engine — Demo CLI
//!
//! Wires real components (TOML registry, TOML governance policy, JSONL
//! signal ledger, governance engine) together against file-backed stores.
//!
//! Usage:
//!   cargo run -p demo -- --avot tyme-archivist state
//!   cargo run -p demo -- --avot tyme-archivist attempt "propose a new archive layout"
//!   cargo run -p demo -- --avot tyme-archivist transition S2
//!   cargo run -p demo -- --avot tyme-archivist emit status_update "all quiet"
//!   cargo run -p demo -- signals
//!   cargo run -p demo -- run-scenario

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use avot_contracts::{
    AttemptOutcome, AvotId, GovernanceResult, LifecycleState, Severity,
};
use avot_core::GovernanceEngine;
use avot_ledger::JsonlLedger;
use avot_policy::GovernancePolicy;
use avot_registry::TomlRegistry;

// ── CLI definition ────────────────────────────────────────────────────────────

/// AVOT — governance engine demo.
///
/// Every subcommand provisions the named entity from the registry and
/// operates through the governance engine, so each verdict lands on the
/// signal ledger exactly as it would in production.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "AVOT governance engine demo",
    long_about = "Provisions an AVOT from a TOML registry, gates attempts through\n\
                  the permission policy, and records every decision on an\n\
                  append-only, hash-chained JSONL signal ledger."
)]
struct Cli {
    /// Path to the registry TOML file.
    #[arg(long, default_value = "demo/config/registry.toml")]
    registry: PathBuf,

    /// Path to the governance policy TOML file.
    #[arg(long, default_value = "demo/config/policy.toml")]
    policy: PathBuf,

    /// Path to the JSONL signal ledger (created if absent).
    #[arg(long, default_value = "demo/signals.jsonl")]
    ledger: PathBuf,

    /// The entity to operate as.
    #[arg(long, default_value = "tyme-archivist")]
    avot: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the entity's immutable identity.
    Identify,
    /// Print the entity's current lifecycle/maturity/binding state.
    State,
    /// Ask the engine whether the entity may attempt an intent.
    Attempt {
        /// Free-form intent, e.g. "propose a new archive layout".
        intent: String,
    },
    /// Request an explicit lifecycle transition.
    Transition {
        /// Target stage, e.g. S2.
        to: LifecycleState,
    },
    /// Emit a voluntary, non-binding signal.
    Emit {
        signal_type: String,
        description: String,
    },
    /// Print the ledger, filtered to the selected entity unless --all.
    Signals {
        #[arg(long)]
        all: bool,
    },
    /// Verify the ledger's hash chain.
    Verify,
    /// Walk the canonical governance scenarios against in-memory stores.
    RunScenario,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Initialize structured logging. Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::RunScenario => scenario::run(),
        ref command => run_command(&cli, command),
    };

    if let Err(e) = result {
        eprintln!("Demo error: {e}");
        std::process::exit(1);
    }
}

// ── File-backed command dispatch ──────────────────────────────────────────────

fn run_command(cli: &Cli, command: &Command) -> GovernanceResult<()> {
    let registry = TomlRegistry::from_file(&cli.registry)?;
    let policy = GovernancePolicy::from_file(&cli.policy)?;
    let ledger = Arc::new(open_or_create_ledger(&cli.ledger)?);

    let avot_id = AvotId::new(cli.avot.clone());
    let engine = GovernanceEngine::provision(
        avot_id.clone(),
        &registry,
        Arc::new(policy.permissions),
        Arc::new(policy.classifier),
        Arc::new(policy.transitions),
        ledger.clone(),
    )?;
    info!(
        avot_id = %avot_id,
        registry = %cli.registry.display(),
        ledger = %cli.ledger.display(),
        "engine provisioned"
    );

    match command {
        Command::Identify => {
            let identity = engine.identify();
            println!("avot_id:    {}", identity.avot_id);
            println!("purpose:    {}", identity.purpose.as_deref().unwrap_or("-"));
            println!("steward:    {}", identity.steward.as_deref().unwrap_or("-"));
            println!("header_ref: {}", identity.header_ref.as_deref().unwrap_or("-"));
        }

        Command::State => match engine.state() {
            Some(state) => {
                println!("lifecycle: {}", state.lifecycle);
                println!("maturity:  {}", state.maturity);
                println!("binding:   {}", state.binding);
            }
            None => println!("'{avot_id}' is not configured in the registry"),
        },

        Command::Attempt { intent } => match engine.attempt(intent)? {
            AttemptOutcome::Proceeded { action, signal } => {
                println!("PROCEED    action={action}  recorded as {}", signal.signal_id);
            }
            AttemptOutcome::Refused { action, refusal, signal } => {
                println!("REFUSED    action={action}  reason={}", refusal.reason);
                println!("reference: {}", refusal.reference);
                println!("next step: {}", refusal.next_step);
                println!("recorded:  {}", signal.signal_id);
            }
        },

        Command::Transition { to } => {
            let committed = engine.transition(*to)?;
            println!("lifecycle is now {committed}");
        }

        Command::Emit { signal_type, description } => {
            let signal = engine.emit(
                signal_type,
                description,
                Severity::Low,
                serde_json::json!({}),
                serde_json::json!({}),
            )?;
            println!("emitted {} at {}", signal.signal_id, signal.timestamp);
        }

        Command::Signals { all } => {
            let filter = if *all { None } else { Some(&avot_id) };
            for signal in avot_core::traits::LedgerStore::read(ledger.as_ref(), filter)? {
                println!(
                    "{}  {:8}  {:22}  {}  {}",
                    signal.timestamp, signal.severity, signal.signal_type, signal.avot_id,
                    signal.description
                );
            }
        }

        Command::Verify => {
            if ledger.verify_integrity()? {
                println!("ledger chain OK ({} entries)", ledger.entries()?.len());
            } else {
                println!("LEDGER CHAIN BROKEN — the file has been tampered with");
                std::process::exit(2);
            }
        }

        Command::RunScenario => unreachable!("handled before dispatch"),
    }

    Ok(())
}

/// Open the ledger, initializing an empty file on first use.
fn open_or_create_ledger(path: &std::path::Path) -> GovernanceResult<JsonlLedger> {
    if path.exists() {
        JsonlLedger::open(path)
    } else {
        JsonlLedger::create(path)
    }
}

// ── Scripted scenario ─────────────────────────────────────────────────────────

mod scenario {
    use std::sync::Arc;

    use avot_contracts::{
        AttemptOutcome, AvotId, GovernanceResult, LifecycleState, Maturity, RegistryEntry,
        Severity,
    };
    use avot_core::GovernanceEngine;
    use avot_ledger::InMemoryLedger;
    use avot_policy::GovernancePolicy;
    use avot_registry::InMemoryRegistry;

    /// Walk the canonical scenarios against in-memory stores: a permitted
    /// proposal, a consent-gated bind, an unknown entity, a terminal
    /// entity, and voluntary emission — then verify the chain.
    pub fn run() -> GovernanceResult<()> {
        println!();
        println!("AVOT — Governance Engine Demo");
        println!("=============================");
        println!();

        let policy = GovernancePolicy::baseline();
        let ledger = InMemoryLedger::new();

        let mut registry = InMemoryRegistry::new();
        registry.insert(
            AvotId::new("tyme-archivist"),
            RegistryEntry {
                purpose: Some("archive stewardship".to_string()),
                steward: Some("ordinary-human".to_string()),
                header_ref: Some("headers/archivist-v2".to_string()),
                lifecycle_state: LifecycleState::S1,
                maturity: Maturity::M1,
                binding: false,
                attributes: Default::default(),
            },
        );
        registry.insert(
            AvotId::new("tyme-emeritus"),
            RegistryEntry {
                purpose: Some("retired courier".to_string()),
                steward: Some("ordinary-human".to_string()),
                header_ref: None,
                lifecycle_state: LifecycleState::S9,
                maturity: Maturity::M4,
                binding: true,
                attributes: Default::default(),
            },
        );

        let provision = |id: &str| {
            GovernanceEngine::provision(
                AvotId::new(id),
                &registry,
                Arc::new(policy.permissions.clone()),
                Arc::new(policy.classifier.clone()),
                Arc::new(policy.transitions.clone()),
                Arc::new(ledger.clone()),
            )
        };

        let archivist = provision("tyme-archivist")?;
        let emeritus = provision("tyme-emeritus")?;
        let stranger = provision("unregistered-drifter")?;

        println!("[1] archivist (S1/M1, advisory) proposes:");
        report(archivist.attempt("propose a new archive layout")?);

        println!("[2] archivist tries to bind without binding force:");
        report(archivist.attempt("commit the storage budget")?);

        println!("[3] an entity absent from the registry tries anything:");
        report(stranger.attempt("run the indexing job")?);

        println!("[4] a dissolved entity (S9) tries to communicate:");
        report(emeritus.attempt("respond to the steward")?);

        println!("[5] archivist advances S1 -> S2 and emits a status update:");
        let committed = archivist.transition(LifecycleState::S2)?;
        println!("    lifecycle is now {committed}");
        let signal = archivist.emit(
            "status_update",
            "index rebuild at 80%",
            Severity::Low,
            serde_json::json!({ "progress": 0.8 }),
            serde_json::json!({}),
        )?;
        println!("    emitted {}", signal.signal_id);

        println!();
        let entries = ledger.entries();
        println!("ledger holds {} signals; chain valid: {}", entries.len(), ledger.verify_integrity());
        for entry in &entries {
            println!(
                "  #{}  {:22}  {}  {}",
                entry.sequence, entry.signal.signal_type, entry.signal.avot_id,
                entry.signal.description
            );
        }
        println!();

        Ok(())
    }

    fn report(outcome: AttemptOutcome) {
        match outcome {
            AttemptOutcome::Proceeded { action, .. } => {
                println!("    PROCEED  action={action}");
            }
            AttemptOutcome::Refused { action, refusal, .. } => {
                println!(
                    "    REFUSED  action={action}  reason={}  next={}",
                    refusal.reason, refusal.next_step
                );
            }
        }
    }
}
