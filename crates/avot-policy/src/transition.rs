//! The lifecycle transition allow-list and terminal-state set.
//!
//! Transitions are policy data: an explicit list of `(from, to)` edges.
//! Anything not listed is rejected. Terminal states are absorbing, and
//! the absorbing invariant is enforced at load time — a configuration
//! that gives a terminal state an outgoing edge is refused outright
//! rather than silently ignored at evaluation time.

use std::collections::BTreeSet;

use avot_contracts::{GovernanceError, GovernanceResult, LifecycleState};
use avot_core::traits::TransitionPolicy;

use crate::rule::LifecycleSection;

/// An immutable transition allow-list with a terminal-state set.
#[derive(Debug, Clone)]
pub struct TransitionTable {
    allowed: BTreeSet<(LifecycleState, LifecycleState)>,
    terminal: BTreeSet<LifecycleState>,
}

impl TransitionTable {
    /// Build and validate a table from the `[lifecycle]` config section.
    pub fn from_section(section: &LifecycleSection) -> GovernanceResult<Self> {
        let mut terminal = BTreeSet::new();
        for name in &section.terminal {
            let state: LifecycleState = name.parse().map_err(|e: String| {
                GovernanceError::Config {
                    reason: format!("lifecycle.terminal: {e}"),
                }
            })?;
            terminal.insert(state);
        }

        let mut allowed = BTreeSet::new();
        for edge in &section.transitions {
            let from: LifecycleState = edge.from.parse().map_err(|e: String| {
                GovernanceError::Config {
                    reason: format!("lifecycle.transitions: {e}"),
                }
            })?;
            let to: LifecycleState = edge.to.parse().map_err(|e: String| {
                GovernanceError::Config {
                    reason: format!("lifecycle.transitions: {e}"),
                }
            })?;

            if terminal.contains(&from) {
                return Err(GovernanceError::Config {
                    reason: format!(
                        "lifecycle: terminal state {from} has an outgoing transition to {to}"
                    ),
                });
            }
            allowed.insert((from, to));
        }

        Ok(Self { allowed, terminal })
    }

    /// A linear S0 → S1 → … → S9 graph with S8 and S9 terminal.
    pub fn linear() -> Self {
        let all = LifecycleState::ALL;
        let terminal: BTreeSet<_> = [LifecycleState::S8, LifecycleState::S9].into();
        let allowed = all
            .windows(2)
            .map(|pair| (pair[0], pair[1]))
            .filter(|(from, _)| !terminal.contains(from))
            .collect();
        Self { allowed, terminal }
    }

    /// The number of allow-listed edges.
    pub fn edge_count(&self) -> usize {
        self.allowed.len()
    }
}

impl TransitionPolicy for TransitionTable {
    fn is_allowed(&self, from: LifecycleState, to: LifecycleState) -> bool {
        self.allowed.contains(&(from, to))
    }

    fn is_terminal(&self, state: LifecycleState) -> bool {
        self.terminal.contains(&state)
    }
}
