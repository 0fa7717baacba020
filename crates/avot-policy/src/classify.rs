//! Keyword-based action classification.
//!
//! Classification maps a free-form intent to exactly one [`ActionType`].
//! It is total: tokens are scanned against the keyword table and the first
//! hit wins; an intent with no recognizable keyword falls back to `Think`,
//! the least-privileged category with no side effects. Falling back rather
//! than failing means an unparseable intent still flows through permission
//! gating instead of erroring out before the check.

use std::collections::BTreeMap;

use avot_contracts::{ActionType, GovernanceError, GovernanceResult};
use avot_core::traits::ActionClassifier;

/// A stateless keyword → action classifier.
///
/// The keyword table is policy data. The built-in defaults cover the
/// canonical vocabulary; a `[classifier]` section in the policy TOML
/// replaces them wholesale.
#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    keywords: BTreeMap<String, ActionType>,
}

impl KeywordClassifier {
    /// Build a classifier from a `[classifier]` config table mapping
    /// action names to keyword lists. Unknown action names are a
    /// configuration error; an empty table yields the defaults.
    pub fn from_config(config: &BTreeMap<String, Vec<String>>) -> GovernanceResult<Self> {
        if config.is_empty() {
            return Ok(Self::default());
        }

        let mut keywords = BTreeMap::new();
        for (action_name, words) in config {
            let action: ActionType =
                action_name.parse().map_err(|e| GovernanceError::Config {
                    reason: format!("classifier: {e}"),
                })?;
            for word in words {
                keywords.insert(word.to_lowercase(), action);
            }
        }
        Ok(Self { keywords })
    }

    /// The number of keywords in the table.
    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }
}

impl Default for KeywordClassifier {
    /// The canonical keyword vocabulary.
    fn default() -> Self {
        let mut keywords = BTreeMap::new();
        let table: [(&[&str], ActionType); 5] = [
            (&["think", "analyze", "reason"], ActionType::Think),
            (&["say", "respond", "communicate"], ActionType::Communicate),
            (&["run", "execute", "perform"], ActionType::Execute),
            (&["bind", "write", "commit"], ActionType::Bind),
            (&["propose", "suggest", "request"], ActionType::Propose),
        ];
        for (words, action) in table {
            for word in words {
                keywords.insert((*word).to_string(), action);
            }
        }
        Self { keywords }
    }
}

impl ActionClassifier for KeywordClassifier {
    fn classify(&self, intent: &str) -> ActionType {
        let lowered = intent.to_lowercase();
        for token in lowered.split(|c: char| !c.is_alphanumeric()) {
            if token.is_empty() {
                continue;
            }
            if let Some(action) = self.keywords.get(token) {
                return *action;
            }
        }
        ActionType::Think
    }
}
