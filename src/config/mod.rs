/// Interpreter configuration: which built-ins are switched off, and the default comparator.
pub mod paths;

use serde::{Deserialize, Serialize};

use crate::sieve::comparator;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterpreterConfig {
    /// Command names removed from the registry, e.g. `["reject"]`.
    pub disabled_commands: Vec<String>,
    pub disabled_tests: Vec<String>,
    pub disabled_comparators: Vec<String>,
    /// Used by tests without a `:comparator` tag.
    pub default_comparator: String,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            disabled_commands: Vec::new(),
            disabled_tests: Vec::new(),
            disabled_comparators: Vec::new(),
            default_comparator: comparator::OCTET.to_string(),
        }
    }
}
