/// In-memory mail adapter used by the CLI and the test suite.
///
/// Records actions instead of performing them; `execute_actions` moves the
/// pending list into `executed_actions` so hosts can check what would happen.
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::mail::{header_name_matches, MailAdapter, MailError};
use crate::model::action::Action;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckMailAdapter {
    /// `(name, value)` pairs in message order; names may repeat.
    #[serde(default)]
    pub headers: Vec<(String, String)>,
    /// Explicit size; when absent the size of the serialized header block is used.
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(skip)]
    actions: Vec<Action>,
    #[serde(skip)]
    executed: Vec<Action>,
}

impl CheckMailAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn executed_actions(&self) -> &[Action] {
        &self.executed
    }

    /// Applies the pending actions. Here that only means recording them.
    pub fn execute_actions(&mut self) {
        tracing::debug!(count = self.actions.len(), "executing actions");
        self.executed.extend(self.actions.drain(..));
    }

    pub fn reset(&mut self) {
        self.actions.clear();
        self.executed.clear();
    }

    fn header_block_len(&self) -> u64 {
        self.headers
            .iter()
            .map(|(name, value)| (name.len() + value.len() + 4) as u64)
            .sum()
    }
}

impl MailAdapter for CheckMailAdapter {
    fn header(&self, name: &str) -> Result<Vec<String>, MailError> {
        Ok(self
            .headers
            .iter()
            .filter(|(n, _)| n == name)
            .map(|(_, v)| v.clone())
            .collect())
    }

    fn matching_header(&self, name: &str) -> Result<Vec<String>, MailError> {
        Ok(self
            .headers
            .iter()
            .filter(|(n, _)| header_name_matches(n, name))
            .map(|(_, v)| v.clone())
            .collect())
    }

    fn header_names(&self) -> Result<BTreeSet<String>, MailError> {
        Ok(self.headers.iter().map(|(n, _)| n.clone()).collect())
    }

    fn size(&self) -> Result<u64, MailError> {
        Ok(self.size.unwrap_or_else(|| self.header_block_len()))
    }

    fn add_action(&mut self, action: Action) -> Result<(), MailError> {
        self.actions.push(action);
        Ok(())
    }

    fn actions(&self) -> &[Action] {
        &self.actions
    }
}
