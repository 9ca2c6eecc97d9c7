/// The message collaborator: header and size access plus the action list.
pub mod check;

use std::collections::BTreeSet;

use crate::model::action::Action;

pub use check::CheckMailAdapter;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MailError {
    #[error("message unreadable: {0}")]
    Unreadable(String),
    #[error("header '{0}' could not be decoded")]
    MalformedHeader(String),
    #[error("action refused: {0}")]
    ActionRefused(String),
}

pub trait MailAdapter {
    /// Values of every header whose name is exactly `name`.
    fn header(&self, name: &str) -> Result<Vec<String>, MailError>;

    /// Like `header`, but the name comparison ignores ASCII case and
    /// surrounding whitespace, so `"From"`, `" from "` and `"FROM"` are equal.
    fn matching_header(&self, name: &str) -> Result<Vec<String>, MailError>;

    fn header_names(&self) -> Result<BTreeSet<String>, MailError>;

    /// Message size in octets.
    fn size(&self) -> Result<u64, MailError>;

    fn add_action(&mut self, action: Action) -> Result<(), MailError>;

    /// Actions accumulated so far, in order.
    fn actions(&self) -> &[Action];
}

/// Header-name equality as RFC 5228 section 5.7 defines it.
pub fn header_name_matches(candidate: &str, wanted: &str) -> bool {
    candidate.trim().eq_ignore_ascii_case(wanted.trim())
}
