use serde::{Deserialize, Serialize};
use std::fmt;

/// A deferred effect accumulated during evaluation and applied by the mail adapter afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    Keep,
    Discard,
    FileInto { mailbox: String },
    Redirect { address: String },
    Reject { message: String },
}

impl Action {
    pub fn as_sieve(&self) -> &'static str {
        match self {
            Self::Keep => "keep",
            Self::Discard => "discard",
            Self::FileInto { .. } => "fileinto",
            Self::Redirect { .. } => "redirect",
            Self::Reject { .. } => "reject",
        }
    }

    pub fn argument(&self) -> Option<&str> {
        match self {
            Self::Keep | Self::Discard => None,
            Self::FileInto { mailbox } => Some(mailbox),
            Self::Redirect { address } => Some(address),
            Self::Reject { message } => Some(message),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.argument() {
            Some(arg) => write!(f, "{} {:?}", self.as_sieve(), arg),
            None => f.write_str(self.as_sieve()),
        }
    }
}
