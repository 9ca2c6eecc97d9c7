/// Errors raised while evaluating a script.
///
/// Every variant carries the coordinate of the node that failed. `stop` is
/// not an error: it travels up the call chain as `Flow::Stop`.
use crate::mail::MailError;
use crate::sieve::ast::ScriptCoordinate;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SieveError {
    #[error("Lookup error: {message} at {coordinate}")]
    Lookup {
        message: String,
        coordinate: ScriptCoordinate,
    },
    #[error("Instantiation error: {message} at {coordinate}")]
    Instantiation {
        message: String,
        coordinate: ScriptCoordinate,
    },
    #[error("Syntax error: {message} at {coordinate}")]
    Syntax {
        message: String,
        coordinate: ScriptCoordinate,
    },
    #[error("Command error: {message} at {coordinate}")]
    Command {
        message: String,
        coordinate: ScriptCoordinate,
    },
    #[error("Feature error: {message} at {coordinate}")]
    Feature {
        message: String,
        coordinate: ScriptCoordinate,
    },
    #[error("Pattern error: {source} at {coordinate}")]
    Pattern {
        source: PatternError,
        coordinate: ScriptCoordinate,
    },
    #[error("Mail access error: {source} at {coordinate}")]
    MailAccess {
        source: MailError,
        coordinate: ScriptCoordinate,
    },
}

impl SieveError {
    pub fn coordinate(&self) -> ScriptCoordinate {
        match self {
            Self::Lookup { coordinate, .. }
            | Self::Instantiation { coordinate, .. }
            | Self::Syntax { coordinate, .. }
            | Self::Command { coordinate, .. }
            | Self::Feature { coordinate, .. }
            | Self::Pattern { coordinate, .. }
            | Self::MailAccess { coordinate, .. } => *coordinate,
        }
    }

    /// Stable short name of the error kind, for hosts that map kinds to policy.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Lookup { .. } => "lookup",
            Self::Instantiation { .. } => "instantiation",
            Self::Syntax { .. } => "syntax",
            Self::Command { .. } => "command",
            Self::Feature { .. } => "feature",
            Self::Pattern { .. } => "pattern",
            Self::MailAccess { .. } => "mail-access",
        }
    }
}

/// A glob a comparator could not interpret.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed pattern '{pattern}': {reason}")]
pub struct PatternError {
    pub pattern: String,
    pub reason: String,
}

impl PatternError {
    pub fn new(pattern: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            reason: reason.into(),
        }
    }
}
