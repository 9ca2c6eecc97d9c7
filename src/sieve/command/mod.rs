/// Command implementations and the capability interface they share.
pub mod action;
pub mod control;
pub mod log;

use crate::mail::MailAdapter;
use crate::sieve::args;
use crate::sieve::ast::{Arguments, Block};
use crate::sieve::context::ExecutionContext;
use crate::sieve::error::SieveError;
use crate::sieve::registry::Constructor;

/// What evaluation should do after a command returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// `stop` was executed; unwind to the script root and finish cleanly.
    Stop,
}

/// Decides which ordering rules apply to a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    /// Only legal before any other command (`require`).
    Prolog,
    /// Flow control: `if`, `elsif`, `else`, `stop`.
    Control,
    /// Accumulates an action on the message.
    Action,
    /// Neither of the above, e.g. `log`.
    Plain,
}

/// The lifecycle the interpreter drives for every command node:
/// `validate_state`, `validate_arguments`, `validate_block`, `execute`,
/// `update_state`. A failing step stops the command before later steps.
pub trait ExecutableCommand {
    fn kind(&self) -> CommandKind;

    fn validate_state(&self, ctx: &ExecutionContext<'_>) -> Result<(), SieveError> {
        validate_kind_state(self.kind(), ctx)
    }

    fn validate_arguments(
        &self,
        arguments: &Arguments,
        ctx: &ExecutionContext<'_>,
    ) -> Result<(), SieveError> {
        args::expect_no_arguments(arguments, ctx)
    }

    fn validate_block(
        &self,
        block: Option<&Block>,
        ctx: &ExecutionContext<'_>,
    ) -> Result<(), SieveError> {
        if block.is_some() {
            return Err(ctx.syntax_error("No block permitted"));
        }
        Ok(())
    }

    fn execute(
        &self,
        mail: &mut dyn MailAdapter,
        arguments: &Arguments,
        block: Option<&Block>,
        ctx: &mut ExecutionContext<'_>,
    ) -> Result<Flow, SieveError>;

    fn update_state(&self, ctx: &mut ExecutionContext<'_>) {
        record_kind_state(self.kind(), ctx);
    }

    /// True for commands that open or extend an `if`/`elsif` chain. Any
    /// other command closes the chain once it has run.
    fn continues_condition_chain(&self) -> bool {
        false
    }
}

/// Ordering rules every command of `kind` obeys.
pub fn validate_kind_state(kind: CommandKind, ctx: &ExecutionContext<'_>) -> Result<(), SieveError> {
    match kind {
        CommandKind::Prolog if !ctx.state().is_in_prolog() => {
            Err(ctx.command_error("Invalid state for a prolog command"))
        }
        CommandKind::Action if ctx.state().is_rejected() => Err(ctx.command_error(
            "Action commands are not allowed after the \"reject\" command",
        )),
        _ => Ok(()),
    }
}

/// State every command of `kind` leaves behind once it has run.
pub fn record_kind_state(kind: CommandKind, ctx: &mut ExecutionContext<'_>) {
    if kind == CommandKind::Action {
        ctx.state_mut().set_has_actions();
    }
}

/// Fails unless a block is attached.
pub(crate) fn require_block<'b>(
    block: Option<&'b Block>,
    ctx: &ExecutionContext<'_>,
) -> Result<&'b Block, SieveError> {
    block.ok_or_else(|| ctx.syntax_error("Expecting a block"))
}

/// The built-in name → constructor mapping.
pub fn builtins() -> Vec<(&'static str, Constructor<dyn ExecutableCommand>)> {
    type Ctor = Constructor<dyn ExecutableCommand>;
    vec![
        ("require", control::new_require as Ctor),
        ("if", control::new_if as Ctor),
        ("elsif", control::new_elsif as Ctor),
        ("else", control::new_else as Ctor),
        ("stop", control::new_stop as Ctor),
        ("keep", action::new_keep as Ctor),
        ("discard", action::new_discard as Ctor),
        ("fileinto", action::new_fileinto as Ctor),
        ("redirect", action::new_redirect as Ctor),
        ("reject", action::new_reject as Ctor),
        ("log", log::new_log as Ctor),
    ]
}
