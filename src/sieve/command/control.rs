/// `require`, `if`, `elsif`, `else` and `stop`.
use crate::mail::MailAdapter;
use crate::sieve::args;
use crate::sieve::ast::{Arguments, Block};
use crate::sieve::command::{
    require_block, validate_kind_state, CommandKind, ExecutableCommand, Flow,
};
use crate::sieve::context::ExecutionContext;
use crate::sieve::error::SieveError;
use crate::sieve::interpreter;

/// Prefix under which `require` names a comparator (RFC 5228 section 2.7.3).
const COMPARATOR_FEATURE_PREFIX: &str = "comparator-";

pub struct Require;

impl Require {
    /// A feature is available if it names a command, a test, or `comparator-<name>`.
    fn validate_feature(name: &str, ctx: &ExecutionContext<'_>) -> Result<(), SieveError> {
        let registries = ctx.registries();
        if registries.commands().is_supported(name) || registries.tests().is_supported(name) {
            return Ok(());
        }
        let is_comparator = name
            .get(..COMPARATOR_FEATURE_PREFIX.len())
            .filter(|prefix| prefix.eq_ignore_ascii_case(COMPARATOR_FEATURE_PREFIX))
            .map(|_| &name[COMPARATOR_FEATURE_PREFIX.len()..])
            .is_some_and(|comparator| registries.comparators().is_supported(comparator));
        if is_comparator {
            return Ok(());
        }
        Err(ctx.feature_error(format!("Feature \"{name}\" is not supported")))
    }
}

impl ExecutableCommand for Require {
    fn kind(&self) -> CommandKind {
        CommandKind::Prolog
    }

    fn validate_arguments(
        &self,
        arguments: &Arguments,
        ctx: &ExecutionContext<'_>,
    ) -> Result<(), SieveError> {
        args::string_list(arguments, ctx).map(|_| ())
    }

    fn execute(
        &self,
        _mail: &mut dyn MailAdapter,
        arguments: &Arguments,
        _block: Option<&Block>,
        ctx: &mut ExecutionContext<'_>,
    ) -> Result<Flow, SieveError> {
        for feature in args::string_list(arguments, ctx)? {
            Self::validate_feature(feature, ctx)?;
            tracing::debug!(feature = %feature, "required feature available");
        }
        Ok(Flow::Continue)
    }
}

/// Evaluates the guard of `if`/`elsif`, records it, and runs the block when it holds.
fn run_guarded_block(
    mail: &mut dyn MailAdapter,
    arguments: &Arguments,
    block: Option<&Block>,
    ctx: &mut ExecutionContext<'_>,
) -> Result<Flow, SieveError> {
    let test = args::single_test(arguments, ctx)?;
    let block = require_block(block, ctx)?;
    let result = interpreter::evaluate_test(test, &*mail, ctx)?;
    ctx.conditions_mut().set_test_result(result);
    if result {
        interpreter::evaluate_block(block, mail, ctx)
    } else {
        Ok(Flow::Continue)
    }
}

/// Fails unless an `if` or `elsif` chain is open in the current block.
fn validate_chain_open(name: &str, ctx: &ExecutionContext<'_>) -> Result<(), SieveError> {
    if ctx.conditions().last_test_result().is_none() {
        return Err(ctx.command_error(format!(
            "\"{name}\" must follow an \"if\" or \"elsif\" command"
        )));
    }
    Ok(())
}

fn validate_guard_arguments(
    arguments: &Arguments,
    ctx: &ExecutionContext<'_>,
) -> Result<(), SieveError> {
    args::single_test(arguments, ctx).map(|_| ())
}

pub struct If;

impl ExecutableCommand for If {
    fn kind(&self) -> CommandKind {
        CommandKind::Control
    }

    fn validate_arguments(
        &self,
        arguments: &Arguments,
        ctx: &ExecutionContext<'_>,
    ) -> Result<(), SieveError> {
        validate_guard_arguments(arguments, ctx)
    }

    fn validate_block(
        &self,
        block: Option<&Block>,
        ctx: &ExecutionContext<'_>,
    ) -> Result<(), SieveError> {
        require_block(block, ctx).map(|_| ())
    }

    fn execute(
        &self,
        mail: &mut dyn MailAdapter,
        arguments: &Arguments,
        block: Option<&Block>,
        ctx: &mut ExecutionContext<'_>,
    ) -> Result<Flow, SieveError> {
        run_guarded_block(mail, arguments, block, ctx)
    }

    fn continues_condition_chain(&self) -> bool {
        true
    }
}

pub struct Elsif;

impl ExecutableCommand for Elsif {
    fn kind(&self) -> CommandKind {
        CommandKind::Control
    }

    fn validate_state(&self, ctx: &ExecutionContext<'_>) -> Result<(), SieveError> {
        validate_kind_state(self.kind(), ctx)?;
        validate_chain_open("elsif", ctx)
    }

    fn validate_arguments(
        &self,
        arguments: &Arguments,
        ctx: &ExecutionContext<'_>,
    ) -> Result<(), SieveError> {
        validate_guard_arguments(arguments, ctx)
    }

    fn validate_block(
        &self,
        block: Option<&Block>,
        ctx: &ExecutionContext<'_>,
    ) -> Result<(), SieveError> {
        require_block(block, ctx).map(|_| ())
    }

    fn execute(
        &self,
        mail: &mut dyn MailAdapter,
        arguments: &Arguments,
        block: Option<&Block>,
        ctx: &mut ExecutionContext<'_>,
    ) -> Result<Flow, SieveError> {
        // An earlier branch already matched: skip without evaluating the test.
        if ctx.conditions().is_elsif_run_allowed() != Some(true) {
            return Ok(Flow::Continue);
        }
        run_guarded_block(mail, arguments, block, ctx)
    }

    fn continues_condition_chain(&self) -> bool {
        true
    }
}

pub struct Else;

impl ExecutableCommand for Else {
    fn kind(&self) -> CommandKind {
        CommandKind::Control
    }

    fn validate_state(&self, ctx: &ExecutionContext<'_>) -> Result<(), SieveError> {
        validate_kind_state(self.kind(), ctx)?;
        validate_chain_open("else", ctx)
    }

    fn validate_block(
        &self,
        block: Option<&Block>,
        ctx: &ExecutionContext<'_>,
    ) -> Result<(), SieveError> {
        require_block(block, ctx).map(|_| ())
    }

    fn execute(
        &self,
        mail: &mut dyn MailAdapter,
        _arguments: &Arguments,
        block: Option<&Block>,
        ctx: &mut ExecutionContext<'_>,
    ) -> Result<Flow, SieveError> {
        if ctx.conditions().is_else_run_allowed() != Some(true) {
            return Ok(Flow::Continue);
        }
        let block = require_block(block, ctx)?;
        interpreter::evaluate_block(block, mail, ctx)
    }
}

pub struct Stop;

impl ExecutableCommand for Stop {
    fn kind(&self) -> CommandKind {
        CommandKind::Control
    }

    fn execute(
        &self,
        _mail: &mut dyn MailAdapter,
        _arguments: &Arguments,
        _block: Option<&Block>,
        _ctx: &mut ExecutionContext<'_>,
    ) -> Result<Flow, SieveError> {
        Ok(Flow::Stop)
    }
}

pub(crate) fn new_require() -> Result<Box<dyn ExecutableCommand>, String> {
    Ok(Box::new(Require))
}

pub(crate) fn new_if() -> Result<Box<dyn ExecutableCommand>, String> {
    Ok(Box::new(If))
}

pub(crate) fn new_elsif() -> Result<Box<dyn ExecutableCommand>, String> {
    Ok(Box::new(Elsif))
}

pub(crate) fn new_else() -> Result<Box<dyn ExecutableCommand>, String> {
    Ok(Box::new(Else))
}

pub(crate) fn new_stop() -> Result<Box<dyn ExecutableCommand>, String> {
    Ok(Box::new(Stop))
}
