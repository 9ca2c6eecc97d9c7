/// Tree-walking evaluation of scripts, blocks, commands and tests.
///
/// Evaluation is strictly sequential and single threaded per script. The
/// only state shared between evaluations is the frozen [`Registries`].
use tracing::{debug, info, trace};

use crate::config::InterpreterConfig;
use crate::mail::MailAdapter;
use crate::sieve::ast::{Block, Command, Script, Test};
use crate::sieve::command::{CommandKind, Flow};
use crate::sieve::context::ExecutionContext;
use crate::sieve::error::SieveError;
use crate::sieve::registry::Registries;

/// Runs every top-level command in order. `stop` ends evaluation cleanly;
/// any error aborts it with the actions accumulated so far left on `mail`.
pub fn evaluate_script(
    script: &Script,
    mail: &mut dyn MailAdapter,
    ctx: &mut ExecutionContext<'_>,
) -> Result<Flow, SieveError> {
    for command in &script.commands {
        if evaluate_command(command, mail, ctx)? == Flow::Stop {
            info!(coordinate = %ctx.coordinate(), "script stopped");
            return Ok(Flow::Stop);
        }
    }
    Ok(Flow::Continue)
}

pub fn evaluate_command(
    command: &Command,
    mail: &mut dyn MailAdapter,
    ctx: &mut ExecutionContext<'_>,
) -> Result<Flow, SieveError> {
    ctx.set_coordinate(command.coordinate);
    debug!(command = %command.name, coordinate = %command.coordinate, "evaluating command");

    let registries = ctx.registries();
    let implementation = registries
        .commands()
        .new_instance(&command.name, command.coordinate)?;

    implementation.validate_state(ctx)?;
    if implementation.kind() != CommandKind::Prolog {
        ctx.state_mut().leave_prolog();
    }
    implementation.validate_arguments(&command.arguments, ctx)?;
    implementation.validate_block(command.block.as_ref(), ctx)?;

    let flow = implementation.execute(mail, &command.arguments, command.block.as_ref(), ctx)?;

    // Nested evaluation moved the coordinate; state updates belong to this node.
    ctx.set_coordinate(command.coordinate);
    implementation.update_state(ctx);
    if !implementation.continues_condition_chain() {
        ctx.conditions_mut().close_chain();
    }
    Ok(flow)
}

/// Runs a block in its own condition scope. A `stop` inside propagates out.
pub fn evaluate_block(
    block: &Block,
    mail: &mut dyn MailAdapter,
    ctx: &mut ExecutionContext<'_>,
) -> Result<Flow, SieveError> {
    ctx.conditions_mut().push_scope();
    let result = run_commands(&block.commands, mail, ctx);
    ctx.conditions_mut().pop_scope();
    result
}

fn run_commands(
    commands: &[Command],
    mail: &mut dyn MailAdapter,
    ctx: &mut ExecutionContext<'_>,
) -> Result<Flow, SieveError> {
    for command in commands {
        if evaluate_command(command, mail, ctx)? == Flow::Stop {
            return Ok(Flow::Stop);
        }
    }
    Ok(Flow::Continue)
}

pub fn evaluate_test(
    test: &Test,
    mail: &dyn MailAdapter,
    ctx: &mut ExecutionContext<'_>,
) -> Result<bool, SieveError> {
    ctx.set_coordinate(test.coordinate);
    let implementation = ctx
        .registries()
        .tests()
        .new_instance(&test.name, test.coordinate)?;
    implementation.validate_arguments(&test.arguments, ctx)?;
    let result = implementation.evaluate(mail, &test.arguments, ctx)?;
    trace!(test = %test.name, coordinate = %test.coordinate, result, "test evaluated");
    Ok(result)
}

/// Entry point for hosts: owns the registries and evaluates scripts against
/// messages. Safe to share across threads; each call gets a fresh context.
pub struct SieveFactory {
    registries: Registries,
}

impl SieveFactory {
    pub fn new(registries: Registries) -> Self {
        Self { registries }
    }

    pub fn builtin() -> Self {
        Self::new(Registries::builtin())
    }

    pub fn from_config(config: &InterpreterConfig) -> Self {
        Self::new(Registries::from_config(config))
    }

    pub fn registries(&self) -> &Registries {
        &self.registries
    }

    pub fn evaluate(
        &self,
        script: &Script,
        mail: &mut dyn MailAdapter,
    ) -> Result<Flow, SieveError> {
        let mut ctx = ExecutionContext::new(&self.registries);
        let result = evaluate_script(script, mail, &mut ctx);
        match &result {
            Ok(flow) => debug!(?flow, actions = mail.actions().len(), "evaluation finished"),
            Err(e) => info!(kind = e.kind(), error = %e, "evaluation failed"),
        }
        result
    }
}
