/// Action commands: each appends one `Action` to the message.
use crate::mail::MailAdapter;
use crate::model::action::Action;
use crate::sieve::args;
use crate::sieve::ast::{Arguments, Block};
use crate::sieve::command::{
    record_kind_state, validate_kind_state, CommandKind, ExecutableCommand, Flow,
};
use crate::sieve::context::ExecutionContext;
use crate::sieve::error::SieveError;

fn accumulate(
    mail: &mut dyn MailAdapter,
    action: Action,
    ctx: &ExecutionContext<'_>,
) -> Result<Flow, SieveError> {
    tracing::info!(action = %action, at = %ctx.coordinate(), "action accumulated");
    mail.add_action(action).map_err(|e| ctx.mail_error(e))?;
    Ok(Flow::Continue)
}

pub struct Keep;

impl ExecutableCommand for Keep {
    fn kind(&self) -> CommandKind {
        CommandKind::Action
    }

    fn execute(
        &self,
        mail: &mut dyn MailAdapter,
        _arguments: &Arguments,
        _block: Option<&Block>,
        ctx: &mut ExecutionContext<'_>,
    ) -> Result<Flow, SieveError> {
        accumulate(mail, Action::Keep, ctx)
    }
}

pub struct Discard;

impl ExecutableCommand for Discard {
    fn kind(&self) -> CommandKind {
        CommandKind::Action
    }

    fn execute(
        &self,
        mail: &mut dyn MailAdapter,
        _arguments: &Arguments,
        _block: Option<&Block>,
        ctx: &mut ExecutionContext<'_>,
    ) -> Result<Flow, SieveError> {
        accumulate(mail, Action::Discard, ctx)
    }
}

pub struct FileInto;

impl ExecutableCommand for FileInto {
    fn kind(&self) -> CommandKind {
        CommandKind::Action
    }

    fn validate_arguments(
        &self,
        arguments: &Arguments,
        ctx: &ExecutionContext<'_>,
    ) -> Result<(), SieveError> {
        args::single_string(arguments, ctx).map(|_| ())
    }

    fn execute(
        &self,
        mail: &mut dyn MailAdapter,
        arguments: &Arguments,
        _block: Option<&Block>,
        ctx: &mut ExecutionContext<'_>,
    ) -> Result<Flow, SieveError> {
        let mailbox = args::single_string(arguments, ctx)?.to_string();
        accumulate(mail, Action::FileInto { mailbox }, ctx)
    }
}

pub struct Redirect;

impl ExecutableCommand for Redirect {
    fn kind(&self) -> CommandKind {
        CommandKind::Action
    }

    fn validate_arguments(
        &self,
        arguments: &Arguments,
        ctx: &ExecutionContext<'_>,
    ) -> Result<(), SieveError> {
        let address = args::single_string(arguments, ctx)?;
        if address.trim().is_empty() {
            return Err(ctx.syntax_error("Expecting a redirect address"));
        }
        Ok(())
    }

    fn execute(
        &self,
        mail: &mut dyn MailAdapter,
        arguments: &Arguments,
        _block: Option<&Block>,
        ctx: &mut ExecutionContext<'_>,
    ) -> Result<Flow, SieveError> {
        let address = args::single_string(arguments, ctx)?.trim().to_string();
        accumulate(mail, Action::Redirect { address }, ctx)
    }
}

/// `reject` may not be combined with any other action, in either order.
pub struct Reject;

impl ExecutableCommand for Reject {
    fn kind(&self) -> CommandKind {
        CommandKind::Action
    }

    fn validate_state(&self, ctx: &ExecutionContext<'_>) -> Result<(), SieveError> {
        validate_kind_state(self.kind(), ctx)?;
        if ctx.state().has_actions() {
            return Err(ctx.command_error(
                "The \"reject\" command is not allowed with other Action Commands",
            ));
        }
        Ok(())
    }

    fn validate_arguments(
        &self,
        arguments: &Arguments,
        ctx: &ExecutionContext<'_>,
    ) -> Result<(), SieveError> {
        args::single_string(arguments, ctx).map(|_| ())
    }

    fn execute(
        &self,
        mail: &mut dyn MailAdapter,
        arguments: &Arguments,
        _block: Option<&Block>,
        ctx: &mut ExecutionContext<'_>,
    ) -> Result<Flow, SieveError> {
        let message = args::single_string(arguments, ctx)?.to_string();
        accumulate(mail, Action::Reject { message }, ctx)
    }

    fn update_state(&self, ctx: &mut ExecutionContext<'_>) {
        record_kind_state(self.kind(), ctx);
        ctx.state_mut().set_rejected();
    }
}

pub(crate) fn new_keep() -> Result<Box<dyn ExecutableCommand>, String> {
    Ok(Box::new(Keep))
}

pub(crate) fn new_discard() -> Result<Box<dyn ExecutableCommand>, String> {
    Ok(Box::new(Discard))
}

pub(crate) fn new_fileinto() -> Result<Box<dyn ExecutableCommand>, String> {
    Ok(Box::new(FileInto))
}

pub(crate) fn new_redirect() -> Result<Box<dyn ExecutableCommand>, String> {
    Ok(Box::new(Redirect))
}

pub(crate) fn new_reject() -> Result<Box<dyn ExecutableCommand>, String> {
    Ok(Box::new(Reject))
}
