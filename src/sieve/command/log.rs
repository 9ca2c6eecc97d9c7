/// `log [:trace|:debug|:info|:warn|:error|:fatal] <message>`
///
/// Writes the message through `tracing` and accumulates nothing.
use crate::mail::MailAdapter;
use crate::model::enums::LogLevel;
use crate::sieve::ast::{Argument, Arguments, Block};
use crate::sieve::command::{CommandKind, ExecutableCommand, Flow};
use crate::sieve::context::ExecutionContext;
use crate::sieve::error::SieveError;
use crate::sieve::args;

pub struct Log;

impl Log {
    fn parse<'a>(
        arguments: &'a Arguments,
        ctx: &ExecutionContext<'_>,
    ) -> Result<(LogLevel, &'a str), SieveError> {
        args::expect_no_tests(arguments, ctx)?;
        let (level, rest) = match arguments.args.as_slice() {
            [Argument::Tag(tag), rest @ ..] => {
                let level = LogLevel::from_sieve(tag)
                    .ok_or_else(|| ctx.syntax_error(format!("Unknown log level {tag}")))?;
                (level, rest)
            }
            rest => (LogLevel::default(), rest),
        };
        match rest {
            [Argument::StringList(items)] if items.len() == 1 => Ok((level, items[0].as_str())),
            _ => Err(ctx.syntax_error("Expecting a single log message")),
        }
    }
}

impl ExecutableCommand for Log {
    fn kind(&self) -> CommandKind {
        CommandKind::Plain
    }

    fn validate_arguments(
        &self,
        arguments: &Arguments,
        ctx: &ExecutionContext<'_>,
    ) -> Result<(), SieveError> {
        Self::parse(arguments, ctx).map(|_| ())
    }

    fn execute(
        &self,
        _mail: &mut dyn MailAdapter,
        arguments: &Arguments,
        _block: Option<&Block>,
        ctx: &mut ExecutionContext<'_>,
    ) -> Result<Flow, SieveError> {
        let (level, message) = Self::parse(arguments, ctx)?;
        let at = ctx.coordinate();
        match level {
            LogLevel::Trace => tracing::trace!(%at, "{message}"),
            LogLevel::Debug => tracing::debug!(%at, "{message}"),
            LogLevel::Info => tracing::info!(%at, "{message}"),
            LogLevel::Warn => tracing::warn!(%at, "{message}"),
            LogLevel::Error => tracing::error!(%at, "{message}"),
            LogLevel::Fatal => tracing::error!(%at, fatal = true, "{message}"),
        }
        Ok(Flow::Continue)
    }
}

pub(crate) fn new_log() -> Result<Box<dyn ExecutableCommand>, String> {
    Ok(Box::new(Log))
}
