/// Argument shape checks shared by commands and tests.
///
/// Every check fails with a syntax error stamped at the current coordinate.
use crate::sieve::ast::{Argument, Arguments, Test};
use crate::sieve::context::ExecutionContext;
use crate::sieve::error::SieveError;

pub fn expect_no_arguments(
    arguments: &Arguments,
    ctx: &ExecutionContext<'_>,
) -> Result<(), SieveError> {
    if !arguments.args.is_empty() {
        return Err(ctx.syntax_error(format!(
            "No arguments permitted. Found {}",
            arguments.args.len()
        )));
    }
    expect_no_tests(arguments, ctx)
}

pub fn expect_no_tests(arguments: &Arguments, ctx: &ExecutionContext<'_>) -> Result<(), SieveError> {
    if arguments.tests.is_some() {
        return Err(ctx.syntax_error("No tests permitted"));
    }
    Ok(())
}

/// Exactly one argument, and it is a string-list.
pub fn string_list<'a>(
    arguments: &'a Arguments,
    ctx: &ExecutionContext<'_>,
) -> Result<&'a [String], SieveError> {
    expect_no_tests(arguments, ctx)?;
    match arguments.args.as_slice() {
        [Argument::StringList(items)] => Ok(items),
        [other] => Err(ctx.syntax_error(format!(
            "Expecting a string-list, found a {}",
            other.kind()
        ))),
        args => Err(ctx.syntax_error(format!(
            "Exactly 1 argument permitted. Found {}",
            args.len()
        ))),
    }
}

/// Exactly one argument, a string-list holding exactly one string.
pub fn single_string<'a>(
    arguments: &'a Arguments,
    ctx: &ExecutionContext<'_>,
) -> Result<&'a str, SieveError> {
    match string_list(arguments, ctx)? {
        [s] => Ok(s),
        items => Err(ctx.syntax_error(format!(
            "Expecting exactly one string. Found {}",
            items.len()
        ))),
    }
}

/// The single test of `if`, `elsif` and `not`.
pub fn single_test<'a>(
    arguments: &'a Arguments,
    ctx: &ExecutionContext<'_>,
) -> Result<&'a Test, SieveError> {
    if !arguments.args.is_empty() {
        return Err(ctx.syntax_error(format!(
            "Found unexpected arguments before the test: {}",
            arguments.args.len()
        )));
    }
    match arguments.tests.as_ref().map(|list| list.tests.as_slice()) {
        Some([test]) => Ok(test),
        Some(tests) => Err(ctx.syntax_error(format!(
            "Expecting exactly one test. Found {}",
            tests.len()
        ))),
        None => Err(ctx.syntax_error("Expecting a test")),
    }
}

/// The test-list of `anyof`/`allof`. An empty list is legal.
pub fn test_list<'a>(
    arguments: &'a Arguments,
    ctx: &ExecutionContext<'_>,
) -> Result<&'a [Test], SieveError> {
    if !arguments.args.is_empty() {
        return Err(ctx.syntax_error(format!(
            "Found unexpected arguments before the test-list: {}",
            arguments.args.len()
        )));
    }
    arguments
        .tests
        .as_ref()
        .map(|list| list.tests.as_slice())
        .ok_or_else(|| ctx.syntax_error("Expecting a test-list"))
}
