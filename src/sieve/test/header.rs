/// `header` and `exists`.
use crate::mail::MailAdapter;
use crate::sieve::args;
use crate::sieve::ast::Arguments;
use crate::sieve::context::ExecutionContext;
use crate::sieve::error::SieveError;
use crate::sieve::test::matching::{any_match, parse_match_arguments};
use crate::sieve::test::ExecutableTest;

/// Values of every header named in `names`, in order, using the relaxed name match.
pub(crate) fn collect_header_values(
    mail: &dyn MailAdapter,
    names: &[String],
    ctx: &ExecutionContext<'_>,
) -> Result<Vec<String>, SieveError> {
    let mut values = Vec::new();
    for name in names {
        values.extend(mail.matching_header(name).map_err(|e| ctx.mail_error(e))?);
    }
    Ok(values)
}

/// `header [:comparator <c>] [:is|:contains|:matches] <header-names> <keys>`
pub struct Header;

impl ExecutableTest for Header {
    fn validate_arguments(
        &self,
        arguments: &Arguments,
        ctx: &ExecutionContext<'_>,
    ) -> Result<(), SieveError> {
        parse_match_arguments(arguments, false, ctx).map(|_| ())
    }

    fn evaluate(
        &self,
        mail: &dyn MailAdapter,
        arguments: &Arguments,
        ctx: &mut ExecutionContext<'_>,
    ) -> Result<bool, SieveError> {
        let parsed = parse_match_arguments(arguments, false, ctx)?;
        let values = collect_header_values(mail, parsed.header_names, ctx)?;
        any_match(parsed.comparator, parsed.match_type, &values, parsed.keys, ctx)
    }
}

/// `exists <header-names>`: true only if every named header is present.
pub struct Exists;

impl ExecutableTest for Exists {
    fn validate_arguments(
        &self,
        arguments: &Arguments,
        ctx: &ExecutionContext<'_>,
    ) -> Result<(), SieveError> {
        args::string_list(arguments, ctx).map(|_| ())
    }

    fn evaluate(
        &self,
        mail: &dyn MailAdapter,
        arguments: &Arguments,
        ctx: &mut ExecutionContext<'_>,
    ) -> Result<bool, SieveError> {
        for name in args::string_list(arguments, ctx)? {
            let values = mail.matching_header(name).map_err(|e| ctx.mail_error(e))?;
            if values.is_empty() {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

pub(crate) fn new_header() -> Result<Box<dyn ExecutableTest>, String> {
    Ok(Box::new(Header))
}

pub(crate) fn new_exists() -> Result<Box<dyn ExecutableTest>, String> {
    Ok(Box::new(Exists))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mail::CheckMailAdapter;
    use crate::sieve::ast::{Argument, Test};
    use crate::sieve::comparator::Comparator;
    use crate::sieve::error::PatternError;
    use crate::sieve::interpreter;
    use crate::sieve::registry::{Registries, RegistriesBuilder};

    fn mail() -> CheckMailAdapter {
        CheckMailAdapter::new()
            .with_header("From", "Boss <boss@example.com>")
            .with_header("Subject", "Quarterly REPORT")
            .with_header("Received", "from a.example.net")
            .with_header("Received", "from b.example.org")
    }

    fn eval(test: &Test, mail: &CheckMailAdapter) -> Result<bool, SieveError> {
        let registries = Registries::builtin();
        let mut ctx = ExecutionContext::new(&registries);
        interpreter::evaluate_test(test, mail, &mut ctx)
    }

    fn header(args: Vec<Argument>) -> Test {
        Test::new("header").with_args(args)
    }

    #[test]
    fn test_header_is_defaults_to_octet() {
        let m = mail();
        let exact = header(vec![Argument::string("subject"), Argument::string("Quarterly REPORT")]);
        assert!(eval(&exact, &m).unwrap());
        let wrong_case = header(vec![Argument::string("Subject"), Argument::string("quarterly report")]);
        assert!(!eval(&wrong_case, &m).unwrap());
    }

    #[test]
    fn test_header_with_casemap_comparator() {
        let m = mail();
        let test = header(vec![
            Argument::tag("comparator"),
            Argument::string("i;ascii-casemap"),
            Argument::tag("contains"),
            Argument::string("Subject"),
            Argument::string("report"),
        ]);
        assert!(eval(&test, &m).unwrap());
    }

    #[test]
    fn test_header_matches_each_occurrence() {
        let m = mail();
        let test = header(vec![
            Argument::tag("matches"),
            Argument::string(" received "),
            Argument::string("*.org"),
        ]);
        assert!(eval(&test, &m).unwrap());
    }

    #[test]
    fn test_header_missing_is_false() {
        let m = mail();
        let test = header(vec![
            Argument::tag("contains"),
            Argument::strings(["X-Spam-Flag", "Cc"]),
            Argument::string(""),
        ]);
        assert!(!eval(&test, &m).unwrap());
    }

    #[test]
    fn test_exists() {
        let m = mail();
        let both = Test::new("exists").with_args(vec![Argument::strings(["from", "SUBJECT"])]);
        assert!(eval(&both, &m).unwrap());
        let one_missing = Test::new("exists").with_args(vec![Argument::strings(["From", "Cc"])]);
        assert!(!eval(&one_missing, &m).unwrap());
        let bad = Test::new("exists").with_args(vec![Argument::number(1)]);
        assert!(matches!(eval(&bad, &m), Err(SieveError::Syntax { .. })));
    }

    /// Refuses every glob, standing in for a comparator with a stricter pattern syntax.
    struct Strict;

    impl Comparator for Strict {
        fn equals(&self, a: &str, b: &str) -> bool {
            a == b
        }
        fn contains(&self, container: &str, content: &str) -> bool {
            container.contains(content)
        }
        fn matches(&self, _value: &str, glob: &str) -> Result<bool, PatternError> {
            Err(PatternError::new(glob, "character classes are not supported"))
        }
    }

    fn new_strict() -> Result<Box<dyn Comparator>, String> {
        Ok(Box::new(Strict))
    }

    #[test]
    fn test_pattern_error_from_host_comparator() {
        let registries = RegistriesBuilder::with_builtins()
            .comparator("x-strict", new_strict)
            .build();
        let mut ctx = ExecutionContext::new(&registries);
        let test = header(vec![
            Argument::tag("comparator"),
            Argument::string("x-strict"),
            Argument::tag("matches"),
            Argument::string("Subject"),
            Argument::string("[a-z]*"),
        ])
        .at(5, 9);
        let err = interpreter::evaluate_test(&test, &mail(), &mut ctx).err().unwrap();
        assert!(matches!(err, SieveError::Pattern { .. }));
        assert_eq!(err.coordinate().line, 5);
    }
}
