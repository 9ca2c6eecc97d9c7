pub mod header;

use crate::mail::MailAdapter;
use crate::sieve::ast::Arguments;
use crate::sieve::context::ExecutionContext;
use crate::sieve::error::SieveError;
use crate::sieve::registry::Constructor;

/// A boolean predicate. Arguments are validated before `evaluate` is called.
pub trait ExecutableTest {
    fn validate_arguments(
        &self,
        arguments: &Arguments,
        ctx: &ExecutionContext<'_>,
    ) -> Result<(), SieveError>;

    fn evaluate(
        &self,
        mail: &dyn MailAdapter,
        arguments: &Arguments,
        ctx: &mut ExecutionContext<'_>,
    ) -> Result<bool, SieveError>;
}

/// The built-in name → constructor mapping.
pub fn builtins() -> Vec<(&'static str, Constructor<dyn ExecutableTest>)> {
    type Ctor = Constructor<dyn ExecutableTest>;
    vec![
        ("true", logical::new_true as Ctor),
        ("false", logical::new_false as Ctor),
        ("not", logical::new_not as Ctor),
        ("anyof", logical::new_anyof as Ctor),
        ("allof", logical::new_allof as Ctor),
        ("header", header::new_header as Ctor),
        ("exists", header::new_exists as Ctor),
        ("address", address::new_address as Ctor),
        ("size", size::new_size as Ctor),
    ]
}
