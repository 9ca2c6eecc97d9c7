/// SIEVE interpreter core: tree nodes, registries, evaluators and comparators.
pub mod args;
pub mod ast;
pub mod command;
pub mod comparator;
pub mod context;
pub mod error;
pub mod glob;
pub mod interpreter;
pub mod registry;
pub mod test;

pub use ast::{Argument, Arguments, Block, Command, Script, ScriptCoordinate, Test, TestList};
pub use command::{CommandKind, ExecutableCommand, Flow};
pub use comparator::Comparator;
pub use context::ExecutionContext;
pub use error::{PatternError, SieveError};
pub use interpreter::SieveFactory;
pub use registry::{Registries, RegistriesBuilder};
pub use test::ExecutableTest;
