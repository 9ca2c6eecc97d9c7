/// Name → implementation registries for commands, tests and comparators.
///
/// Registries are built once from a static mapping and never mutated
/// afterwards, so one set can serve any number of concurrent evaluations.
use std::collections::HashMap;
use std::fmt;

use crate::config::InterpreterConfig;
use crate::sieve::ast::ScriptCoordinate;
use crate::sieve::command::{self, ExecutableCommand};
use crate::sieve::comparator::{self, Comparator};
use crate::sieve::error::SieveError;
use crate::sieve::test::{self, ExecutableTest};

/// Builds a fresh implementation, or explains why it could not.
pub type Constructor<T> = fn() -> Result<Box<T>, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryKind {
    Command,
    Test,
    Comparator,
}

impl RegistryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Command => "Command",
            Self::Test => "Test",
            Self::Comparator => "Comparator",
        }
    }
}

impl fmt::Display for RegistryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub struct Registry<T: ?Sized> {
    kind: RegistryKind,
    entries: HashMap<String, Constructor<T>>,
}

impl<T: ?Sized> Registry<T> {
    /// Keys are stored lower-cased; a later duplicate replaces an earlier one.
    pub fn new<I, S>(kind: RegistryKind, mapping: I) -> Self
    where
        I: IntoIterator<Item = (S, Constructor<T>)>,
        S: AsRef<str>,
    {
        let entries = mapping
            .into_iter()
            .map(|(name, ctor)| (name.as_ref().to_ascii_lowercase(), ctor))
            .collect();
        Self { kind, entries }
    }

    pub fn kind(&self) -> RegistryKind {
        self.kind
    }

    pub fn lookup(
        &self,
        name: &str,
        coordinate: ScriptCoordinate,
    ) -> Result<Constructor<T>, SieveError> {
        self.entries
            .get(&name.to_ascii_lowercase())
            .copied()
            .ok_or_else(|| SieveError::Lookup {
                message: format!("{} named '{}' not mapped", self.kind, name),
                coordinate,
            })
    }

    pub fn new_instance(
        &self,
        name: &str,
        coordinate: ScriptCoordinate,
    ) -> Result<Box<T>, SieveError> {
        let ctor = self.lookup(name, coordinate)?;
        ctor().map_err(|reason| SieveError::Instantiation {
            message: format!("{} named '{}' could not be created: {}", self.kind, name, reason),
            coordinate,
        })
    }

    pub fn is_supported(&self, name: &str) -> bool {
        self.lookup(name, ScriptCoordinate::default()).is_ok()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The three registries an evaluation consults.
pub struct Registries {
    commands: Registry<dyn ExecutableCommand>,
    tests: Registry<dyn ExecutableTest>,
    comparators: Registry<dyn Comparator>,
    default_comparator: String,
}

impl Registries {
    /// Built-in commands, tests and comparators only.
    pub fn builtin() -> Self {
        RegistriesBuilder::with_builtins().build()
    }

    /// Built-ins minus whatever the configuration disables.
    pub fn from_config(config: &InterpreterConfig) -> Self {
        let mut builder = RegistriesBuilder::with_builtins();
        builder.remove(RegistryKind::Command, &config.disabled_commands);
        builder.remove(RegistryKind::Test, &config.disabled_tests);
        builder.remove(RegistryKind::Comparator, &config.disabled_comparators);
        builder.default_comparator(&config.default_comparator).build()
    }

    pub fn builder() -> RegistriesBuilder {
        RegistriesBuilder::with_builtins()
    }

    pub fn commands(&self) -> &Registry<dyn ExecutableCommand> {
        &self.commands
    }

    pub fn tests(&self) -> &Registry<dyn ExecutableTest> {
        &self.tests
    }

    pub fn comparators(&self) -> &Registry<dyn Comparator> {
        &self.comparators
    }

    /// Comparator used when a test carries no `:comparator` tag.
    pub fn default_comparator(&self) -> &str {
        &self.default_comparator
    }
}

/// Collects the name → constructor mapping before it is frozen into `Registries`.
pub struct RegistriesBuilder {
    commands: Vec<(String, Constructor<dyn ExecutableCommand>)>,
    tests: Vec<(String, Constructor<dyn ExecutableTest>)>,
    comparators: Vec<(String, Constructor<dyn Comparator>)>,
    default_comparator: String,
}

impl RegistriesBuilder {
    pub fn empty() -> Self {
        Self {
            commands: Vec::new(),
            tests: Vec::new(),
            comparators: Vec::new(),
            default_comparator: comparator::OCTET.to_string(),
        }
    }

    pub fn with_builtins() -> Self {
        let mut builder = Self::empty();
        for (name, ctor) in command::builtins() {
            builder = builder.command(name, ctor);
        }
        for (name, ctor) in test::builtins() {
            builder = builder.test(name, ctor);
        }
        for (name, ctor) in comparator::builtins() {
            builder = builder.comparator(name, ctor);
        }
        builder
    }

    pub fn command(mut self, name: &str, ctor: Constructor<dyn ExecutableCommand>) -> Self {
        self.commands.push((name.to_string(), ctor));
        self
    }

    pub fn test(mut self, name: &str, ctor: Constructor<dyn ExecutableTest>) -> Self {
        self.tests.push((name.to_string(), ctor));
        self
    }

    pub fn comparator(mut self, name: &str, ctor: Constructor<dyn Comparator>) -> Self {
        self.comparators.push((name.to_string(), ctor));
        self
    }

    pub fn default_comparator(mut self, name: &str) -> Self {
        self.default_comparator = name.to_string();
        self
    }

    fn remove(&mut self, kind: RegistryKind, names: &[String]) {
        let disabled = |name: &String| names.iter().any(|n| n.eq_ignore_ascii_case(name));
        match kind {
            RegistryKind::Command => self.commands.retain(|(n, _)| !disabled(n)),
            RegistryKind::Test => self.tests.retain(|(n, _)| !disabled(n)),
            RegistryKind::Comparator => self.comparators.retain(|(n, _)| !disabled(n)),
        }
    }

    pub fn build(self) -> Registries {
        Registries {
            commands: Registry::new(RegistryKind::Command, self.commands),
            tests: Registry::new(RegistryKind::Test, self.tests),
            comparators: Registry::new(RegistryKind::Comparator, self.comparators),
            default_comparator: self.default_comparator,
        }
    }
}
