/// Parsed tree node types for SIEVE scripts (RFC 5228).
///
/// The interpreter never parses text: an external parser (or a host building
/// trees by hand) produces these nodes, and `interpreter` walks them.
use std::fmt;

use serde::{Deserialize, Serialize};

/// A complete SIEVE script is a list of commands.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Script {
    pub commands: Vec<Command>,
}

impl Script {
    pub fn new(commands: Vec<Command>) -> Self {
        Self { commands }
    }
}

/// Line/column of a node, used to stamp diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptCoordinate {
    pub line: usize,
    pub column: usize,
}

impl ScriptCoordinate {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for ScriptCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// One statement: `name arguments [block]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Command {
    pub name: String,
    #[serde(default)]
    pub arguments: Arguments,
    #[serde(default)]
    pub block: Option<Block>,
    #[serde(default)]
    pub coordinate: ScriptCoordinate,
}

impl Command {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Arguments::default(),
            block: None,
            coordinate: ScriptCoordinate::default(),
        }
    }

    pub fn with_args(mut self, args: Vec<Argument>) -> Self {
        self.arguments.args = args;
        self
    }

    pub fn with_test(mut self, test: Test) -> Self {
        self.arguments.tests = Some(TestList::new(vec![test]));
        self
    }

    pub fn with_block(mut self, commands: Vec<Command>) -> Self {
        self.block = Some(Block::new(commands));
        self
    }

    pub fn at(mut self, line: usize, column: usize) -> Self {
        self.coordinate = ScriptCoordinate::new(line, column);
        self
    }
}

/// `{ ... }`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub commands: Vec<Command>,
}

impl Block {
    pub fn new(commands: Vec<Command>) -> Self {
        Self { commands }
    }
}

/// Positional arguments followed by an optional test or test-list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Arguments {
    #[serde(default)]
    pub args: Vec<Argument>,
    #[serde(default)]
    pub tests: Option<TestList>,
}

impl Arguments {
    pub fn new(args: Vec<Argument>) -> Self {
        Self { args, tests: None }
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty() && self.tests.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Argument {
    /// A single quoted string, multi-line `text:` literal or `[...]` list.
    /// A lone string is a list of one.
    StringList(Vec<String>),
    /// A number with any K/M/G quantifier already applied.
    Number(u64),
    /// A `:tag`, stored with its leading colon.
    Tag(String),
}

impl Argument {
    pub fn string(s: impl Into<String>) -> Self {
        Self::StringList(vec![s.into()])
    }

    pub fn strings<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::StringList(items.into_iter().map(Into::into).collect())
    }

    pub fn number(n: u64) -> Self {
        Self::Number(n)
    }

    /// Accepts `"is"` or `":is"`; tags are matched case-insensitively.
    pub fn tag(t: &str) -> Self {
        let t = t.to_ascii_lowercase();
        if t.starts_with(':') {
            Self::Tag(t)
        } else {
            Self::Tag(format!(":{t}"))
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::StringList(_) => "string-list",
            Self::Number(_) => "number",
            Self::Tag(_) => "tag",
        }
    }
}

/// A boolean-producing predicate node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Test {
    pub name: String,
    #[serde(default)]
    pub arguments: Arguments,
    #[serde(default)]
    pub coordinate: ScriptCoordinate,
}

impl Test {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Arguments::default(),
            coordinate: ScriptCoordinate::default(),
        }
    }

    pub fn with_args(mut self, args: Vec<Argument>) -> Self {
        self.arguments.args = args;
        self
    }

    /// Nested tests, as for `anyof (...)`, `allof (...)` and `not`.
    pub fn with_tests(mut self, tests: Vec<Test>) -> Self {
        self.arguments.tests = Some(TestList::new(tests));
        self
    }

    pub fn at(mut self, line: usize, column: usize) -> Self {
        self.coordinate = ScriptCoordinate::new(line, column);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestList {
    pub tests: Vec<Test>,
}

impl TestList {
    pub fn new(tests: Vec<Test>) -> Self {
        Self { tests }
    }
}
