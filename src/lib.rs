//! Evaluates parsed SIEVE (RFC 5228) scripts against a message and collects
//! the resulting actions.
//!
//! ```no_run
//! use sieve_interp::mail::CheckMailAdapter;
//! use sieve_interp::sieve::{Command, Script, SieveFactory};
//!
//! let factory = SieveFactory::builtin();
//! let script = Script::new(vec![Command::new("keep")]);
//! let mut mail = CheckMailAdapter::new().with_header("Subject", "hello");
//! factory.evaluate(&script, &mut mail).unwrap();
//! ```
pub mod config;
pub mod mail;
pub mod model;
pub mod sieve;
pub mod store;

pub use config::InterpreterConfig;
pub use mail::{MailAdapter, MailError};
pub use model::action::Action;
pub use sieve::{SieveError, SieveFactory};
