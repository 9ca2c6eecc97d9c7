/// Per-evaluation state: position, registries, condition chain and command state.
///
/// A context lives for exactly one script evaluation and is threaded by
/// `&mut` through every evaluator; it is never shared between evaluations.
use crate::mail::MailError;
use crate::sieve::ast::ScriptCoordinate;
use crate::sieve::error::{PatternError, SieveError};
use crate::sieve::registry::Registries;

pub struct ExecutionContext<'r> {
    registries: &'r Registries,
    coordinate: ScriptCoordinate,
    conditions: ConditionManager,
    state: CommandStateManager,
}

impl<'r> ExecutionContext<'r> {
    pub fn new(registries: &'r Registries) -> Self {
        Self {
            registries,
            coordinate: ScriptCoordinate::default(),
            conditions: ConditionManager::new(),
            state: CommandStateManager::new(),
        }
    }

    pub fn registries(&self) -> &'r Registries {
        self.registries
    }

    pub fn coordinate(&self) -> ScriptCoordinate {
        self.coordinate
    }

    pub fn set_coordinate(&mut self, coordinate: ScriptCoordinate) {
        self.coordinate = coordinate;
    }

    pub fn conditions(&self) -> &ConditionManager {
        &self.conditions
    }

    pub fn conditions_mut(&mut self) -> &mut ConditionManager {
        &mut self.conditions
    }

    pub fn state(&self) -> &CommandStateManager {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut CommandStateManager {
        &mut self.state
    }

    pub fn syntax_error(&self, message: impl Into<String>) -> SieveError {
        SieveError::Syntax {
            message: message.into(),
            coordinate: self.coordinate,
        }
    }

    pub fn command_error(&self, message: impl Into<String>) -> SieveError {
        SieveError::Command {
            message: message.into(),
            coordinate: self.coordinate,
        }
    }

    pub fn feature_error(&self, message: impl Into<String>) -> SieveError {
        SieveError::Feature {
            message: message.into(),
            coordinate: self.coordinate,
        }
    }

    pub fn pattern_error(&self, source: PatternError) -> SieveError {
        SieveError::Pattern {
            source,
            coordinate: self.coordinate,
        }
    }

    pub fn mail_error(&self, source: MailError) -> SieveError {
        SieveError::MailAccess {
            source,
            coordinate: self.coordinate,
        }
    }
}

/// Tracks the `if`/`elsif`/`else` chain of each open block.
///
/// Each scope holds the result of the last test evaluated in its current
/// chain, or `None` when no chain is open. Entering a block pushes a scope
/// and leaving it pops, so chains at different depths never see each other.
#[derive(Debug)]
pub struct ConditionManager {
    scopes: Vec<Option<bool>>,
}

impl ConditionManager {
    fn new() -> Self {
        Self { scopes: vec![None] }
    }

    pub fn push_scope(&mut self) {
        self.scopes.push(None);
    }

    pub fn pop_scope(&mut self) {
        // The script-level scope is never popped.
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    fn current(&mut self) -> &mut Option<bool> {
        if self.scopes.is_empty() {
            self.scopes.push(None);
        }
        let last = self.scopes.len() - 1;
        &mut self.scopes[last]
    }

    /// Records the result of an `if` or an evaluated `elsif` test.
    pub fn set_test_result(&mut self, result: bool) {
        *self.current() = Some(result);
    }

    pub fn last_test_result(&self) -> Option<bool> {
        self.scopes.last().copied().flatten()
    }

    /// `None` when there is no open chain to attach to.
    pub fn is_elsif_run_allowed(&self) -> Option<bool> {
        self.last_test_result().map(|matched| !matched)
    }

    pub fn is_else_run_allowed(&self) -> Option<bool> {
        self.is_elsif_run_allowed()
    }

    pub fn close_chain(&mut self) {
        *self.current() = None;
    }
}

/// Prolog, action and reject bookkeeping.
#[derive(Debug)]
pub struct CommandStateManager {
    in_prolog: bool,
    has_actions: bool,
    rejected: bool,
}

impl CommandStateManager {
    fn new() -> Self {
        Self {
            in_prolog: true,
            has_actions: false,
            rejected: false,
        }
    }

    pub fn is_in_prolog(&self) -> bool {
        self.in_prolog
    }

    /// One-way: once left, the prolog cannot be re-entered.
    pub fn leave_prolog(&mut self) {
        self.in_prolog = false;
    }

    pub fn has_actions(&self) -> bool {
        self.has_actions
    }

    pub fn set_has_actions(&mut self) {
        self.has_actions = true;
    }

    pub fn is_rejected(&self) -> bool {
        self.rejected
    }

    pub fn set_rejected(&mut self) {
        self.rejected = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_condition_chain() {
        let mut cm = ConditionManager::new();
        assert_eq!(cm.is_elsif_run_allowed(), None);

        cm.set_test_result(false);
        assert_eq!(cm.is_elsif_run_allowed(), Some(true));
        cm.set_test_result(true);
        assert_eq!(cm.is_else_run_allowed(), Some(false));

        cm.close_chain();
        assert_eq!(cm.is_else_run_allowed(), None);
    }

    #[test]
    fn test_nested_scope_restores_outer_chain() {
        let mut cm = ConditionManager::new();
        cm.set_test_result(false);
        cm.push_scope();
        assert_eq!(cm.last_test_result(), None);
        cm.set_test_result(true);
        cm.pop_scope();
        assert_eq!(cm.last_test_result(), Some(false));
        assert_eq!(cm.depth(), 1);
        cm.pop_scope();
        assert_eq!(cm.depth(), 1);
    }

    #[test]
    fn test_prolog_is_one_way() {
        let mut state = CommandStateManager::new();
        assert!(state.is_in_prolog());
        state.leave_prolog();
        state.leave_prolog();
        assert!(!state.is_in_prolog());
        assert!(!state.has_actions());
        assert!(!state.is_rejected());
    }

    #[test]
    fn test_errors_stamped_with_current_coordinate() {
        let registries = Registries::builtin();
        let mut ctx = ExecutionContext::new(&registries);
        ctx.set_coordinate(ScriptCoordinate::new(9, 4));
        let err = ctx.syntax_error("Expecting a string-list");
        assert_eq!(err.coordinate(), ScriptCoordinate::new(9, 4));
        let err = ctx.mail_error(MailError::Unreadable("closed".to_string()));
        assert_eq!(err.kind(), "mail-access");
    }
}
