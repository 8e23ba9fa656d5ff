use drop_bomb::DropBomb;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum BindingStatus {
    /// The name exists but its initializer has not finished resolving.
    Declared,
    /// The name is ready to be referenced.
    Defined,
}

/// The name was already introduced in the innermost scope.
pub(super) struct AlreadyInScope;

/// The stack of lexical scopes the resolver walks through.
///
/// Only block-structured scopes live here: the global scope is deliberately
/// absent, so names that are not found in any scope resolve dynamically
/// against the global environment at runtime.
#[derive(Debug, Default)]
pub(super) struct ScopeStack {
    scopes: Vec<HashMap<String, BindingStatus>>,
}

impl ScopeStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enter_scope(&mut self) -> ScopeGuard {
        self.scopes.push(HashMap::new());
        ScopeGuard(DropBomb::new("You forgot to close a scope"))
    }

    pub fn exit_scope(&mut self, mut guard: ScopeGuard) {
        guard.0.defuse();
        self.scopes.pop();
    }

    /// Introduce a name in the innermost scope, not yet ready for use.
    /// A no-op at global depth.
    pub fn declare(&mut self, name: &str) -> Result<(), AlreadyInScope> {
        match self.scopes.last_mut() {
            None => Ok(()),
            Some(scope) => {
                if scope.contains_key(name) {
                    return Err(AlreadyInScope);
                }
                scope.insert(name.to_owned(), BindingStatus::Declared);
                Ok(())
            }
        }
    }

    /// Mark a name as ready for use (inserting it if needed).
    /// A no-op at global depth.
    pub fn define(&mut self, name: &str) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.to_owned(), BindingStatus::Defined);
        }
    }

    /// The status of a name in the innermost scope only.
    pub fn innermost_status(&self, name: &str) -> Option<BindingStatus> {
        self.scopes.last().and_then(|scope| scope.get(name)).copied()
    }

    /// How many scopes separate the current position from the one holding
    /// `name`. `None` means the name must be a global.
    pub fn depth_of(&self, name: &str) -> Option<usize> {
        self.scopes
            .iter()
            .rev()
            .position(|scope| scope.contains_key(name))
    }
}

/// `ScopeGuard` ensures, at runtime, that we never leave a scope unclosed.
/// The resolver code has no way to defuse the drop bomb (the field is private
/// outside of this module) - the resolver is forced to call
/// [`ScopeStack::exit_scope`], which gives us a chance to pop the scope.
#[must_use = "Nested scopes must be closed!"]
pub(super) struct ScopeGuard(DropBomb);
