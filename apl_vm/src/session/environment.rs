//! Variable scoping for a session.
//!
//! A stack of scopes with the global scope at the bottom. Lookups walk the
//! stack from the innermost scope outwards.

use std::collections::BTreeMap;

use crate::vm::value::Value;

/// Position of a scope in the stack. The global scope is `ScopeId(0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeId(usize);

impl ScopeId {
    pub const GLOBAL: ScopeId = ScopeId(0);
}

/// A single scope containing variable bindings, ordered by name.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    bindings: BTreeMap<String, Value>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define(&mut self, name: &str, value: Value) {
        self.bindings.insert(name.to_string(), value);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bindings.keys().map(String::as_str)
    }
}

/// Environment using a scope stack.
#[derive(Debug, Clone)]
pub struct Environment {
    /// Stack of scopes, with current scope at the top.
    scopes: Vec<Scope>,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    /// Create a new environment with a global scope.
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope::new()],
        }
    }

    pub fn push_scope(&mut self) {
        self.scopes.push(Scope::new());
    }

    /// Pop the current scope. The global scope is never popped.
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Number of scopes including the global one
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn current(&self) -> ScopeId {
        ScopeId(self.scopes.len() - 1)
    }

    /// Bind `name` in the current scope.
    pub fn define(&mut self, name: &str, value: Value) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.define(name, value);
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&Value> {
        self.lookup_env(name).map(|(v, _)| v)
    }

    /// Look up `name` together with the scope that binds it.
    pub fn lookup_env(&self, name: &str) -> Option<(&Value, ScopeId)> {
        self.scopes
            .iter()
            .enumerate()
            .rev()
            .find_map(|(i, scope)| scope.get(name).map(|v| (v, ScopeId(i))))
    }

    /// Bind `name` in a specific scope. Scopes popped since `scope` was
    /// obtained fall back to the current scope.
    pub fn define_in(&mut self, scope: ScopeId, name: &str, value: Value) {
        let current = self.current();
        let ScopeId(i) = if scope.0 < self.scopes.len() { scope } else { current };
        self.scopes[i].define(name, value);
    }

    /// Names visible from the current scope, innermost binding first.
    pub fn names(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for scope in self.scopes.iter().rev() {
            for name in scope.names() {
                if !seen.contains(&name) {
                    seen.push(name);
                }
            }
        }
        seen
    }
}
