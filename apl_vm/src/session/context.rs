use std::rc::Rc;

use crate::config::{validate_origin, SessionConfig};
use crate::vm::error::AplResult;
use crate::vm::value::Value;

use super::environment::{Environment, ScopeId};
use super::registry::Registry;

/// Per-session interpreter state.
///
/// Holds the variable bindings, the index origin and a shared handle to the
/// host's registry. A context is never shared between sessions.
#[derive(Debug)]
pub struct Context {
    env: Environment,
    origin: i64,
    debug: bool,
    registry: Rc<Registry>,
}

impl Context {
    /// New session with index origin 1.
    pub fn new(registry: Rc<Registry>) -> Self {
        let config = SessionConfig::default();
        Self {
            env: Environment::new(),
            origin: config.origin,
            debug: config.debug,
            registry,
        }
    }

    pub fn with_config(registry: Rc<Registry>, config: &SessionConfig) -> AplResult<Self> {
        config.validate()?;
        Ok(Self {
            env: Environment::new(),
            origin: config.origin,
            debug: config.debug,
            registry,
        })
    }

    pub fn origin(&self) -> i64 {
        self.origin
    }

    pub fn set_origin(&mut self, origin: i64) -> AplResult<()> {
        validate_origin(origin)?;
        self.origin = origin;
        Ok(())
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Bind a copy of `value` to `name` in the current scope.
    pub fn assign(&mut self, name: &str, value: Value) {
        self.env.define(name, value);
    }

    pub fn lookup(&self, name: &str) -> Option<&Value> {
        self.env.lookup(name)
    }

    pub fn lookup_env(&self, name: &str) -> Option<(&Value, ScopeId)> {
        self.env.lookup_env(name)
    }

    /// Store `value` into the scope that owns `name`.
    pub fn assign_env(&mut self, name: &str, value: Value, scope: ScopeId) {
        self.env.define_in(scope, name, value);
    }

    pub fn push_scope(&mut self) {
        self.env.push_scope();
    }

    pub fn pop_scope(&mut self) {
        self.env.pop_scope();
    }

    /// Visible variable names
    pub fn names(&self) -> Vec<&str> {
        self.env.names()
    }
}
