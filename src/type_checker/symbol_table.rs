//! Scoped symbol storage for the type checker.

use std::collections::HashMap;

use tracing::trace;

use crate::{
    ast::types::Type,
    errors::errors::{Error, ErrorImpl},
};

/// One frame of variable declarations.
#[derive(Debug, Default)]
pub struct Scope {
    variable_lookup: HashMap<String, Type>,
}

impl Scope {
    pub fn declare_variable(&mut self, name: &str, ty: Type) -> Result<(), Error> {
        if self.variable_lookup.contains_key(name) {
            Err(Error::unpositioned(ErrorImpl::VariableAlreadyDeclared {
                variable: name.to_string(),
            }))
        } else {
            self.variable_lookup.insert(name.to_string(), ty);
            Ok(())
        }
    }

    pub fn get_variable(&self, name: &str) -> Option<&Type> {
        self.variable_lookup.get(name)
    }
}

/// A stack of scopes addressed by index. Index 0 is the global scope, which
/// lives as long as the table; every other scope is pushed on block entry
/// and popped on block exit.
#[derive(Debug)]
pub struct SymbolTable {
    scopes: Vec<Scope>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable {
            scopes: vec![Scope::default()],
        }
    }

    /// Opens a new innermost scope.
    pub fn push_scope(&mut self) {
        self.scopes.push(Scope::default());
        trace!(scope = self.current_scope(), "entered scope");
    }

    /// Closes the innermost scope. The global scope is never popped.
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
            trace!(scope = self.scopes.len(), "left scope");
        }
    }

    /// Index of the innermost scope.
    fn current_scope(&self) -> usize {
        self.scopes.len() - 1
    }

    /// Declares `name` in the innermost scope. Shadowing an outer
    /// declaration is allowed; declaring twice in one scope is not.
    pub fn declare(&mut self, name: &str, ty: Type) -> Result<(), Error> {
        let index = self.current_scope();
        trace!(scope = index, name, ty = %ty, "declaring variable");
        self.scopes[index].declare_variable(name, ty)
    }

    /// Looks `name` up from the innermost scope outwards.
    pub fn lookup(&self, name: &str) -> Option<&Type> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get_variable(name))
    }
}
