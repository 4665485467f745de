//! Type checking and semantic analysis module.
//!
//! This module walks the statement tree and verifies it before any code is
//! generated:
//!
//! - Inferring the type of every expression
//! - Checking declarations and assignments against declared types
//! - Checking array literals and allocations against array types
//! - Managing nested scopes for blocks and control flow branches
//! - Detecting use of undeclared variables and redeclarations
//!
//! Analysis stops at the first error. The symbol table is owned by the
//! checker and discarded with it.

pub mod symbol_table;
pub mod type_checker;

#[cfg(test)]
mod tests;
