//! Main compiler module.
//!
//! This module contains the Compiler structure and its options, and the
//! `generate` entry points that turn a statement tree into JavaScript.

use tracing::debug;

use crate::ast::statements::Stmt;

use super::stmt::gen_statement;

/// Options controlling the shape of the generated code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerOptions {
    /// Keep the `f` suffix on float literals in the output.
    pub float_suffix: bool,
    /// Spaces per block nesting level.
    pub indent: usize,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        CompilerOptions {
            float_suffix: true,
            indent: 2,
        }
    }
}

/// Holds the options for one generation run. Generation reads the tree and
/// never mutates it, so a compiler can be shared freely.
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    pub options: CompilerOptions,
}

impl Compiler {
    pub fn new(options: CompilerOptions) -> Self {
        Compiler { options }
    }

    /// Emits every statement in order and concatenates the results.
    pub fn compile(&self, statements: &[Stmt]) -> String {
        statements
            .iter()
            .map(|statement| gen_statement(self, statement))
            .collect()
    }

    /// Prefixes every non-empty line of `code` with one level of indentation.
    pub fn indent(&self, code: &str) -> String {
        let padding = " ".repeat(self.options.indent);
        code.split_inclusive('\n')
            .map(|line| {
                if line.trim().is_empty() {
                    line.to_string()
                } else {
                    format!("{}{}", padding, line)
                }
            })
            .collect()
    }
}

/// Generates JavaScript with the default options. The tree is assumed to
/// have passed type checking.
pub fn generate(statements: &[Stmt]) -> String {
    generate_with(statements, &CompilerOptions::default())
}

pub fn generate_with(statements: &[Stmt], options: &CompilerOptions) -> String {
    let compiler = Compiler::new(options.clone());
    let output = compiler.compile(statements);

    debug!(bytes = output.len(), "generated javascript");
    output
}
