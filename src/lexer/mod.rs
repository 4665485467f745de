//! Lexical analysis module for the transpiler.
//!
//! This module contains the lexer (tokenizer) that converts source code
//! into a stream of tokens for parsing. It handles:
//!
//! - Tokenization of source code using regex patterns
//! - Recognition of keywords, identifiers, literals, and operators
//! - Token position tracking for error reporting
//! - Comments and whitespace handling
//! - Soft diagnostics for malformed literals and comments, which are logged
//!   and collected while scanning carries on

pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;
