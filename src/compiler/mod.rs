//! Code generation module.
//!
//! This module turns a checked statement tree into JavaScript source. It
//! handles:
//!
//! - Statement emission with block indentation
//! - Fully parenthesized expression emission
//! - Re-quoting of string and character literals
//! - Lowering of multi-dimensional `new` arrays to fresh nested arrays
//!
//! Every emitter is a pure function returning the text of its node.

pub mod compiler;
pub mod expr;
pub mod stmt;
