//! Parser module for building the statement trees.
//!
//! This module contains the parser that transforms a stream of tokens
//! into a sequence of statements. It handles:
//!
//! - Statement parsing through a lookup table keyed by the leading token
//! - Expression parsing with one grammar rule per precedence level
//! - Declaration types and their `[]` suffixes
//! - Depth-aware array literals and `new` array allocations
//!
//! The parser never backtracks and stops at the first grammar violation.

pub mod array;
pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
pub mod types;
