//! Error types and error handling for the transpiler.
//!
//! This module defines the error type shared by every stage of the
//! pipeline. It includes:
//!
//! - Error structures with optional source position information
//! - Specific error variants for the lexical, parse and type phases
//! - Error classification and helpful suggestions

pub mod errors;
