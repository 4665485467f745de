/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - expressions: The closed set of expression variants
/// - statements: The closed set of statement variants
/// - types: Type descriptors used by declarations and the type checker
pub mod expressions;
pub mod statements;
pub mod types;
