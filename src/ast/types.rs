//! Type descriptors for the AST.
//!
//! Declarations name a [`PrimitiveType`] (or `var`) plus a number of `[]`
//! pairs; the type checker works with the fully resolved [`Type`], whose
//! display form is the descriptor string used in diagnostics (`int`,
//! `float[]`, `char[][]`).

use std::fmt::Display;

use crate::lexer::tokens::TokenKind;

/// Base types that can be named in source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveType {
    Int,
    Float,
    Double,
    Char,
    Boolean,
}

impl PrimitiveType {
    pub fn from_token_kind(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Int => Some(PrimitiveType::Int),
            TokenKind::Float => Some(PrimitiveType::Float),
            TokenKind::Double => Some(PrimitiveType::Double),
            TokenKind::Char => Some(PrimitiveType::Char),
            TokenKind::Boolean => Some(PrimitiveType::Boolean),
            _ => None,
        }
    }

    pub fn to_type(self) -> Type {
        match self {
            PrimitiveType::Int => Type::Int,
            PrimitiveType::Float => Type::Float,
            PrimitiveType::Double => Type::Double,
            PrimitiveType::Char => Type::Char,
            PrimitiveType::Boolean => Type::Boolean,
        }
    }
}

impl Display for PrimitiveType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.to_type().fmt(f)
    }
}

/// The type written in a declaration: a primitive type or `var`, followed by
/// zero or more `[]` pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeclaredType {
    /// `None` for `var`, whose type is inferred from the initializer.
    pub base: Option<PrimitiveType>,
    pub dimensions: usize,
}

impl DeclaredType {
    pub fn is_array(&self) -> bool {
        self.dimensions > 0
    }

    /// The resolved type, or `None` when the declaration uses `var`.
    pub fn resolve(&self) -> Option<Type> {
        self.base.map(|base| Type::array_of(base.to_type(), self.dimensions))
    }
}

impl Display for DeclaredType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.base {
            Some(base) => write!(f, "{}", base)?,
            None => write!(f, "var")?,
        }
        write!(f, "{}", "[]".repeat(self.dimensions))
    }
}

/// A resolved type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    Int,
    Float,
    Double,
    Char,
    String,
    Boolean,
    Array(Box<Type>),
}

impl Type {
    /// Wraps `base` in `dimensions` levels of array.
    pub fn array_of(base: Type, dimensions: usize) -> Type {
        (0..dimensions).fold(base, |inner, _| Type::Array(Box::new(inner)))
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Type::Int | Type::Float)
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Type::Array(_))
    }

    /// The element type one level down, if this is an array.
    pub fn element(&self) -> Option<&Type> {
        match self {
            Type::Array(inner) => Some(inner),
            _ => None,
        }
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Int => write!(f, "int"),
            Type::Float => write!(f, "float"),
            Type::Double => write!(f, "double"),
            Type::Char => write!(f, "char"),
            Type::String => write!(f, "string"),
            Type::Boolean => write!(f, "boolean"),
            Type::Array(inner) => write!(f, "{}[]", inner),
        }
    }
}
