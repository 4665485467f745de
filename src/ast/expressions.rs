use crate::lexer::tokens::{Token, TokenKind};

use super::types::PrimitiveType;

/// A literal as it appeared in source: its text and the kind of token it
/// was lexed as.
#[derive(Debug, Clone, PartialEq)]
pub struct LiteralExpr {
    pub value: String,
    pub kind: TokenKind,
}

/// Expression tree. Every node owns its children exclusively.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(LiteralExpr),
    Variable {
        name: String,
    },
    Binary {
        left: Box<Expr>,
        operator: Token,
        right: Box<Expr>,
    },
    /// Prefix `-`, `+`, `!`, `++` or `--`.
    Unary {
        operator: Token,
        right: Box<Expr>,
    },
    /// Postfix `++` or `--`.
    Postfix {
        operand: Box<Expr>,
        operator: Token,
    },
    /// `name = right`, or a compound form such as `name += right`.
    Assignment {
        name: String,
        operator: Token,
        right: Box<Expr>,
    },
    Grouping {
        inner: Box<Expr>,
    },
    ArrayLiteral {
        elements: Vec<Expr>,
    },
    /// `new T[d0][d1]...`; a `None` dimension was left unsized.
    NewArray {
        base_type: PrimitiveType,
        dimensions: Vec<Option<Expr>>,
    },
}

impl Expr {
    pub fn literal(value: impl Into<String>, kind: TokenKind) -> Expr {
        Expr::Literal(LiteralExpr {
            value: value.into(),
            kind,
        })
    }

    pub fn variable(name: impl Into<String>) -> Expr {
        Expr::Variable { name: name.into() }
    }

    /// Whether the expression has an array shape (literal or allocation).
    pub fn is_array_shaped(&self) -> bool {
        matches!(self, Expr::ArrayLiteral { .. } | Expr::NewArray { .. })
    }
}
