use std::fmt::Display;

use thiserror::Error;

use crate::Position;

/// The stage of the pipeline an error belongs to.
///
/// Lexical errors are soft: they are collected and logged while scanning
/// continues. Parse and type errors abort the current compilation unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Lexical,
    Parse,
    Type,
}

impl Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Lexical => write!(f, "lexical error"),
            Phase::Parse => write!(f, "parse error"),
            Phase::Type => write!(f, "type error"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("{internal_error}")]
pub struct Error {
    internal_error: ErrorImpl,
    position: Option<Position>,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position: Some(position),
        }
    }

    /// Creates an error that has no source position, such as a type error
    /// raised against the position-free syntax tree.
    pub fn unpositioned(error_impl: ErrorImpl) -> Self {
        Error {
            internal_error: error_impl,
            position: None,
        }
    }

    /// Wraps the error with a description of where it was raised.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Error {
            internal_error: ErrorImpl::InContext {
                context: context.into(),
                inner: Box::new(self.internal_error),
            },
            position: self.position,
        }
    }

    pub fn get_position(&self) -> Option<&Position> {
        self.position.as_ref()
    }

    pub fn get_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    /// Returns the innermost error, skipping any context wrappers.
    pub fn root_cause(&self) -> &ErrorImpl {
        let mut current = &self.internal_error;
        while let ErrorImpl::InContext { inner, .. } = current {
            current = inner;
        }
        current
    }

    pub fn phase(&self) -> Phase {
        match self.root_cause() {
            ErrorImpl::UnrecognisedToken { .. }
            | ErrorImpl::InvalidFloat { .. }
            | ErrorImpl::UnterminatedString
            | ErrorImpl::UnterminatedChar
            | ErrorImpl::UnterminatedComment
            | ErrorImpl::InvalidEscape { .. }
            | ErrorImpl::CharLiteralLength { .. } => Phase::Lexical,
            ErrorImpl::UnexpectedToken { .. }
            | ErrorImpl::UnexpectedEof { .. }
            | ErrorImpl::BooleanLiteralRequired { .. }
            | ErrorImpl::MissingInitializer { .. }
            | ErrorImpl::ArraySizeInDeclaration { .. }
            | ErrorImpl::ArrayInitializerRequired { .. }
            | ErrorImpl::ArrayNestingTooDeep { .. }
            | ErrorImpl::ArraySizeMismatch { .. }
            | ErrorImpl::MissingArrayDimension
            | ErrorImpl::SizedAfterUnsizedDimension
            | ErrorImpl::InvalidCharLiteral { .. } => Phase::Parse,
            _ => Phase::Type,
        }
    }

    pub fn get_error_name(&self) -> &str {
        match self.root_cause() {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::InvalidFloat { .. } => "InvalidFloat",
            ErrorImpl::UnterminatedString => "UnterminatedString",
            ErrorImpl::UnterminatedChar => "UnterminatedChar",
            ErrorImpl::UnterminatedComment => "UnterminatedComment",
            ErrorImpl::InvalidEscape { .. } => "InvalidEscape",
            ErrorImpl::CharLiteralLength { .. } => "CharLiteralLength",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedEof { .. } => "UnexpectedEof",
            ErrorImpl::BooleanLiteralRequired { .. } => "BooleanLiteralRequired",
            ErrorImpl::MissingInitializer { .. } => "MissingInitializer",
            ErrorImpl::ArraySizeInDeclaration { .. } => "ArraySizeInDeclaration",
            ErrorImpl::ArrayInitializerRequired { .. } => "ArrayInitializerRequired",
            ErrorImpl::ArrayNestingTooDeep { .. } => "ArrayNestingTooDeep",
            ErrorImpl::ArraySizeMismatch { .. } => "ArraySizeMismatch",
            ErrorImpl::MissingArrayDimension => "MissingArrayDimension",
            ErrorImpl::SizedAfterUnsizedDimension => "SizedAfterUnsizedDimension",
            ErrorImpl::InvalidCharLiteral { .. } => "InvalidCharLiteral",
            ErrorImpl::VariableNotDeclared { .. } => "VariableNotDeclared",
            ErrorImpl::VariableAlreadyDeclared { .. } => "VariableAlreadyDeclared",
            ErrorImpl::TypeMatchError { .. } => "TypeMatchError",
            ErrorImpl::OperandTypeError { .. } => "OperandTypeError",
            ErrorImpl::NotAVariable { .. } => "NotAVariable",
            ErrorImpl::ConditionTypeError { .. } => "ConditionTypeError",
            ErrorImpl::ArrayElementMismatch { .. } => "ArrayElementMismatch",
            ErrorImpl::ArrayDimensionType { .. } => "ArrayDimensionType",
            ErrorImpl::ArrayTypeExpected { .. } => "ArrayTypeExpected",
            ErrorImpl::ScalarTypeExpected { .. } => "ScalarTypeExpected",
            ErrorImpl::CannotInferType { .. } => "CannotInferType",
            ErrorImpl::UnsupportedOperator { .. } => "UnsupportedOperator",
            ErrorImpl::UnknownLiteral { .. } => "UnknownLiteral",
            ErrorImpl::InContext { .. } => unreachable!("root_cause never returns a context wrapper"),
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match self.root_cause() {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::InvalidFloat { literal } => ErrorTip::Suggestion(format!(
                "Add at least one digit after the decimal point: `{}.0`",
                literal
            )),
            ErrorImpl::UnterminatedString => {
                ErrorTip::Suggestion(String::from("Close the string literal with `\"`"))
            }
            ErrorImpl::UnterminatedChar => {
                ErrorTip::Suggestion(String::from("Close the character literal with `'`"))
            }
            ErrorImpl::UnterminatedComment => {
                ErrorTip::Suggestion(String::from("Close the block comment with `*/`"))
            }
            ErrorImpl::InvalidEscape { .. } => ErrorTip::Suggestion(String::from(
                "Supported escapes are \\n, \\t, \\r, \\\", \\' and \\\\",
            )),
            ErrorImpl::CharLiteralLength { .. } | ErrorImpl::InvalidCharLiteral { .. } => {
                ErrorTip::Suggestion(String::from(
                    "Character literals hold exactly one character; use a string for more",
                ))
            }
            ErrorImpl::UnexpectedToken { expected, found } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, expected {}",
                found, expected
            )),
            ErrorImpl::UnexpectedEof { expected } => {
                ErrorTip::Suggestion(format!("Input ended early, expected {}", expected))
            }
            ErrorImpl::BooleanLiteralRequired { variable } => ErrorTip::Suggestion(format!(
                "Initialize `{}` with `true` or `false`",
                variable
            )),
            ErrorImpl::MissingInitializer { variable } => ErrorTip::Suggestion(format!(
                "Give `{}` a value after `=`, or drop the `=`",
                variable
            )),
            ErrorImpl::ArraySizeInDeclaration { .. } => ErrorTip::Suggestion(String::from(
                "Array sizes belong in the initializer, e.g. `int[] a = new int[3];`",
            )),
            ErrorImpl::ArrayInitializerRequired { variable } => ErrorTip::Suggestion(format!(
                "Initialize `{}` with `{{ ... }}` or `new <type>[size]`",
                variable
            )),
            ErrorImpl::ArrayNestingTooDeep { .. } => ErrorTip::Suggestion(String::from(
                "Nest array literals no deeper than the declared `[]` pairs",
            )),
            ErrorImpl::ArraySizeMismatch { expected, received, .. } => {
                ErrorTip::Suggestion(format!(
                    "Expected {} elements, received {}",
                    expected, received
                ))
            }
            ErrorImpl::MissingArrayDimension => ErrorTip::Suggestion(String::from(
                "Give the first dimension an explicit size, e.g. `new int[3]`",
            )),
            ErrorImpl::SizedAfterUnsizedDimension => ErrorTip::Suggestion(String::from(
                "Only trailing dimensions may be left unsized",
            )),
            ErrorImpl::VariableNotDeclared { variable } => {
                ErrorTip::Suggestion(format!("Variable `{}` not declared", variable))
            }
            ErrorImpl::VariableAlreadyDeclared { variable } => {
                ErrorTip::Suggestion(format!("Variable `{}` already declared", variable))
            }
            ErrorImpl::TypeMatchError { expected, received } => ErrorTip::Suggestion(format!(
                "Expected type `{}`, received `{}`",
                expected, received
            )),
            ErrorImpl::OperandTypeError {
                operator, expected, ..
            } => ErrorTip::Suggestion(format!(
                "Operator `{}` requires {} operands",
                operator, expected
            )),
            ErrorImpl::NotAVariable { operator } => ErrorTip::Suggestion(format!(
                "Apply `{}` to a variable name",
                operator
            )),
            ErrorImpl::ConditionTypeError { .. } => ErrorTip::Suggestion(String::from(
                "Conditions must be boolean, int, float or string",
            )),
            ErrorImpl::ArrayElementMismatch { first, .. } => ErrorTip::Suggestion(format!(
                "Make every element a `{}`",
                first
            )),
            ErrorImpl::ArrayDimensionType { .. } => {
                ErrorTip::Suggestion(String::from("Array dimensions must be `int`"))
            }
            ErrorImpl::ArrayTypeExpected { .. } | ErrorImpl::ScalarTypeExpected { .. } => {
                ErrorTip::None
            }
            ErrorImpl::CannotInferType { variable } => ErrorTip::Suggestion(format!(
                "Give `{}` an initializer or an explicit type",
                variable
            )),
            ErrorImpl::UnsupportedOperator { .. } | ErrorImpl::UnknownLiteral { .. } => {
                ErrorTip::None
            }
            ErrorImpl::InContext { .. } => unreachable!("root_cause never returns a context wrapper"),
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    // Lexical
    #[error("unrecognised character: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("no digits after decimal point, invalid float: {literal:?}")]
    InvalidFloat { literal: String },
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unterminated character literal")]
    UnterminatedChar,
    #[error("unterminated block comment")]
    UnterminatedComment,
    #[error("invalid escape sequence \\{escape}")]
    InvalidEscape { escape: char },
    #[error("character literal must hold exactly one character: {literal:?}")]
    CharLiteralLength { literal: String },

    // Parse
    #[error("expected {expected}, found {found:?}")]
    UnexpectedToken { expected: String, found: String },
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEof { expected: String },
    #[error("boolean variable {variable:?} can only be initialized with 'true' or 'false'")]
    BooleanLiteralRequired { variable: String },
    #[error("missing value in initialization of {variable:?}")]
    MissingInitializer { variable: String },
    #[error("array size not permitted in declaration, found {found:?}")]
    ArraySizeInDeclaration { found: String },
    #[error("array variable {variable:?} must be initialized with an array literal or 'new'")]
    ArrayInitializerRequired { variable: String },
    #[error("nested array literal at depth {depth} exceeds the declared dimensions")]
    ArrayNestingTooDeep { depth: usize },
    #[error("wrong number of elements in array literal at depth {depth} (expected {expected}, got {received})")]
    ArraySizeMismatch {
        depth: usize,
        expected: usize,
        received: usize,
    },
    #[error("array allocation requires at least one sized dimension")]
    MissingArrayDimension,
    #[error("sized array dimension follows an unsized one")]
    SizedAfterUnsizedDimension,
    #[error("invalid character literal: {literal:?}")]
    InvalidCharLiteral { literal: String },

    // Type
    #[error("variable {variable:?} not declared")]
    VariableNotDeclared { variable: String },
    #[error("variable {variable:?} already declared in this scope")]
    VariableAlreadyDeclared { variable: String },
    #[error("types do not match: expected {expected}, received {received}")]
    TypeMatchError { expected: String, received: String },
    #[error("operator '{operator}' requires {expected} operands, received {received}")]
    OperandTypeError {
        operator: String,
        expected: String,
        received: String,
    },
    #[error("operator '{operator}' can only be applied to variables")]
    NotAVariable { operator: String },
    #[error("condition must be coercible to boolean, received {received}")]
    ConditionTypeError { received: String },
    #[error("inconsistent types in array literal: {first} and {received}")]
    ArrayElementMismatch { first: String, received: String },
    #[error("array dimension must be int, received {received}")]
    ArrayDimensionType { received: String },
    #[error("array variable {variable:?} cannot hold a value of type {received}")]
    ArrayTypeExpected { variable: String, received: String },
    #[error("non-array variable {variable:?} cannot hold an array of type {received}")]
    ScalarTypeExpected { variable: String, received: String },
    #[error("cannot infer type of {variable:?} without an initializer")]
    CannotInferType { variable: String },
    #[error("unsupported operator '{operator}'")]
    UnsupportedOperator { operator: String },
    #[error("unknown literal {value:?}")]
    UnknownLiteral { value: String },

    #[error("{context}: {inner}")]
    InContext {
        context: String,
        inner: Box<ErrorImpl>,
    },
}
