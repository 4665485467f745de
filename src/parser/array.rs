//! Array literal and allocation parsing.
//!
//! Brace literals are parsed against the shape expected at each nesting
//! depth. A depth with a fixed size must hold exactly that many elements;
//! a nested `{` is only allowed while there is a deeper dimension to fill.

use crate::{
    ast::expressions::Expr,
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{expr::parse_expr, parser::Parser, types::parse_primitive_type};

/// The size expected at one nesting depth of an array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayDimension {
    Fixed(usize),
    Dynamic,
}

/// Parses `{ e, e, ... }` at nesting `depth` of an array with the given shape.
/// A trailing comma before `}` is accepted.
pub fn parse_array_literal(
    parser: &mut Parser,
    shape: &[ArrayDimension],
    depth: usize,
) -> Result<Expr, Error> {
    let start = parser.get_position();
    parser.expect(TokenKind::OpenCurly, "'{' to open array literal")?;

    let mut elements = vec![];
    while parser.current_token_kind() != TokenKind::CloseCurly {
        if parser.current_token_kind() == TokenKind::OpenCurly {
            if depth + 1 >= shape.len() {
                return Err(Error::new(
                    ErrorImpl::ArrayNestingTooDeep { depth: depth + 1 },
                    parser.get_position(),
                ));
            }
            elements.push(parse_array_literal(parser, shape, depth + 1)?);
        } else {
            elements.push(parse_expr(parser)?);
        }

        match parser.current_token_kind() {
            TokenKind::Comma => {
                parser.advance();
            }
            TokenKind::CloseCurly => break,
            _ => return Err(parser.unexpected("',' or '}' in array literal")),
        }
    }

    parser.expect(TokenKind::CloseCurly, "'}' to close array literal")?;

    if let Some(ArrayDimension::Fixed(expected)) = shape.get(depth) {
        if elements.len() != *expected {
            return Err(Error::new(
                ErrorImpl::ArraySizeMismatch {
                    depth,
                    expected: *expected,
                    received: elements.len(),
                },
                start,
            ));
        }
    }

    Ok(Expr::ArrayLiteral { elements })
}

/// Parses `new T[size][...]`. The first dimension must be sized, and once a
/// dimension is left empty every later one must be empty too.
pub fn parse_new_array(parser: &mut Parser) -> Result<Expr, Error> {
    parser.expect(TokenKind::New, "'new'")?;
    let base_type = parse_primitive_type(parser, "primitive type after 'new'")?;

    let mut dimensions: Vec<Option<Expr>> = vec![];
    while parser.current_token_kind() == TokenKind::OpenBracket {
        let bracket = parser.advance();

        if parser.current_token_kind() == TokenKind::CloseBracket {
            if dimensions.is_empty() {
                return Err(Error::new(ErrorImpl::MissingArrayDimension, bracket.position));
            }
            parser.advance();
            dimensions.push(None);
        } else {
            if matches!(dimensions.last(), Some(None)) {
                return Err(Error::new(
                    ErrorImpl::SizedAfterUnsizedDimension,
                    bracket.position,
                ));
            }
            let size = parse_expr(parser)?;
            parser.expect(TokenKind::CloseBracket, "']' after array dimension")?;
            dimensions.push(Some(size));
        }
    }

    if dimensions.is_empty() {
        return Err(Error::new(
            ErrorImpl::MissingArrayDimension,
            parser.get_position(),
        ));
    }

    Ok(Expr::NewArray {
        base_type,
        dimensions,
    })
}

/// The shape implied by a `new` allocation, padded with dynamic dimensions up
/// to `declared` levels. Only integer literal sizes are fixed.
pub fn shape_of_new_array(dimensions: &[Option<Expr>], declared: usize) -> Vec<ArrayDimension> {
    let mut shape: Vec<ArrayDimension> = dimensions
        .iter()
        .map(|dimension| match dimension {
            Some(Expr::Literal(literal)) if literal.kind == TokenKind::NumberLiteral => literal
                .value
                .parse()
                .map_or(ArrayDimension::Dynamic, ArrayDimension::Fixed),
            _ => ArrayDimension::Dynamic,
        })
        .collect();

    if shape.len() < declared {
        shape.resize(declared, ArrayDimension::Dynamic);
    }

    shape
}
