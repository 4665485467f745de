//! Declaration type parsing.
//!
//! A declaration starts with a primitive type keyword or `var`. Primitive
//! types may be followed by any number of empty `[]` pairs; sizes belong in
//! `new` expressions and are rejected here.

use crate::{
    ast::types::{DeclaredType, PrimitiveType},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::parser::Parser;

/// Parses a primitive type keyword, advancing past it.
pub fn parse_primitive_type(parser: &mut Parser, expected: &str) -> Result<PrimitiveType, Error> {
    match PrimitiveType::from_token_kind(parser.current_token_kind()) {
        Some(primitive) => {
            parser.advance();
            Ok(primitive)
        }
        None => Err(parser.unexpected(expected)),
    }
}

/// Parses the type at the start of a variable declaration.
pub fn parse_declared_type(parser: &mut Parser) -> Result<DeclaredType, Error> {
    if parser.current_token_kind() == TokenKind::Var {
        parser.advance();
        return Ok(DeclaredType {
            base: None,
            dimensions: 0,
        });
    }

    let base = parse_primitive_type(parser, "type in variable declaration")?;

    let mut dimensions = 0;
    while parser.current_token_kind() == TokenKind::OpenBracket {
        parser.advance();

        if parser.current_token_kind() != TokenKind::CloseBracket {
            let found = parser.current_token().value.clone();
            return Err(Error::new(
                ErrorImpl::ArraySizeInDeclaration { found },
                parser.get_position(),
            ));
        }

        parser.advance();
        dimensions += 1;
    }

    Ok(DeclaredType {
        base: Some(base),
        dimensions,
    })
}
