//! Expression parsing, one function per precedence level.
//!
//! From loosest to tightest: assignment, `||`, `&&`, comparison, `+ -`,
//! then `* /` and prefix `- + !`, then primaries with `++`/`--`. Binary levels are
//! left-associative; assignment is right-associative.

use crate::{
    ast::expressions::Expr,
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{
    array::{parse_array_literal, parse_new_array, shape_of_new_array},
    parser::Parser,
};

type LevelParser = fn(&mut Parser) -> Result<Expr, Error>;

const ASSIGNMENT_OPERATORS: [TokenKind; 5] = [
    TokenKind::Assignment,
    TokenKind::PlusEquals,
    TokenKind::MinusEquals,
    TokenKind::StarEquals,
    TokenKind::SlashEquals,
];

const COMPARISON_OPERATORS: [TokenKind; 6] = [
    TokenKind::Less,
    TokenKind::LessEquals,
    TokenKind::Greater,
    TokenKind::GreaterEquals,
    TokenKind::Equals,
    TokenKind::NotEquals,
];

const PREFIX_OPERATORS: [TokenKind; 3] = [TokenKind::Dash, TokenKind::Plus, TokenKind::Not];

pub fn parse_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parse_assignment_expr(parser)
}

/// Parses a left-associative chain of `operand (op operand)*`.
fn parse_binary_level(
    parser: &mut Parser,
    operators: &[TokenKind],
    operand: LevelParser,
) -> Result<Expr, Error> {
    let mut left = operand(parser)?;

    while operators.contains(&parser.current_token_kind()) {
        let operator = parser.advance();
        let right = operand(parser)?;

        left = Expr::Binary {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        };
    }

    Ok(left)
}

pub fn parse_assignment_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let is_assignment = parser.current_token_kind() == TokenKind::Identifier
        && ASSIGNMENT_OPERATORS.contains(&parser.peek_kind(1));

    if !is_assignment {
        return parse_logical_or_expr(parser);
    }

    let name = parser.advance().value;
    let operator = parser.advance();

    let right = if operator.kind == TokenKind::Assignment {
        parse_assigned_value(parser, &name)?
    } else {
        parse_assignment_expr(parser)?
    };

    Ok(Expr::Assignment {
        name,
        operator,
        right: Box::new(right),
    })
}

/// The right-hand side of a plain `=`. Brace literals are only accepted for
/// names with a known array shape, and are checked against that shape.
fn parse_assigned_value(parser: &mut Parser, name: &str) -> Result<Expr, Error> {
    match parser.current_token_kind() {
        TokenKind::OpenCurly => match parser.array_shape(name).cloned() {
            Some(shape) => parse_array_literal(parser, &shape, 0),
            None => Err(parser.unexpected("expression")),
        },
        TokenKind::New => {
            let allocation = parse_new_array(parser)?;
            let known_dimensions = parser.array_shape(name).map(Vec::len);
            if let (Some(declared), Expr::NewArray { dimensions, .. }) =
                (known_dimensions, &allocation)
            {
                parser.update_array_shape(name, shape_of_new_array(dimensions, declared));
            }
            Ok(allocation)
        }
        _ => parse_assignment_expr(parser),
    }
}

pub fn parse_logical_or_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parse_binary_level(parser, &[TokenKind::Or], parse_logical_and_expr)
}

pub fn parse_logical_and_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parse_binary_level(parser, &[TokenKind::And], parse_comparison_expr)
}

pub fn parse_comparison_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parse_binary_level(parser, &COMPARISON_OPERATORS, parse_term_expr)
}

pub fn parse_term_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parse_binary_level(parser, &[TokenKind::Plus, TokenKind::Dash], parse_factor_expr)
}

/// Prefix operators bind to a whole factor; otherwise a chain of primaries
/// joined by `*` and `/`.
pub fn parse_factor_expr(parser: &mut Parser) -> Result<Expr, Error> {
    if PREFIX_OPERATORS.contains(&parser.current_token_kind()) {
        let operator = parser.advance();
        let right = parse_factor_expr(parser)?;

        return Ok(Expr::Unary {
            operator,
            right: Box::new(right),
        });
    }

    parse_binary_level(parser, &[TokenKind::Star, TokenKind::Slash], parse_primary_expr)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    match parser.current_token_kind() {
        // Prefix increments bind tighter than `*`, so `++x * 2` is `(++x) * 2`.
        TokenKind::PlusPlus | TokenKind::MinusMinus => {
            let operator = parser.advance();
            let operand = parse_primary_expr(parser)?;

            Ok(Expr::Unary {
                operator,
                right: Box::new(operand),
            })
        }
        TokenKind::Identifier => {
            let name = parser.advance().value;
            let variable = Expr::Variable { name };

            match parser.current_token_kind() {
                TokenKind::PlusPlus | TokenKind::MinusMinus => Ok(Expr::Postfix {
                    operand: Box::new(variable),
                    operator: parser.advance(),
                }),
                _ => Ok(variable),
            }
        }
        TokenKind::CharLiteral => {
            let token = parser.advance();
            if token.value.chars().count() != 1 {
                return Err(Error::new(
                    ErrorImpl::InvalidCharLiteral {
                        literal: token.value,
                    },
                    token.position,
                ));
            }
            Ok(Expr::literal(token.value, token.kind))
        }
        kind if kind.is_literal() => {
            let token = parser.advance();
            Ok(Expr::literal(token.value, token.kind))
        }
        TokenKind::OpenParen => {
            parser.advance();
            let inner = parse_logical_or_expr(parser)?;
            parser.expect(TokenKind::CloseParen, "')' to close grouping")?;

            Ok(Expr::Grouping {
                inner: Box::new(inner),
            })
        }
        _ => Err(parser.unexpected("expression")),
    }
}
