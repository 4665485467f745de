use crate::{
    ast::{
        expressions::Expr,
        statements::{Stmt, VarDeclStmt},
        types::{DeclaredType, PrimitiveType},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{
    array::{parse_array_literal, parse_new_array, shape_of_new_array, ArrayDimension},
    expr::parse_expr,
    parser::Parser,
    types::parse_declared_type,
};

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let kind = parser.current_token_kind();
    if let Some(handler) = parser.get_stmt_lookup().get(&kind).copied() {
        return handler(parser);
    }

    let expr = parse_expr(parser)?;

    parser.expect(TokenKind::Semicolon, "';' after expression")?;

    Ok(Stmt::Expression(expr))
}

pub fn parse_block_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.expect(TokenKind::OpenCurly, "'{' to open block")?;

    parser.push_shape_scope();
    let body = parse_block_body(parser);
    parser.pop_shape_scope();
    let body = body?;

    parser.expect(TokenKind::CloseCurly, "'}' to close block")?;

    Ok(Stmt::Block(body))
}

fn parse_block_body(parser: &mut Parser) -> Result<Vec<Stmt>, Error> {
    let mut body = vec![];
    while parser.current_token_kind() != TokenKind::CloseCurly {
        if !parser.has_tokens() {
            return Err(parser.unexpected("'}' to close block"));
        }
        body.push(parse_stmt(parser)?);
    }

    Ok(body)
}

/// `if` and `while` branches are scopes of their own, braces or not.
fn parse_branch(parser: &mut Parser) -> Result<Box<Stmt>, Error> {
    parser.push_shape_scope();
    let branch = parse_stmt(parser);
    parser.pop_shape_scope();

    Ok(Box::new(branch?))
}

/// Parses the parenthesized condition that follows `if` and `while`.
fn parse_condition(parser: &mut Parser, keyword: &str) -> Result<Expr, Error> {
    parser.expect(TokenKind::OpenParen, &format!("'(' after '{}'", keyword))?;
    let condition = parse_expr(parser)?;
    parser.expect(TokenKind::CloseParen, &format!("')' after {} condition", keyword))?;

    Ok(condition)
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.advance();

    let condition = parse_condition(parser, "if")?;
    let then_branch = parse_branch(parser)?;

    let else_branch = if parser.current_token_kind() == TokenKind::Else {
        parser.advance();
        Some(parse_branch(parser)?)
    } else {
        None
    };

    Ok(Stmt::If {
        condition,
        then_branch,
        else_branch,
    })
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.advance();

    let condition = parse_condition(parser, "while")?;
    let body = parse_branch(parser)?;

    Ok(Stmt::While { condition, body })
}

/// `print(expr);` and its synonym `println(expr);`
pub fn parse_print_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let keyword = parser.advance();

    parser.expect(TokenKind::OpenParen, &format!("'(' after '{}'", keyword.value))?;
    let expr = parse_expr(parser)?;
    parser.expect(TokenKind::CloseParen, "')' after print argument")?;
    parser.expect(TokenKind::Semicolon, "';' after print statement")?;

    Ok(Stmt::Print(expr))
}

pub fn parse_var_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let declared_type = parse_declared_type(parser)?;

    let name = parser
        .expect(TokenKind::Identifier, "identifier in variable declaration")?
        .value;

    let mut initializer = None;
    if parser.current_token_kind() == TokenKind::Assignment {
        parser.advance();

        if parser.current_token_kind() == TokenKind::Semicolon {
            return Err(Error::new(
                ErrorImpl::MissingInitializer { variable: name },
                parser.get_position(),
            ));
        }

        initializer = Some(if declared_type.is_array() {
            parse_array_initializer(parser, &name, declared_type)?
        } else if declared_type.base.is_none() && parser.current_token_kind() == TokenKind::New {
            parse_inferred_allocation(parser, &name)?
        } else if declared_type.base == Some(PrimitiveType::Boolean) {
            parse_boolean_initializer(parser, &name)?
        } else {
            parse_expr(parser)?
        });
    }

    parser.expect(TokenKind::Semicolon, "';' after variable declaration")?;

    // Scalars hide outer arrays of the same name. A `var` allocation has
    // already recorded its own shape.
    if !declared_type.is_array() && !matches!(initializer, Some(Expr::NewArray { .. })) {
        parser.declare_shape(&name, None);
    }

    Ok(Stmt::VarDecl(VarDeclStmt {
        declared_type,
        name,
        initializer,
    }))
}

/// Array declarations take either a brace literal or a `new` allocation.
/// The shape of the initializer is remembered under the variable's name.
fn parse_array_initializer(
    parser: &mut Parser,
    name: &str,
    declared_type: DeclaredType,
) -> Result<Expr, Error> {
    match parser.current_token_kind() {
        TokenKind::OpenCurly => {
            let shape = vec![ArrayDimension::Dynamic; declared_type.dimensions];
            let literal = parse_array_literal(parser, &shape, 0)?;
            parser.declare_shape(name, Some(shape));
            Ok(literal)
        }
        TokenKind::New => {
            let allocation = parse_new_array(parser)?;
            if let Expr::NewArray { dimensions, .. } = &allocation {
                let shape = shape_of_new_array(dimensions, declared_type.dimensions);
                parser.declare_shape(name, Some(shape));
            }
            Ok(allocation)
        }
        _ => Err(Error::new(
            ErrorImpl::ArrayInitializerRequired {
                variable: name.to_string(),
            },
            parser.get_position(),
        )),
    }
}

/// `var name = new T[...]...;` takes its shape from the allocation itself.
fn parse_inferred_allocation(parser: &mut Parser, name: &str) -> Result<Expr, Error> {
    let allocation = parse_new_array(parser)?;
    if let Expr::NewArray { dimensions, .. } = &allocation {
        let shape = shape_of_new_array(dimensions, dimensions.len());
        parser.declare_shape(name, Some(shape));
    }

    Ok(allocation)
}

fn parse_boolean_initializer(parser: &mut Parser, name: &str) -> Result<Expr, Error> {
    let position = parser.get_position();
    let value = parse_expr(parser)?;

    match &value {
        Expr::Literal(literal) if literal.kind == TokenKind::BooleanLiteral => Ok(value),
        _ => Err(Error::new(
            ErrorImpl::BooleanLiteralRequired {
                variable: name.to_string(),
            },
            position,
        )),
    }
}
