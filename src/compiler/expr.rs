use crate::{
    ast::expressions::{Expr, LiteralExpr},
    lexer::tokens::TokenKind,
};

use super::compiler::Compiler;

pub fn gen_expression(compiler: &Compiler, expr: &Expr) -> String {
    match expr {
        Expr::Literal(literal) => gen_literal(compiler, literal),
        Expr::Variable { name } => name.clone(),
        Expr::Binary {
            left,
            operator,
            right,
        } => format!(
            "({} {} {})",
            gen_expression(compiler, left),
            operator.value,
            gen_expression(compiler, right)
        ),
        Expr::Unary { operator, right } => {
            format!("({}{})", operator.value, gen_expression(compiler, right))
        }
        Expr::Postfix { operand, operator } => {
            format!("{}{}", gen_expression(compiler, operand), operator.value)
        }
        Expr::Assignment {
            name,
            operator,
            right,
        } => format!("{} {} {}", name, operator.value, gen_expression(compiler, right)),
        Expr::Grouping { inner } => format!("({})", gen_expression(compiler, inner)),
        Expr::ArrayLiteral { elements } => format!(
            "[{}]",
            elements
                .iter()
                .map(|element| gen_expression(compiler, element))
                .collect::<Vec<_>>()
                .join(", ")
        ),
        Expr::NewArray { dimensions, .. } => {
            let sizes: Vec<String> = dimensions
                .iter()
                .map_while(|dimension| dimension.as_ref())
                .map(|size| gen_expression(compiler, size))
                .collect();
            gen_array_allocation(&sizes)
        }
    }
}

/// Builds nested arrays from the outermost size inwards. Each outer slot
/// gets its own inner array; the innermost level is filled with `null`.
pub fn gen_array_allocation(sizes: &[String]) -> String {
    match sizes {
        [] => String::from("[]"),
        [size] => format!("Array({}).fill(null)", size),
        [size, inner @ ..] => format!(
            "Array.from({{ length: {} }}, () => {})",
            size,
            gen_array_allocation(inner)
        ),
    }
}

fn gen_literal(compiler: &Compiler, literal: &LiteralExpr) -> String {
    match literal.kind {
        TokenKind::NumberLiteral | TokenKind::DoubleLiteral | TokenKind::BooleanLiteral => {
            literal.value.clone()
        }
        TokenKind::FloatLiteral if compiler.options.float_suffix => format!("{}f", literal.value),
        TokenKind::FloatLiteral => literal.value.clone(),
        TokenKind::StringLiteral => format!("\"{}\"", escape(&literal.value, '"')),
        TokenKind::CharLiteral => format!("'{}'", escape(&literal.value, '\'')),
        kind => format!("/* unsupported literal: {} */", kind),
    }
}

/// Restores the escapes the lexer resolved, for a literal quoted with `quote`.
fn escape(value: &str, quote: char) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\t' => escaped.push_str("\\t"),
            '\r' => escaped.push_str("\\r"),
            c if c == quote => {
                escaped.push('\\');
                escaped.push(c);
            }
            c => escaped.push(c),
        }
    }
    escaped
}
