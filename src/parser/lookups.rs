use std::collections::HashMap;

use crate::{ast::statements::Stmt, errors::errors::Error, lexer::tokens::TokenKind};

use super::{parser::Parser, stmt::*};

pub type StmtHandler = fn(&mut Parser) -> Result<Stmt, Error>;
pub type StmtLookup = HashMap<TokenKind, StmtHandler>;

pub fn create_token_lookups(parser: &mut Parser) {
    // Control flow
    parser.stmt(TokenKind::If, parse_if_stmt);
    parser.stmt(TokenKind::While, parse_while_stmt);
    parser.stmt(TokenKind::OpenCurly, parse_block_stmt);

    // Output
    parser.stmt(TokenKind::Print, parse_print_stmt);
    parser.stmt(TokenKind::Println, parse_print_stmt);

    // Declarations
    parser.stmt(TokenKind::Var, parse_var_decl_stmt);
    parser.stmt(TokenKind::Int, parse_var_decl_stmt);
    parser.stmt(TokenKind::Float, parse_var_decl_stmt);
    parser.stmt(TokenKind::Double, parse_var_decl_stmt);
    parser.stmt(TokenKind::Boolean, parse_var_decl_stmt);
    parser.stmt(TokenKind::Char, parse_var_decl_stmt);
}
