//! Parser implementation for building statement trees.
//!
//! This module contains the main Parser struct and the `parse` entry point.
//! Statements are dispatched through a lookup table keyed by their leading
//! token; expressions are parsed by the precedence ladder in `expr.rs`.

use std::collections::HashMap;

use tracing::debug;

use crate::{
    ast::statements::Stmt,
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Position,
};

use super::{
    array::ArrayDimension,
    lookups::{create_token_lookups, StmtHandler, StmtLookup},
    stmt::parse_stmt,
};

/// The main parser structure that maintains parsing state.
///
/// Besides the token cursor it remembers the fixed sizes of arrays declared
/// with `new T[<size>]`, so later array literal assignments to the same
/// name can be checked against them. Shapes live in block-scoped frames, so
/// a shadowing declaration never outlives its block.
pub struct Parser {
    /// The list of tokens to parse, always ending in `EOF`
    tokens: Vec<Token>,
    /// Current position in the token stream
    pos: usize,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Known shapes of variables, one frame per open scope. `None` marks a
    /// scalar that shadows any outer array of the same name.
    array_shapes: Vec<HashMap<String, Option<Vec<ArrayDimension>>>>,
}

impl Parser {
    /// Creates a new Parser instance.
    ///
    /// A missing trailing `EOF` token is supplied so the cursor can never run
    /// off the end of the stream.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map(|token| token.kind) != Some(TokenKind::EOF) {
            let position = tokens
                .last()
                .map(|token| token.position)
                .unwrap_or_default();
            tokens.push(Token::new(TokenKind::EOF, "EOF", position));
        }

        Parser {
            tokens,
            pos: 0,
            stmt_lookup: HashMap::new(),
            array_shapes: vec![HashMap::new()],
        }
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.tokens[self.pos]
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.tokens[self.pos].kind
    }

    /// Returns the kind of the token `offset` places ahead, or `EOF` past the end.
    pub fn peek_kind(&self, offset: usize) -> TokenKind {
        self.tokens
            .get(self.pos + offset)
            .map_or(TokenKind::EOF, |token| token.kind)
    }

    /// Advances to the next token and returns the previous token. The cursor
    /// stays put on `EOF`.
    pub fn advance(&mut self) -> Token {
        let token = self.tokens[self.pos].clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    /// Expects a token of the specified kind, with optional custom error.
    pub fn expect_error(
        &mut self,
        expected_kind: TokenKind,
        expected: &str,
        error: Option<Error>,
    ) -> Result<Token, Error> {
        if self.current_token_kind() != expected_kind {
            match error {
                Some(error) => Err(error),
                None => Err(self.unexpected(expected)),
            }
        } else {
            Ok(self.advance())
        }
    }

    /// Expects a token of the specified kind, describing the construct that
    /// was expected in the error if it is missing.
    pub fn expect(&mut self, expected_kind: TokenKind, expected: &str) -> Result<Token, Error> {
        self.expect_error(expected_kind, expected, None)
    }

    /// Builds the error for finding the current token where `expected` was
    /// required.
    pub fn unexpected(&self, expected: &str) -> Error {
        let token = self.current_token();
        let error = if token.kind == TokenKind::EOF {
            ErrorImpl::UnexpectedEof {
                expected: expected.to_string(),
            }
        } else {
            ErrorImpl::UnexpectedToken {
                expected: expected.to_string(),
                found: token.value.clone(),
            }
        };
        Error::new(error, token.position)
    }

    /// Checks if there are more tokens to parse.
    pub fn has_tokens(&self) -> bool {
        self.current_token_kind() != TokenKind::EOF
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    pub fn push_shape_scope(&mut self) {
        self.array_shapes.push(HashMap::new());
    }

    /// The outermost frame is never popped.
    pub fn pop_shape_scope(&mut self) {
        if self.array_shapes.len() > 1 {
            self.array_shapes.pop();
        }
    }

    /// Records the shape of a name declared in the innermost scope.
    pub fn declare_shape(&mut self, name: &str, shape: Option<Vec<ArrayDimension>>) {
        if let Some(frame) = self.array_shapes.last_mut() {
            frame.insert(name.to_string(), shape);
        }
    }

    /// Replaces the shape of the visible array called `name`, if any.
    pub fn update_array_shape(&mut self, name: &str, shape: Vec<ArrayDimension>) {
        let owner = self
            .array_shapes
            .iter_mut()
            .rev()
            .find_map(|frame| frame.get_mut(name));
        if let Some(Some(known)) = owner {
            *known = shape;
        }
    }

    /// Innermost-first lookup. A scalar declaration hides outer arrays.
    pub fn array_shape(&self, name: &str) -> Option<&Vec<ArrayDimension>> {
        self.array_shapes
            .iter()
            .rev()
            .find_map(|frame| frame.get(name))
            .and_then(Option::as_ref)
    }

    /// Returns the position of the current token.
    pub fn get_position(&self) -> Position {
        self.current_token().position
    }
}

/// Parses a stream of tokens into a sequence of statements.
///
/// This is the main entry point for parsing. It creates a parser instance,
/// initializes the statement lookup table, and parses statements until EOF,
/// stopping at the first error.
pub fn parse(tokens: Vec<Token>) -> Result<Vec<Stmt>, Error> {
    let mut parser = Parser::new(tokens);
    create_token_lookups(&mut parser);

    let mut body = vec![];

    while parser.has_tokens() {
        body.push(parse_stmt(&mut parser)?);
    }

    debug!(statements = body.len(), "parsed token stream");
    Ok(body)
}
