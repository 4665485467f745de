//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Keywords, type names and identifiers
//! - Numeric literals and their suffixes
//! - String and character literals with escape sequences
//! - Operators and punctuation
//! - Comments
//! - Soft lexical diagnostics

use crate::Position;

use super::{
    lexer::{tokenize, Lexer},
    tokens::TokenKind,
};

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source).iter().map(|token| token.kind).collect()
}

/// Tokenizes `source` and returns the names of the reported diagnostics.
fn diagnostic_names(source: &str) -> Vec<String> {
    let mut lexer = Lexer::new(source);
    lexer.tokenize();
    lexer
        .diagnostics()
        .iter()
        .map(|error| error.get_error_name().to_string())
        .collect()
}

#[test]
fn test_tokenize_variable_declaration() {
    let tokens = tokenize("int x = 7;");

    assert_eq!(
        tokens.iter().map(|token| token.kind).collect::<Vec<_>>(),
        vec![
            TokenKind::Int,
            TokenKind::Identifier,
            TokenKind::Assignment,
            TokenKind::NumberLiteral,
            TokenKind::Semicolon,
            TokenKind::EOF,
        ]
    );
    assert_eq!(tokens[1].value, "x");
    assert_eq!(tokens[3].value, "7");
}

#[test]
fn test_tokenize_keywords() {
    assert_eq!(
        kinds("if else while for return print println var new int float double boolean char void"),
        vec![
            TokenKind::If,
            TokenKind::Else,
            TokenKind::While,
            TokenKind::For,
            TokenKind::Return,
            TokenKind::Print,
            TokenKind::Println,
            TokenKind::Var,
            TokenKind::New,
            TokenKind::Int,
            TokenKind::Float,
            TokenKind::Double,
            TokenKind::Boolean,
            TokenKind::Char,
            TokenKind::Void,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_boolean_literals() {
    let tokens = tokenize("true false");

    assert_eq!(tokens[0].kind, TokenKind::BooleanLiteral);
    assert_eq!(tokens[0].value, "true");
    assert_eq!(tokens[1].kind, TokenKind::BooleanLiteral);
    assert_eq!(tokens[1].value, "false");
}

#[test]
fn test_tokenize_identifiers() {
    let tokens = tokenize("foo bar baz_123 _underscore CamelCase iffy");

    for (token, expected) in tokens
        .iter()
        .zip(["foo", "bar", "baz_123", "_underscore", "CamelCase", "iffy"])
    {
        assert_eq!(token.kind, TokenKind::Identifier);
        assert_eq!(token.value, expected);
    }
    assert_eq!(tokens[6].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_numbers() {
    let tokens = tokenize("42 3.14 2.5f 7F 1d 0.5D");

    assert_eq!(tokens[0].kind, TokenKind::NumberLiteral);
    assert_eq!(tokens[0].value, "42");
    assert_eq!(tokens[1].kind, TokenKind::DoubleLiteral);
    assert_eq!(tokens[1].value, "3.14");
    assert_eq!(tokens[2].kind, TokenKind::FloatLiteral);
    assert_eq!(tokens[2].value, "2.5");
    assert_eq!(tokens[3].kind, TokenKind::FloatLiteral);
    assert_eq!(tokens[3].value, "7");
    assert_eq!(tokens[4].kind, TokenKind::DoubleLiteral);
    assert_eq!(tokens[4].value, "1");
    assert_eq!(tokens[5].kind, TokenKind::DoubleLiteral);
    assert_eq!(tokens[5].value, "0.5");
    assert_eq!(tokens[6].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_invalid_float() {
    let mut lexer = Lexer::new("1.;");
    lexer.tokenize();

    let tokens = lexer.tokens();
    assert_eq!(tokens[0].kind, TokenKind::NumberLiteral);
    assert_eq!(tokens[0].value, "1");
    assert_eq!(tokens[1].kind, TokenKind::Dot);
    assert_eq!(tokens[2].kind, TokenKind::Semicolon);

    assert_eq!(lexer.diagnostics().len(), 1);
    assert_eq!(lexer.diagnostics()[0].get_error_name(), "InvalidFloat");
}

#[test]
fn test_tokenize_strings() {
    let tokens = tokenize(r#""hello" "with \"quotes\"" "line\nbreak\t\\""#);

    assert_eq!(tokens[0].kind, TokenKind::StringLiteral);
    assert_eq!(tokens[0].value, "hello");
    assert_eq!(tokens[1].value, "with \"quotes\"");
    assert_eq!(tokens[2].value, "line\nbreak\t\\");
    assert_eq!(tokens[3].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_invalid_escape_continues() {
    let mut lexer = Lexer::new(r#""a\qb";"#);
    lexer.tokenize();

    assert_eq!(lexer.tokens()[0].kind, TokenKind::StringLiteral);
    assert_eq!(lexer.tokens()[0].value, "ab");
    assert_eq!(lexer.tokens()[1].kind, TokenKind::Semicolon);
    assert_eq!(diagnostic_names(r#""a\qb";"#), vec!["InvalidEscape"]);
}

#[test]
fn test_tokenize_unterminated_string() {
    let mut lexer = Lexer::new("\"never closed");
    lexer.tokenize();

    assert_eq!(lexer.tokens()[0].kind, TokenKind::StringLiteral);
    assert_eq!(lexer.tokens()[0].value, "never closed");
    assert_eq!(lexer.tokens()[1].kind, TokenKind::EOF);
    assert_eq!(lexer.diagnostics()[0].get_error_name(), "UnterminatedString");
}

#[test]
fn test_tokenize_chars() {
    let tokens = tokenize(r"'a' '\n' '\''");

    assert_eq!(tokens[0].kind, TokenKind::CharLiteral);
    assert_eq!(tokens[0].value, "a");
    assert_eq!(tokens[1].value, "\n");
    assert_eq!(tokens[2].value, "'");
}

#[test]
fn test_tokenize_char_errors() {
    assert_eq!(diagnostic_names("'ab'"), vec!["CharLiteralLength"]);
    assert_eq!(diagnostic_names("''"), vec!["CharLiteralLength"]);
    assert_eq!(diagnostic_names("'a"), vec!["UnterminatedChar"]);

    let tokens = tokenize("'ab'");
    assert_eq!(tokens[0].kind, TokenKind::CharLiteral);
    assert_eq!(tokens[0].value, "ab");
}

#[test]
fn test_tokenize_operators() {
    assert_eq!(
        kinds("+= ++ -= -- == != && || *= /= <= >= + - * / = ! < >"),
        vec![
            TokenKind::PlusEquals,
            TokenKind::PlusPlus,
            TokenKind::MinusEquals,
            TokenKind::MinusMinus,
            TokenKind::Equals,
            TokenKind::NotEquals,
            TokenKind::And,
            TokenKind::Or,
            TokenKind::StarEquals,
            TokenKind::SlashEquals,
            TokenKind::LessEquals,
            TokenKind::GreaterEquals,
            TokenKind::Plus,
            TokenKind::Dash,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Assignment,
            TokenKind::Not,
            TokenKind::Less,
            TokenKind::Greater,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_operators_without_spaces() {
    assert_eq!(
        kinds("x+++y"),
        vec![
            TokenKind::Identifier,
            TokenKind::PlusPlus,
            TokenKind::Plus,
            TokenKind::Identifier,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_punctuation() {
    assert_eq!(
        kinds("( ) { } [ ] ; ,"),
        vec![
            TokenKind::OpenParen,
            TokenKind::CloseParen,
            TokenKind::OpenCurly,
            TokenKind::CloseCurly,
            TokenKind::OpenBracket,
            TokenKind::CloseBracket,
            TokenKind::Semicolon,
            TokenKind::Comma,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_comments() {
    let source = "int a = 1; // trailing comment\n/* block\ncomment */ int b = 2;";

    assert_eq!(
        kinds(source),
        vec![
            TokenKind::Int,
            TokenKind::Identifier,
            TokenKind::Assignment,
            TokenKind::NumberLiteral,
            TokenKind::Semicolon,
            TokenKind::Int,
            TokenKind::Identifier,
            TokenKind::Assignment,
            TokenKind::NumberLiteral,
            TokenKind::Semicolon,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_unterminated_comment() {
    assert_eq!(kinds("int /* no end"), vec![TokenKind::Int, TokenKind::EOF]);
    assert_eq!(diagnostic_names("int /* no end"), vec!["UnterminatedComment"]);
}

#[test]
fn test_tokenize_unknown_character() {
    let mut lexer = Lexer::new("a # b");
    lexer.tokenize();

    let tokens = lexer.tokens();
    assert_eq!(tokens[1].kind, TokenKind::Unknown);
    assert_eq!(tokens[1].value, "#");
    assert_eq!(tokens[2].kind, TokenKind::Identifier);
    assert_eq!(lexer.diagnostics()[0].get_error_name(), "UnrecognisedToken");
}

#[test]
fn test_token_positions() {
    let tokens = tokenize("int x;\n  print(x);");

    assert_eq!(tokens[0].position, Position { line: 1, column: 1 });
    assert_eq!(tokens[1].position, Position { line: 1, column: 5 });
    assert_eq!(tokens[3].kind, TokenKind::Print);
    assert_eq!(tokens[3].position, Position { line: 2, column: 3 });
    assert_eq!(tokens[5].position, Position { line: 2, column: 9 });
}

#[test]
fn test_diagnostic_position() {
    let mut lexer = Lexer::new("int a;\nchar c = 'xy';");
    lexer.tokenize();

    assert_eq!(
        lexer.diagnostics()[0].get_position(),
        Some(&Position { line: 2, column: 10 })
    );
}

#[test]
fn test_empty_source() {
    assert_eq!(kinds(""), vec![TokenKind::EOF]);
    assert_eq!(kinds("   \n\t "), vec![TokenKind::EOF]);
}
