use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, warn};

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

pub type RegexHandler = fn(&mut Lexer, &Regex);

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

fn pattern(source: &str, handler: RegexHandler) -> RegexPattern {
    RegexPattern {
        // Every pattern is a compile-time constant.
        regex: Regex::new(source).expect("lexer pattern must be a valid regex"),
        handler,
    }
}

lazy_static! {
    // Order matters: the first pattern matching at the cursor wins, so longer
    // operators come before their single-character prefixes.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        pattern(r"^\s+", skip_handler),
        pattern(r"^//[^\n]*", skip_handler),
        pattern(r"^/\*", block_comment_handler),
        pattern(r"^(?P<int>[0-9]+)(?P<frac>\.[0-9]*)?(?P<suffix>[fFdD])?", number_handler),
        pattern(r"^[\p{L}_][\p{L}\p{Nd}_]*", symbol_handler),
        pattern("^\"", string_handler),
        pattern("^'", char_handler),
        pattern(r"^\+\+", MK_DEFAULT_HANDLER!(TokenKind::PlusPlus, "++")),
        pattern(r"^\+=", MK_DEFAULT_HANDLER!(TokenKind::PlusEquals, "+=")),
        pattern(r"^--", MK_DEFAULT_HANDLER!(TokenKind::MinusMinus, "--")),
        pattern(r"^-=", MK_DEFAULT_HANDLER!(TokenKind::MinusEquals, "-=")),
        pattern(r"^==", MK_DEFAULT_HANDLER!(TokenKind::Equals, "==")),
        pattern(r"^!=", MK_DEFAULT_HANDLER!(TokenKind::NotEquals, "!=")),
        pattern(r"^&&", MK_DEFAULT_HANDLER!(TokenKind::And, "&&")),
        pattern(r"^\|\|", MK_DEFAULT_HANDLER!(TokenKind::Or, "||")),
        pattern(r"^\*=", MK_DEFAULT_HANDLER!(TokenKind::StarEquals, "*=")),
        pattern(r"^/=", MK_DEFAULT_HANDLER!(TokenKind::SlashEquals, "/=")),
        pattern(r"^<=", MK_DEFAULT_HANDLER!(TokenKind::LessEquals, "<=")),
        pattern(r"^>=", MK_DEFAULT_HANDLER!(TokenKind::GreaterEquals, ">=")),
        pattern(r"^\+", MK_DEFAULT_HANDLER!(TokenKind::Plus, "+")),
        pattern(r"^-", MK_DEFAULT_HANDLER!(TokenKind::Dash, "-")),
        pattern(r"^\*", MK_DEFAULT_HANDLER!(TokenKind::Star, "*")),
        pattern(r"^/", MK_DEFAULT_HANDLER!(TokenKind::Slash, "/")),
        pattern(r"^%", MK_DEFAULT_HANDLER!(TokenKind::Percent, "%")),
        pattern(r"^=", MK_DEFAULT_HANDLER!(TokenKind::Assignment, "=")),
        pattern(r"^!", MK_DEFAULT_HANDLER!(TokenKind::Not, "!")),
        pattern(r"^<", MK_DEFAULT_HANDLER!(TokenKind::Less, "<")),
        pattern(r"^>", MK_DEFAULT_HANDLER!(TokenKind::Greater, ">")),
        pattern(r"^&", MK_DEFAULT_HANDLER!(TokenKind::Ampersand, "&")),
        pattern(r"^\|", MK_DEFAULT_HANDLER!(TokenKind::Pipe, "|")),
        pattern(r"^\.", MK_DEFAULT_HANDLER!(TokenKind::Dot, ".")),
        pattern(r"^\(", MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(")),
        pattern(r"^\)", MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")")),
        pattern(r"^\{", MK_DEFAULT_HANDLER!(TokenKind::OpenCurly, "{")),
        pattern(r"^\}", MK_DEFAULT_HANDLER!(TokenKind::CloseCurly, "}")),
        pattern(r"^\[", MK_DEFAULT_HANDLER!(TokenKind::OpenBracket, "[")),
        pattern(r"^\]", MK_DEFAULT_HANDLER!(TokenKind::CloseBracket, "]")),
        pattern(r"^;", MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";")),
        pattern(r"^,", MK_DEFAULT_HANDLER!(TokenKind::Comma, ",")),
    ];
}

/// Single-use scanner over one compilation unit.
///
/// Malformed input never aborts scanning: problems are recorded as lexical
/// diagnostics, logged, and a best-effort token is still produced.
pub struct Lexer {
    tokens: Vec<Token>,
    diagnostics: Vec<Error>,
    source: String,
    pos: usize,
    line: u32,
    column: u32,
}

impl Lexer {
    pub fn new(source: impl Into<String>) -> Lexer {
        Lexer {
            tokens: vec![],
            diagnostics: vec![],
            source: source.into(),
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    /// Scans the whole source and returns the accumulated tokens, always
    /// terminated by a single `EOF` token.
    pub fn tokenize(&mut self) -> &[Token] {
        while !self.at_eof() {
            let mut matched = false;

            for pattern in PATTERNS.iter() {
                if pattern.regex.is_match(self.remainder()) {
                    (pattern.handler)(self, &pattern.regex);
                    matched = true;
                    break;
                }
            }

            if !matched {
                unknown_handler(self);
            }
        }

        let position = self.position();
        self.push(MK_TOKEN!(TokenKind::EOF, String::from("EOF"), position));

        debug!(
            tokens = self.tokens.len(),
            diagnostics = self.diagnostics.len(),
            "tokenized source"
        );
        &self.tokens
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Soft lexical errors reported while scanning.
    pub fn diagnostics(&self) -> &[Error] {
        &self.diagnostics
    }

    pub fn into_parts(self) -> (Vec<Token>, Vec<Error>) {
        (self.tokens, self.diagnostics)
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn report(&mut self, error: ErrorImpl, position: Position) {
        let error = Error::new(error, position);
        warn!(line = position.line, column = position.column, "{}", error);
        self.diagnostics.push(error);
    }

    /// Advances the cursor by `n` bytes, keeping line and column in step.
    pub fn advance_n(&mut self, n: usize) {
        let end = (self.pos + n).min(self.source.len());
        for ch in self.source[self.pos..end].chars() {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.pos = end;
    }

    pub fn advance_char(&mut self) {
        if let Some(ch) = self.at() {
            self.advance_n(ch.len_utf8());
        }
    }

    pub fn at(&self) -> Option<char> {
        self.remainder().chars().next()
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    pub fn position(&self) -> Position {
        Position {
            line: self.line,
            column: self.column,
        }
    }
}

fn skip_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = regex.find(lexer.remainder()).map_or(0, |m| m.end());
    lexer.advance_n(matched);
}

fn block_comment_handler(lexer: &mut Lexer, _regex: &Regex) {
    let start = lexer.position();
    lexer.advance_n(2);

    match lexer.remainder().find("*/") {
        Some(end) => lexer.advance_n(end + 2),
        None => {
            lexer.report(ErrorImpl::UnterminatedComment, start);
            let rest = lexer.remainder().len();
            lexer.advance_n(rest);
        }
    }
}

fn number_handler(lexer: &mut Lexer, regex: &Regex) {
    let Some(captures) = regex.captures(lexer.remainder()) else {
        return;
    };
    let int_part = captures.name("int").map_or("", |m| m.as_str()).to_string();
    let fraction = captures.name("frac").map(|m| m.as_str().to_string());
    let suffix = captures.name("suffix").map(|m| m.as_str().to_string());
    let position = lexer.position();

    if fraction.as_deref() == Some(".") {
        // The fraction is dropped and the `.` is left for the next token.
        lexer.report(
            ErrorImpl::InvalidFloat {
                literal: int_part.clone(),
            },
            position,
        );
        let len = int_part.len();
        lexer.push(MK_TOKEN!(TokenKind::NumberLiteral, int_part, position));
        lexer.advance_n(len);
        return;
    }

    let kind = match suffix.as_deref() {
        Some("f") | Some("F") => TokenKind::FloatLiteral,
        Some(_) => TokenKind::DoubleLiteral,
        None if fraction.is_some() => TokenKind::DoubleLiteral,
        None => TokenKind::NumberLiteral,
    };

    let value = format!("{}{}", int_part, fraction.unwrap_or_default());
    let len = value.len() + suffix.map_or(0, |s| s.len());
    lexer.push(MK_TOKEN!(kind, value, position));
    lexer.advance_n(len);
}

fn symbol_handler(lexer: &mut Lexer, regex: &Regex) {
    let Some(value) = regex.find(lexer.remainder()).map(|m| m.as_str().to_string()) else {
        return;
    };
    let position = lexer.position();

    let kind = RESERVED_LOOKUP
        .get(value.as_str())
        .copied()
        .unwrap_or(TokenKind::Identifier);

    let len = value.len();
    lexer.push(MK_TOKEN!(kind, value, position));
    lexer.advance_n(len);
}

/// Resolves the character after a backslash. `'` is only an escape inside
/// character literals.
fn unescape(escape: char, quote: char) -> Option<char> {
    match escape {
        'n' => Some('\n'),
        't' => Some('\t'),
        'r' => Some('\r'),
        '"' => Some('"'),
        '\\' => Some('\\'),
        '\'' if quote == '\'' => Some('\''),
        _ => None,
    }
}

/// Consumes the escape at the cursor (just after the backslash), pushing the
/// resolved character into `value` or reporting an invalid escape.
fn scan_escape(lexer: &mut Lexer, value: &mut String, quote: char, position: Position) {
    let Some(escape) = lexer.at() else {
        return;
    };
    lexer.advance_char();

    match unescape(escape, quote) {
        Some(ch) => value.push(ch),
        None => lexer.report(ErrorImpl::InvalidEscape { escape }, position),
    }
}

fn string_handler(lexer: &mut Lexer, _regex: &Regex) {
    let start = lexer.position();
    lexer.advance_n(1);

    let mut value = String::new();
    let mut terminated = false;

    while let Some(ch) = lexer.at() {
        match ch {
            '"' => {
                lexer.advance_n(1);
                terminated = true;
                break;
            }
            '\\' => {
                let escape_position = lexer.position();
                lexer.advance_n(1);
                scan_escape(lexer, &mut value, '"', escape_position);
            }
            _ => {
                value.push(ch);
                lexer.advance_char();
            }
        }
    }

    if !terminated {
        lexer.report(ErrorImpl::UnterminatedString, start);
    }

    lexer.push(MK_TOKEN!(TokenKind::StringLiteral, value, start));
}

fn char_handler(lexer: &mut Lexer, _regex: &Regex) {
    let start = lexer.position();
    lexer.advance_n(1);

    let mut value = String::new();
    let mut terminated = false;

    while let Some(ch) = lexer.at() {
        match ch {
            '\'' => {
                lexer.advance_n(1);
                terminated = true;
                break;
            }
            '\n' => break,
            '\\' => {
                let escape_position = lexer.position();
                lexer.advance_n(1);
                scan_escape(lexer, &mut value, '\'', escape_position);
            }
            _ => {
                value.push(ch);
                lexer.advance_char();
            }
        }
    }

    if !terminated {
        lexer.report(ErrorImpl::UnterminatedChar, start);
    } else if value.chars().count() != 1 {
        lexer.report(
            ErrorImpl::CharLiteralLength {
                literal: value.clone(),
            },
            start,
        );
    }

    lexer.push(MK_TOKEN!(TokenKind::CharLiteral, value, start));
}

fn unknown_handler(lexer: &mut Lexer) {
    let Some(ch) = lexer.at() else {
        return;
    };
    let position = lexer.position();

    lexer.report(
        ErrorImpl::UnrecognisedToken {
            token: ch.to_string(),
        },
        position,
    );
    lexer.push(MK_TOKEN!(TokenKind::Unknown, ch.to_string(), position));
    lexer.advance_char();
}

/// Tokenizes a whole compilation unit. Lexical diagnostics are logged and
/// otherwise discarded; use [`Lexer`] directly to inspect them.
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(source);
    lexer.tokenize();
    lexer.into_parts().0
}
