#![allow(clippy::module_inception)]

use tracing::debug;

use crate::{
    compiler::compiler::{generate_with, CompilerOptions},
    errors::errors::{Error, ErrorTip},
    lexer::lexer::Lexer,
    parser::parser::parse,
    type_checker::type_checker::analyze,
};

pub mod ast;
pub mod compiler;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod type_checker;

extern crate regex;

/// A 1-based line and column in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Default for Position {
    fn default() -> Self {
        Position { line: 1, column: 1 }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Output of a successful [`transpile`] run.
#[derive(Debug, Clone)]
pub struct Transpiled {
    /// The generated JavaScript.
    pub output: String,
    /// Soft lexical problems that did not stop the pipeline.
    pub diagnostics: Vec<Error>,
}

/// Runs the lexer, parser, type checker and code generator over one
/// compilation unit.
///
/// Soft lexical diagnostics are returned alongside the output; the first
/// parse or type error aborts the run and no output is produced.
pub fn transpile(source: &str, options: &CompilerOptions) -> Result<Transpiled, Error> {
    let mut lexer = Lexer::new(source);
    lexer.tokenize();
    let (tokens, diagnostics) = lexer.into_parts();

    let statements = parse(tokens)?;
    analyze(&statements)?;
    let output = generate_with(&statements, options);

    debug!(
        bytes = output.len(),
        diagnostics = diagnostics.len(),
        "transpiled compilation unit"
    );

    Ok(Transpiled {
        output,
        diagnostics,
    })
}

/// Returns the text of the 1-based `line` in `source`, without its line
/// terminator.
pub fn get_line(source: &str, line: u32) -> Option<&str> {
    source
        .lines()
        .nth((line as usize).checked_sub(1)?)
}

/// Renders an error for humans.
///
/// ```text
/// type error: types do not match: expected int, received double
///  -> input.jl:3:9
///   |
/// 3 | int x = 3.14;
///   | --------^
/// ```
pub fn render_error(error: &Error, source: &str, file_name: &str) -> String {
    let mut rendered = match error.get_tip() {
        ErrorTip::None => format!("{}: {}\n", error.phase(), error),
        tip => format!("{}: {} ({})\n", error.phase(), error, tip),
    };

    let Some(position) = error.get_position() else {
        rendered.push_str(&format!(" -> {}\n", file_name));
        return rendered;
    };

    rendered.push_str(&format!(" -> {}:{}\n", file_name, position));

    let Some(line_text) = get_line(source, position.line) else {
        return rendered;
    };

    let line_string = position.line.to_string();
    let padding = line_string.len() + 2;

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(line_text);
    let arrows = (position.column as usize)
        .saturating_sub(removed_whitespace)
        .max(1);

    rendered.push_str(&format!("{:>padding$}\n", "|"));
    rendered.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));
    rendered.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));

    rendered
}

fn remove_starting_whitespace(string: &str) -> (&str, usize) {
    let trimmed = string.trim_start_matches([' ', '\t']);
    (trimmed, string.len() - trimmed.len())
}

#[cfg(test)]
mod tests {
    use crate::{
        errors::errors::{Error, ErrorImpl},
        Position,
    };

    #[test]
    fn test_get_line() {
        let source = "Hello, world!\nsecond\n\nTesting { }\n";
        assert_eq!(super::get_line(source, 1), Some("Hello, world!"));
        assert_eq!(super::get_line(source, 4), Some("Testing { }"));
        assert_eq!(super::get_line(source, 0), None);
        assert_eq!(super::get_line(source, 9), None);
    }

    #[test]
    fn test_render_error_points_at_column() {
        let source = "int a = 1;\n    int b = #;\n";
        let error = Error::new(
            ErrorImpl::UnexpectedToken {
                expected: String::from("expression"),
                found: String::from("#"),
            },
            Position { line: 2, column: 13 },
        );

        let rendered = super::render_error(&error, source, "input.jl");
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[1], " -> input.jl:2:13");
        assert_eq!(lines[3], "2 | int b = #;");
        assert_eq!(lines[4], "  | --------^");
    }

    #[test]
    fn test_render_error_without_position() {
        let error = Error::unpositioned(ErrorImpl::VariableNotDeclared {
            variable: String::from("x"),
        });

        let rendered = super::render_error(&error, "print(x);", "input.jl");
        assert!(rendered.contains("x"));
        assert!(rendered.ends_with(" -> input.jl\n"));
    }
}
