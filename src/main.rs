use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
    process::ExitCode,
};

use clap::{Parser, ValueEnum};
use tracing::{error, info, Level};
use transpiler::{
    compiler::compiler::CompilerOptions,
    errors::errors::Error,
    lexer::lexer::{tokenize, Lexer},
    parser::parser::parse,
    render_error, transpile,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Emit {
    /// The token stream, one token per line
    Tokens,
    /// The parsed statement tree
    Ast,
    /// Generated JavaScript
    Js,
}

/// Transpiles a small statically-typed C-like language to JavaScript.
#[derive(Debug, Parser)]
#[command(name = "jtranspile", version, about)]
struct Cli {
    /// Source file to read, or `-` for stdin
    input: PathBuf,

    /// Write output here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// What to print
    #[arg(long, value_enum, default_value_t = Emit::Js)]
    emit: Emit,

    /// Emit float literals without their `f` suffix
    #[arg(long)]
    no_float_suffix: bool,

    /// Spaces per block level in generated code
    #[arg(long, default_value_t = 2)]
    indent: usize,

    /// Log more (repeat for debug and trace output)
    #[arg(short, long, action = clap::ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn log_level(&self) -> Level {
        if self.quiet {
            return Level::ERROR;
        }
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }

    fn file_name(&self) -> String {
        if self.is_stdin() {
            String::from("<stdin>")
        } else {
            self.input.to_string_lossy().into_owned()
        }
    }

    fn is_stdin(&self) -> bool {
        self.input.as_os_str() == "-"
    }

    fn read_source(&self) -> io::Result<String> {
        if self.is_stdin() {
            let mut source = String::new();
            io::stdin().read_to_string(&mut source)?;
            Ok(source)
        } else {
            fs::read_to_string(&self.input)
        }
    }
}

fn emit_tokens(source: &str) -> String {
    let mut lexer = Lexer::new(source);
    lexer
        .tokenize()
        .iter()
        .map(|token| format!("{}\t{}\n", token.position, token))
        .collect()
}

fn emit_ast(source: &str) -> Result<String, Error> {
    let statements = parse(tokenize(source))?;
    Ok(format!("{:#?}\n", statements))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_target(false)
        .with_max_level(cli.log_level())
        .init();

    let file_name = cli.file_name();
    let source = match cli.read_source() {
        Ok(source) => source,
        Err(err) => {
            error!(file = %file_name, "failed to read input: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let options = CompilerOptions {
        float_suffix: !cli.no_float_suffix,
        indent: cli.indent,
    };

    let result = match cli.emit {
        Emit::Tokens => Ok(emit_tokens(&source)),
        Emit::Ast => emit_ast(&source),
        Emit::Js => transpile(&source, &options).map(|transpiled| {
            if !transpiled.diagnostics.is_empty() {
                info!(
                    count = transpiled.diagnostics.len(),
                    "generated output despite lexical errors"
                );
            }
            transpiled.output
        }),
    };

    let output = match result {
        Ok(output) => output,
        Err(err) => {
            eprint!("{}", render_error(&err, &source, &file_name));
            return ExitCode::FAILURE;
        }
    };

    let written = match &cli.output {
        Some(path) => fs::write(path, output),
        None => {
            print!("{}", output);
            Ok(())
        }
    };

    if let Err(err) = written {
        error!("failed to write output: {}", err);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
