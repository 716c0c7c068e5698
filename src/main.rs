//! jsonnet-lex - dump the token stream of a Jsonnet source file.

use std::{
    fs,
    io::{self, Read, Write},
    path::{Path, PathBuf},
    process::ExitCode,
    time::Instant,
};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use jsonnet_lexer::{render_error, tokenize, Token, TokenKind};

/// Lex a Jsonnet source file and print its tokens
#[derive(Parser, Debug)]
#[command(name = "jsonnet-lex")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Lex a Jsonnet source file and print its tokens", long_about = None)]
struct Cli {
    /// Source file to lex, `-` reads standard input
    file: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Plain)]
    format: Format,

    /// Prefix each token with its line:column in plain output
    #[arg(long)]
    positions: bool,

    /// Enable verbose output
    #[arg(short, long, env = "JSONNET_LEX_VERBOSE")]
    verbose: bool,

    /// Disable color output
    #[arg(long, env = "JSONNET_LEX_NO_COLOR")]
    no_color: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Plain,
    Json,
}

#[derive(Serialize)]
struct TokenRecord<'a> {
    kind: TokenKind,
    lexeme: &'a str,
    line: u32,
    column: u32,
}

impl<'a> From<&'a Token> for TokenRecord<'a> {
    fn from(token: &'a Token) -> Self {
        TokenRecord {
            kind: token.kind,
            lexeme: &token.lexeme,
            line: token.span.start.line + 1,
            column: token.span.start.column + 1,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose, cli.no_color) {
        eprintln!("error: {:#}", e);
        return ExitCode::FAILURE;
    }

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr so stdout carries only the token stream.
fn init_logging(verbose: bool, no_color: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    let subscriber = fmt::layer()
        .with_writer(io::stderr)
        .with_ansi(!no_color)
        .with_target(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .try_init()
        .context("Failed to initialize logging")?;

    Ok(())
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let (source, file_name) = read_source(&cli.file)?;

    let start = Instant::now();
    let tokens = match tokenize(&source, Some(file_name)) {
        Ok(tokens) => tokens,
        Err(error) => {
            eprintln!("{}", render_error(&error, &source));
            return Ok(ExitCode::FAILURE);
        }
    };

    info!(tokens = tokens.len(), elapsed = ?start.elapsed(), "tokenized");

    let mut stdout = io::stdout().lock();
    write_tokens(&mut stdout, &tokens, cli.format, cli.positions)?;
    stdout.flush()?;

    Ok(ExitCode::SUCCESS)
}

fn read_source(path: &Path) -> Result<(String, String)> {
    if path == Path::new("-") {
        let mut source = String::new();
        io::stdin()
            .read_to_string(&mut source)
            .context("Failed to read standard input")?;
        return Ok((source, String::from("<stdin>")));
    }

    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    Ok((source, path.display().to_string()))
}

fn write_tokens(out: &mut impl Write, tokens: &[Token], format: Format, positions: bool) -> Result<()> {
    match format {
        Format::Plain => {
            for token in tokens {
                if positions {
                    let start = &token.span.start;
                    writeln!(out, "{}:{} {}", start.line + 1, start.column + 1, token)?;
                } else {
                    writeln!(out, "{}", token)?;
                }
            }
        }
        Format::Json => {
            let records: Vec<TokenRecord<'_>> = tokens.iter().map(TokenRecord::from).collect();
            serde_json::to_writer_pretty(&mut *out, &records)?;
            writeln!(out)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(source: &str, format: Format, positions: bool) -> String {
        let tokens = tokenize(source, None).unwrap();
        let mut out = Vec::new();
        write_tokens(&mut out, &tokens, format, positions).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_cli_parse_file() {
        let cli = Cli::parse_from(["jsonnet-lex", "config.jsonnet"]);
        assert_eq!(cli.file, PathBuf::from("config.jsonnet"));
        assert_eq!(cli.format, Format::Plain);
        assert!(!cli.positions);
    }

    #[test]
    fn test_cli_parse_json_format() {
        let cli = Cli::parse_from(["jsonnet-lex", "--format", "json", "-"]);
        assert_eq!(cli.format, Format::Json);
        assert_eq!(cli.file, PathBuf::from("-"));
    }

    #[test]
    fn test_cli_parse_flags() {
        let cli = Cli::parse_from(["jsonnet-lex", "-v", "--no-color", "--positions", "a.jsonnet"]);
        assert!(cli.verbose);
        assert!(cli.no_color);
        assert!(cli.positions);
    }

    #[test]
    fn test_cli_requires_file() {
        assert!(Cli::try_parse_from(["jsonnet-lex"]).is_err());
    }

    #[test]
    fn test_write_plain() {
        assert_eq!(
            render("local x = 'a';", Format::Plain, false),
            "LOCAL\nIDENT (x)\nASSIGN\nSTRING (a)\nSEMICOLON\nEOF\n"
        );
    }

    #[test]
    fn test_write_plain_with_positions() {
        assert_eq!(render("!\n  x", Format::Plain, true), "1:1 BANG\n2:3 IDENT (x)\n2:4 EOF\n");
    }

    #[test]
    fn test_write_json() {
        let output = render("self", Format::Json, false);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(
            value,
            serde_json::json!([
                { "kind": "SELF", "lexeme": "self", "line": 1, "column": 1 },
                { "kind": "EOF", "lexeme": "(EOF)", "line": 1, "column": 5 },
            ])
        );
    }
}
