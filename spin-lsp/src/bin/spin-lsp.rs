use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use spin_analysis::document_symbols::{collect_document_symbols, SpinDocumentSymbol};
use spin_analysis::semantic_tokens::collect_semantic_tokens;
use spin_analysis::utils::source_lines;
use spin_analysis::{Analysis, Analyzer, Dialect};
use spin_lsp::SpinLanguageServer;
use tokio::io::{stdin, stdout};
use tower_lsp::{LspService, Server};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Language server for Parallax Spin and Spin2.
///
/// Without a subcommand the server speaks LSP over stdin/stdout.
#[derive(Parser, Debug)]
#[command(name = "spin-lsp", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every classified token of a file
    Tokens(FileArgs),
    /// Print the section outline of a file
    Symbols(FileArgs),
}

#[derive(Args, Debug)]
struct FileArgs {
    /// Spin or Spin2 source file
    path: PathBuf,

    /// Dialect to analyze with (default: from the file extension)
    #[arg(long, value_enum)]
    dialect: Option<DialectArg>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DialectArg {
    Spin1,
    Spin2,
}

impl From<DialectArg> for Dialect {
    fn from(value: DialectArg) -> Self {
        match value {
            DialectArg::Spin1 => Dialect::Spin1,
            DialectArg::Spin2 => Dialect::Spin2,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // stdout carries JSON-RPC; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        serve().await;
        return ExitCode::SUCCESS;
    };
    match run_offline(command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

async fn serve() {
    info!(version = env!("CARGO_PKG_VERSION"), "starting spin-lsp on stdio");
    let (service, socket) = LspService::new(SpinLanguageServer::new);
    Server::new(stdin(), stdout(), socket).serve(service).await;
}

fn run_offline(command: Command) -> Result<()> {
    let mut out = io::stdout().lock();
    match command {
        Command::Tokens(args) => {
            let (text, analysis) = load(&args)?;
            print_tokens(&mut out, &text, &analysis)?;
        }
        Command::Symbols(args) => {
            let (text, analysis) = load(&args)?;
            for symbol in collect_document_symbols(&analysis, &text) {
                print_symbol(&mut out, &symbol, 0)?;
            }
        }
    }
    out.flush().context("failed to flush output")
}

fn load(args: &FileArgs) -> Result<(String, Analysis)> {
    let text = fs::read_to_string(&args.path)
        .with_context(|| format!("failed to read {}", args.path.display()))?;
    let dialect = dialect_for(&args.path, args.dialect);
    info!(path = %args.path.display(), %dialect, "analyzing file");
    let analysis = Analyzer::new(dialect).analyze(&text);
    Ok((text, analysis))
}

fn dialect_for(path: &Path, requested: Option<DialectArg>) -> Dialect {
    requested
        .map(Dialect::from)
        .or_else(|| Dialect::from_path(path))
        .unwrap_or_default()
}

/// `line:column  text  kind  modifiers`, one-based positions.
fn print_tokens(out: &mut impl Write, text: &str, analysis: &Analysis) -> Result<()> {
    let lines: Vec<&str> = source_lines(text).collect();
    for token in collect_semantic_tokens(analysis) {
        let start = token.range.start;
        let spelled = lines
            .get(start.line)
            .and_then(|line| line.get(start.column..token.range.end.column))
            .unwrap_or_default();
        let modifiers: Vec<&str> = token.modifiers.iter().map(|modifier| modifier.as_str()).collect();
        writeln!(
            out,
            "{}:{}\t{}\t{}\t{}",
            start.line + 1,
            start.column + 1,
            spelled,
            token.kind.as_str(),
            modifiers.join(",")
        )?;
    }
    Ok(())
}

fn print_symbol(out: &mut impl Write, symbol: &SpinDocumentSymbol, depth: usize) -> Result<()> {
    let indent = "  ".repeat(depth);
    match &symbol.detail {
        Some(detail) => writeln!(
            out,
            "{}\t{indent}{}\t{detail}",
            symbol.selection_range.start.line + 1,
            symbol.name
        )?,
        None => writeln!(out, "{}\t{indent}{}", symbol.selection_range.start.line + 1, symbol.name)?,
    }
    for child in &symbol.children {
        print_symbol(out, child, depth + 1)?;
    }
    Ok(())
}
