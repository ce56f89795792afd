//! Lox scanner driver
//!
//! Usage: lox [OPTIONS] tokenize <path>

use anyhow::Context;
use clap::{Parser as ClapParser, Subcommand, ValueEnum};
use lox::driver::{Action, EXIT_USAGE, Outcome, Pipeline, PipelineConfig};
use lox::DiagnosticStyle;
use std::path::PathBuf;
use std::process;

/// Diagnostic rendering
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Default)]
enum Diagnostics {
    /// One `[line N] Error: ...` line per error
    #[default]
    Plain,
    /// Annotated source excerpts
    Rich,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the token listing of a source file
    Tokenize {
        /// Lox source file
        path: PathBuf,
    },
}

#[derive(ClapParser, Debug)]
#[command(name = "lox")]
#[command(author = "Lox Toolchain Team")]
#[command(version)]
#[command(about = "Lexical scanner for the Lox scripting language", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Diagnostic style (plain or rich)
    #[arg(long, value_enum, global = true, default_value = "plain")]
    diagnostics: Diagnostics,

    /// Verbose output on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        // --help and --version
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let _ = e.print();
            process::exit(EXIT_USAGE);
        }
    };

    init_tracing(args.verbose);

    match run(&args) {
        Ok(outcome) => process::exit(outcome.exit_code()),
        Err(e) => {
            eprintln!("error: {e:#}");
            process::exit(EXIT_USAGE);
        }
    }
}

/// Install a stderr subscriber when `--verbose` or `RUST_LOG` asks for one
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("lox=debug")
    } else if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        return;
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .with(filter)
        .init();
}

fn run(args: &Args) -> anyhow::Result<Outcome> {
    let config = PipelineConfig {
        diagnostics: match args.diagnostics {
            Diagnostics::Plain => DiagnosticStyle::Plain,
            Diagnostics::Rich => DiagnosticStyle::Rich,
        },
        verbose: args.verbose,
    };
    let pipeline = Pipeline::new(config);

    let (action, path) = match &args.command {
        Command::Tokenize { path } => (Action::Tokenize, path),
    };

    pipeline
        .run(action, path)
        .with_context(|| format!("cannot {} {}", action.name(), path.display()))
}
