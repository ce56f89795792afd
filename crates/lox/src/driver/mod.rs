//! Driver: reads a source file and runs the requested action over it

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use codespan_reporting::term::termcolor::WriteColor;
use tracing::{debug, info};

use crate::common::{CompileError, CompileResult, DiagnosticReporter, DiagnosticStyle};
use crate::emit::StreamEmitter;
use crate::lexer::Scanner;

/// Exit status when every character was scanned cleanly
pub const EXIT_SUCCESS: i32 = 0;
/// Exit status for usage errors: bad arguments, unknown action, unreadable file
pub const EXIT_USAGE: i32 = 1;
/// Exit status when the input contained lexical errors
pub const EXIT_DATA_ERROR: i32 = 65;

/// Actions the driver can run over a source file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Print the token listing
    Tokenize,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Tokenize => "tokenize",
        }
    }
}

/// Configuration options for the pipeline
#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    pub diagnostics: DiagnosticStyle,
    pub verbose: bool,
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    LexicalError,
}

impl Outcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Success => EXIT_SUCCESS,
            Outcome::LexicalError => EXIT_DATA_ERROR,
        }
    }
}

/// Pipeline that connects source files to the scanner and the output streams
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Read `path` and run `action`, writing to stdout and stderr
    pub fn run(&self, action: Action, path: &Path) -> CompileResult<Outcome> {
        let source = read_source(path)?;
        let filename = path.display().to_string();

        if self.config.verbose {
            info!(action = action.name(), file = %filename, bytes = source.len(), "running");
        }

        let mut reporter = DiagnosticReporter::stderr(self.config.diagnostics);
        let stdout = io::stdout();
        match action {
            Action::Tokenize => {
                self.tokenize_source(&source, &filename, stdout.lock(), &mut reporter)
            }
        }
    }

    /// Scan `source`, echoing the token listing to `out` and diagnostics to `reporter`
    pub fn tokenize_source<W: Write, D: WriteColor>(
        &self,
        source: &str,
        filename: &str,
        out: W,
        reporter: &mut DiagnosticReporter<D>,
    ) -> CompileResult<Outcome> {
        let file_id = reporter.add_file(filename, source);
        let mut emitter = StreamEmitter::new(out, reporter, file_id);

        let output = Scanner::new(source).scan(&mut emitter)?;
        debug!(
            file = filename,
            tokens = output.tokens.len(),
            errors = output.errors.len(),
            "tokenized"
        );

        Ok(if output.had_error() {
            Outcome::LexicalError
        } else {
            Outcome::Success
        })
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}

/// Read the whole file into memory
fn read_source(path: &Path) -> CompileResult<String> {
    let bytes = fs::read(path)?;
    String::from_utf8(bytes).map_err(|source| CompileError::Encoding {
        path: path.to_path_buf(),
        source,
    })
}
