//! Error types and diagnostic reporting

use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::string::FromUtf8Error;

use codespan_reporting::diagnostic::{Diagnostic, Label};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream, WriteColor};
use thiserror::Error;

use super::Span;

/// Raw error produced by the logos state machine and its callbacks
///
/// The default variant is what logos yields for input that matches no rule.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LexErrorKind {
    #[default]
    #[error("unexpected character")]
    UnexpectedCharacter,

    #[error("unterminated string")]
    UnterminatedString,

    #[error("invalid number")]
    InvalidNumber,
}

/// Lexical error located on a source line
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("Unexpected character: {character}")]
    UnexpectedCharacter {
        character: String,
        line: usize,
        span: Span,
    },

    #[error("Unterminated string.")]
    UnterminatedString { line: usize, span: Span },

    #[error("Invalid number: {lexeme}")]
    InvalidNumber {
        lexeme: String,
        line: usize,
        span: Span,
    },
}

impl LexError {
    /// Attach the offending text and its line to a raw lexer error
    pub fn new(kind: LexErrorKind, slice: &str, line: usize, span: Span) -> Self {
        match kind {
            LexErrorKind::UnexpectedCharacter => Self::UnexpectedCharacter {
                character: slice.to_string(),
                line,
                span,
            },
            LexErrorKind::UnterminatedString => Self::UnterminatedString { line, span },
            LexErrorKind::InvalidNumber => Self::InvalidNumber {
                lexeme: slice.to_string(),
                line,
                span,
            },
        }
    }

    pub fn line(&self) -> usize {
        match self {
            Self::UnexpectedCharacter { line, .. }
            | Self::UnterminatedString { line, .. }
            | Self::InvalidNumber { line, .. } => *line,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Self::UnexpectedCharacter { span, .. }
            | Self::UnterminatedString { span, .. }
            | Self::InvalidNumber { span, .. } => *span,
        }
    }

    /// Whether the scanner abandons the rest of the buffer after this error
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::UnterminatedString { .. })
    }

    fn label(&self) -> &'static str {
        match self {
            Self::UnexpectedCharacter { .. } => "not recognized by any token rule",
            Self::UnterminatedString { .. } => "string starts here and never closes",
            Self::InvalidNumber { .. } => "not a valid number",
        }
    }
}

/// Driver-level failure
#[derive(Error, Debug)]
pub enum CompileError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("{} is not valid UTF-8", .path.display())]
    Encoding {
        path: PathBuf,
        #[source]
        source: FromUtf8Error,
    },
}

pub type CompileResult<T> = Result<T, CompileError>;

/// How lexical diagnostics are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiagnosticStyle {
    /// `[line N] Error: message`, one line per error
    #[default]
    Plain,
    /// codespan-reporting output with the offending source excerpt
    Rich,
}

/// Diagnostic reporter writing to the error stream
pub struct DiagnosticReporter<W = StandardStream> {
    files: SimpleFiles<String, String>,
    writer: W,
    config: term::Config,
    style: DiagnosticStyle,
}

impl DiagnosticReporter {
    pub fn new() -> Self {
        Self::stderr(DiagnosticStyle::default())
    }

    pub fn stderr(style: DiagnosticStyle) -> Self {
        let choice = if io::stderr().is_terminal() {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        Self::with_writer(StandardStream::stderr(choice), style)
    }
}

impl Default for DiagnosticReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: WriteColor> DiagnosticReporter<W> {
    pub fn with_writer(writer: W, style: DiagnosticStyle) -> Self {
        Self {
            files: SimpleFiles::new(),
            writer,
            config: term::Config::default(),
            style,
        }
    }

    pub fn add_file(&mut self, name: impl Into<String>, source: impl Into<String>) -> usize {
        self.files.add(name.into(), source.into())
    }

    pub fn style(&self) -> DiagnosticStyle {
        self.style
    }

    pub fn report_error(&mut self, file_id: usize, error: &LexError) -> io::Result<()> {
        match self.style {
            DiagnosticStyle::Plain => {
                writeln!(self.writer, "[line {}] Error: {}", error.line(), error)?;
                self.writer.flush()
            }
            DiagnosticStyle::Rich => {
                let diagnostic = Diagnostic::error()
                    .with_message(error.to_string())
                    .with_labels(vec![
                        Label::primary(file_id, error.span().range()).with_message(error.label()),
                    ])
                    .with_notes(vec![format!("on line {}", error.line())]);

                term::emit(&mut self.writer, &self.config, &self.files, &diagnostic)
                    .map_err(io::Error::other)
            }
        }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }
}
