//! Output channels for scan results
//!
//! Tokens and diagnostics travel on separate streams. An [`Emitter`] receives
//! both in the order the scanner produces them.

use std::io::{self, Write};

use codespan_reporting::term::termcolor::WriteColor;

use crate::common::{DiagnosticReporter, LexError};
use crate::lexer::Token;

/// Sink for scanner output
pub trait Emitter {
    /// Called once per token, EOF included
    fn token(&mut self, token: &Token<'_>) -> io::Result<()>;

    /// Called once per lexical error, when it is found
    fn diagnostic(&mut self, error: &LexError) -> io::Result<()>;
}

/// Writes token lines to `out` and diagnostics through a reporter
pub struct StreamEmitter<'r, W, D> {
    out: W,
    reporter: &'r mut DiagnosticReporter<D>,
    file_id: usize,
}

impl<'r, W: Write, D: WriteColor> StreamEmitter<'r, W, D> {
    pub fn new(out: W, reporter: &'r mut DiagnosticReporter<D>, file_id: usize) -> Self {
        Self {
            out,
            reporter,
            file_id,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write, D: WriteColor> Emitter for StreamEmitter<'_, W, D> {
    fn token(&mut self, token: &Token<'_>) -> io::Result<()> {
        writeln!(self.out, "{token}")?;
        if token.is_eof() {
            self.out.flush()?;
        }
        Ok(())
    }

    fn diagnostic(&mut self, error: &LexError) -> io::Result<()> {
        self.reporter.report_error(self.file_id, error)
    }
}
