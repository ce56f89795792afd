//! Common infrastructure shared by the scanner and the driver

mod error;
mod span;

pub use error::{
    CompileError, CompileResult, DiagnosticReporter, DiagnosticStyle, LexError, LexErrorKind,
};
pub use span::Span;
