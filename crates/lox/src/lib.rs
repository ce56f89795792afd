//! Lox scanner - turns Lox source text into a classified token listing
//!
//! ## Architecture
//!
//! The crate is organized into:
//! - **Lexer** (`lexer/`): token definitions and the single-pass scanner
//! - **Emit** (`emit.rs`): token and diagnostic output channels
//! - **Driver** (`driver/`): file loading, actions and exit statuses
//! - **Common** (`common/`): shared infrastructure (errors, spans, diagnostics)

pub mod common;
pub mod driver;
pub mod emit;
pub mod lexer;

// Re-exports for convenience
pub use common::{CompileError, CompileResult, DiagnosticReporter, DiagnosticStyle, LexError, Span};
pub use driver::{Action, Outcome, Pipeline, PipelineConfig};
pub use emit::{Emitter, StreamEmitter};
pub use lexer::{Literal, ScanOutput, Scanner, Token, TokenKind};
