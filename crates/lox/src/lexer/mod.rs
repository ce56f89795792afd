//! Lexer module for tokenizing Lox source code

mod token;
mod scanner;

pub use token::{Literal, Token, TokenKind};
pub use scanner::{ScanOutput, Scanner};
