//! Token definitions for the Lox lexer

use std::fmt;

use crate::common::LexErrorKind;
use logos::Logos;

/// Token as it appears in the scanned source
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    /// Exact source text, quotes included for strings
    pub lexeme: &'a str,
    /// Line the token starts on
    pub line: usize,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind, lexeme: &'a str, line: usize) -> Self {
        Self { kind, lexeme, line }
    }

    /// End-of-input marker
    pub fn eof(line: usize) -> Self {
        Self::new(TokenKind::Eof, "", line)
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    /// Decoded value carried by number and string tokens
    pub fn literal(&self) -> Option<Literal<'a>> {
        match self.kind {
            TokenKind::Number(value) => Some(Literal::Number(value)),
            TokenKind::String => {
                let content = self
                    .lexeme
                    .strip_prefix('"')
                    .and_then(|rest| rest.strip_suffix('"'))
                    .unwrap_or(self.lexeme);
                Some(Literal::String(content))
            }
            _ => None,
        }
    }
}

/// Renders `<KIND> <lexeme> <literal>`, with `null` for absent literals
impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ", self.kind, self.lexeme)?;
        match self.literal() {
            Some(literal) => write!(f, "{literal}"),
            None => f.write_str("null"),
        }
    }
}

/// Decoded literal value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Literal<'a> {
    Number(f64),
    String(&'a str),
}

impl fmt::Display for Literal<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Integral values keep a trailing `.0`; everything else is the
            // shortest decimal that round-trips.
            Literal::Number(value) if value.fract() == 0.0 => write!(f, "{value}.0"),
            Literal::Number(value) => write!(f, "{value}"),
            Literal::String(content) => f.write_str(content),
        }
    }
}

/// All token kinds in Lox
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(error = LexErrorKind)]
#[logos(skip r"[ \t\n]+")] // Newlines are counted by the scanner
#[logos(skip r"//[^\n]*")] // Skip line comments
pub enum TokenKind {
    // === Single-character tokens ===
    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,
    #[token("{")]
    LeftBrace,
    #[token("}")]
    RightBrace,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("-")]
    Minus,
    #[token("+")]
    Plus,
    #[token(";")]
    Semicolon,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,

    // === One or two character tokens ===
    #[token("!")]
    Bang,
    #[token("!=")]
    BangEqual,
    #[token("=")]
    Equal,
    #[token("==")]
    EqualEqual,
    #[token(">")]
    Greater,
    #[token(">=")]
    GreaterEqual,
    #[token("<")]
    Less,
    #[token("<=")]
    LessEqual,

    // === Literals ===
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Identifier,

    #[token("\"", lex_string)]
    String,

    #[regex(r"[0-9]+", lex_number)]
    Number(f64),

    // === Keywords ===
    #[token("and")]
    And,
    #[token("class")]
    Class,
    #[token("else")]
    Else,
    #[token("false")]
    False,
    #[token("fun")]
    Fun,
    #[token("for")]
    For,
    #[token("if")]
    If,
    #[token("nil")]
    Nil,
    #[token("or")]
    Or,
    #[token("print")]
    Print,
    #[token("return")]
    Return,
    #[token("super")]
    Super,
    #[token("this")]
    This,
    #[token("true")]
    True,
    #[token("var")]
    Var,
    #[token("while")]
    While,

    // Special
    Eof,
}

/// Consume a string body up to and including the closing quote
fn lex_string(lex: &mut logos::Lexer<'_, TokenKind>) -> Result<(), LexErrorKind> {
    let rem = lex.remainder();

    if let Some(pos) = rem.find('"') {
        lex.bump(pos + 1);
        Ok(())
    } else {
        lex.bump(rem.len());
        Err(LexErrorKind::UnterminatedString)
    }
}

/// Extend an integer part with a fraction when a digit follows the dot
fn lex_number(lex: &mut logos::Lexer<'_, TokenKind>) -> Result<f64, LexErrorKind> {
    let rem = lex.remainder().as_bytes();

    if rem.first() == Some(&b'.') && rem.get(1).is_some_and(u8::is_ascii_digit) {
        let fraction = rem[1..].iter().take_while(|b| b.is_ascii_digit()).count();
        lex.bump(1 + fraction);
    }

    lex.slice()
        .parse()
        .map_err(|_| LexErrorKind::InvalidNumber)
}

impl TokenKind {
    /// Check if this token is a reserved word
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::And
                | TokenKind::Class
                | TokenKind::Else
                | TokenKind::False
                | TokenKind::Fun
                | TokenKind::For
                | TokenKind::If
                | TokenKind::Nil
                | TokenKind::Or
                | TokenKind::Print
                | TokenKind::Return
                | TokenKind::Super
                | TokenKind::This
                | TokenKind::True
                | TokenKind::Var
                | TokenKind::While
        )
    }

    /// Check if this token carries a decoded literal
    pub fn has_literal(&self) -> bool {
        matches!(self, TokenKind::Number(_) | TokenKind::String)
    }

    /// Upper-case category name used in the token listing
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::LeftParen => "LEFT_PAREN",
            TokenKind::RightParen => "RIGHT_PAREN",
            TokenKind::LeftBrace => "LEFT_BRACE",
            TokenKind::RightBrace => "RIGHT_BRACE",
            TokenKind::Comma => "COMMA",
            TokenKind::Dot => "DOT",
            TokenKind::Minus => "MINUS",
            TokenKind::Plus => "PLUS",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Star => "STAR",
            TokenKind::Slash => "SLASH",
            TokenKind::Bang => "BANG",
            TokenKind::BangEqual => "BANG_EQUAL",
            TokenKind::Equal => "EQUAL",
            TokenKind::EqualEqual => "EQUAL_EQUAL",
            TokenKind::Greater => "GREATER",
            TokenKind::GreaterEqual => "GREATER_EQUAL",
            TokenKind::Less => "LESS",
            TokenKind::LessEqual => "LESS_EQUAL",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::String => "STRING",
            TokenKind::Number(_) => "NUMBER",
            TokenKind::And => "AND",
            TokenKind::Class => "CLASS",
            TokenKind::Else => "ELSE",
            TokenKind::False => "FALSE",
            TokenKind::Fun => "FUN",
            TokenKind::For => "FOR",
            TokenKind::If => "IF",
            TokenKind::Nil => "NIL",
            TokenKind::Or => "OR",
            TokenKind::Print => "PRINT",
            TokenKind::Return => "RETURN",
            TokenKind::Super => "SUPER",
            TokenKind::This => "THIS",
            TokenKind::True => "TRUE",
            TokenKind::Var => "VAR",
            TokenKind::While => "WHILE",
            TokenKind::Eof => "EOF",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
