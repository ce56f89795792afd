//! Scanner driving the logos token machine
//!
//! Logos classifies each lexeme; the scanner adds what the state machine
//! cannot track on its own: the line counter, the sticky error flag, the
//! single trailing EOF and the early stop after an unterminated string.

use std::io;

use super::token::{Token, TokenKind};
use crate::common::{LexError, Span};
use crate::emit::Emitter;
use logos::Logos;
use tracing::{debug, trace};

/// Result of scanning a whole buffer
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScanOutput<'a> {
    /// Tokens in source order, always ending with exactly one EOF
    pub tokens: Vec<Token<'a>>,
    /// Lexical errors in the order they were found
    pub errors: Vec<LexError>,
}

impl ScanOutput<'_> {
    pub fn had_error(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Single-pass scanner for Lox source
pub struct Scanner<'a> {
    inner: logos::Lexer<'a, TokenKind>,
    /// Bytes accounted for so far
    cursor: usize,
    line: usize,
    had_error: bool,
    /// Set once an unterminated string ends the scan
    abandoned: bool,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            inner: TokenKind::lexer(source),
            cursor: 0,
            line: 1,
            had_error: false,
            abandoned: false,
        }
    }

    pub fn source(&self) -> &'a str {
        self.inner.source()
    }

    /// Current 1-based line
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn had_error(&self) -> bool {
        self.had_error
    }

    /// Scan the next token
    ///
    /// Returns EOF once the input is exhausted or abandoned, and keeps
    /// returning it on every later call.
    pub fn next_token(&mut self) -> Result<Token<'a>, LexError> {
        if self.abandoned {
            return Ok(Token::eof(self.line));
        }

        match self.inner.next() {
            Some(Ok(kind)) => {
                let span = self.inner.span();
                self.advance_to(span.start);
                let token = Token::new(kind, self.inner.slice(), self.line);
                // String bodies may span lines
                self.advance_to(span.end);
                Ok(token)
            }
            Some(Err(kind)) => {
                let span = self.inner.span();
                self.advance_to(span.start);
                let error = LexError::new(kind, self.inner.slice(), self.line, Span::from(span));
                self.had_error = true;
                if error.is_fatal() {
                    debug!(line = self.line, "abandoning scan after unterminated string");
                    self.abandoned = true;
                } else {
                    self.advance_to(self.inner.span().end);
                }
                Err(error)
            }
            None => {
                self.advance_to(self.source().len());
                Ok(Token::eof(self.line))
            }
        }
    }

    /// Scan the whole buffer without echoing anything
    pub fn tokenize_all(mut self) -> ScanOutput<'a> {
        let mut output = ScanOutput::default();
        loop {
            match self.next_token() {
                Ok(token) => {
                    let is_eof = token.is_eof();
                    output.tokens.push(token);
                    if is_eof {
                        break;
                    }
                }
                Err(error) => output.errors.push(error),
            }
        }
        output
    }

    /// Scan the whole buffer, echoing tokens and diagnostics as they are found
    pub fn scan<E: Emitter>(mut self, emitter: &mut E) -> io::Result<ScanOutput<'a>> {
        debug!(bytes = self.source().len(), "scanning");

        let mut output = ScanOutput::default();
        loop {
            match self.next_token() {
                Ok(token) => {
                    trace!(line = token.line, kind = %token.kind, lexeme = token.lexeme, "token");
                    emitter.token(&token)?;
                    let is_eof = token.is_eof();
                    output.tokens.push(token);
                    if is_eof {
                        break;
                    }
                }
                Err(error) => {
                    emitter.diagnostic(&error)?;
                    output.errors.push(error);
                }
            }
        }

        debug!(
            tokens = output.tokens.len(),
            errors = output.errors.len(),
            lines = self.line,
            "scan finished"
        );
        Ok(output)
    }

    /// Move the cursor forward, counting the newlines passed over
    fn advance_to(&mut self, position: usize) {
        if position <= self.cursor {
            return;
        }
        let passed = &self.source()[self.cursor..position];
        self.line += passed.bytes().filter(|&b| b == b'\n').count();
        self.cursor = position;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn listing(source: &str) -> Vec<String> {
        Scanner::new(source)
            .tokenize_all()
            .tokens
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    fn diagnostics(source: &str) -> Vec<String> {
        Scanner::new(source)
            .tokenize_all()
            .errors
            .iter()
            .map(|error| format!("[line {}] Error: {}", error.line(), error))
            .collect()
    }

    #[test]
    fn test_empty_input() {
        let output = Scanner::new("").tokenize_all();
        assert_eq!(output.tokens, vec![Token::eof(1)]);
        assert!(!output.had_error());
    }

    #[test]
    fn test_punctuation() {
        assert_eq!(
            listing("({*.,+-;})"),
            vec![
                "LEFT_PAREN ( null",
                "LEFT_BRACE { null",
                "STAR * null",
                "DOT . null",
                "COMMA , null",
                "PLUS + null",
                "MINUS - null",
                "SEMICOLON ; null",
                "RIGHT_BRACE } null",
                "RIGHT_PAREN ) null",
                "EOF  null",
            ]
        );
    }

    #[test]
    fn test_consecutive_two_character_operators() {
        assert_eq!(
            listing("===!=<=>="),
            vec![
                "EQUAL_EQUAL == null",
                "EQUAL = null",
                "BANG_EQUAL != null",
                "LESS_EQUAL <= null",
                "GREATER_EQUAL >= null",
                "EOF  null",
            ]
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            listing("123 123.40 .5 7."),
            vec![
                "NUMBER 123 123.0",
                "NUMBER 123.40 123.4",
                "DOT . null",
                "NUMBER 5 5.0",
                "NUMBER 7 7.0",
                "DOT . null",
                "EOF  null",
            ]
        );
    }

    #[test]
    fn test_strings() {
        assert_eq!(
            listing("\"hello\" \"\" \"a // b\""),
            vec![
                "STRING \"hello\" hello",
                "STRING \"\" ",
                "STRING \"a // b\" a // b",
                "EOF  null",
            ]
        );
    }

    #[test]
    fn test_identifiers_and_keywords() {
        assert_eq!(
            listing("var forest = for_each or orchid;"),
            vec![
                "VAR var null",
                "IDENTIFIER forest null",
                "EQUAL = null",
                "IDENTIFIER for_each null",
                "OR or null",
                "IDENTIFIER orchid null",
                "SEMICOLON ; null",
                "EOF  null",
            ]
        );
    }

    #[test]
    fn test_all_keywords() {
        let source = "and class else false for fun if nil or print return super this true var while";
        let output = Scanner::new(source).tokenize_all();
        let (eof, words) = output.tokens.split_last().unwrap();
        assert!(eof.is_eof());
        assert_eq!(words.len(), 16);
        for token in words {
            assert!(token.kind.is_keyword(), "{token} should be a keyword");
            assert_eq!(token.kind.name(), token.lexeme.to_uppercase());
        }
    }

    #[test]
    fn test_comment_skipping_tracks_lines() {
        let output = Scanner::new("// ignored\n+").tokenize_all();
        assert_eq!(
            output.tokens,
            vec![Token::new(TokenKind::Plus, "+", 2), Token::eof(2)]
        );
    }

    #[test]
    fn test_comment_at_end_of_input() {
        assert_eq!(listing("1 // trailing"), vec!["NUMBER 1 1.0", "EOF  null"]);
    }

    #[test]
    fn test_unexpected_character_recovers() {
        let output = Scanner::new("@+").tokenize_all();
        assert!(output.had_error());
        assert_eq!(
            output.tokens,
            vec![Token::new(TokenKind::Plus, "+", 1), Token::eof(1)]
        );
        assert_eq!(diagnostics("@+"), vec!["[line 1] Error: Unexpected character: @"]);
    }

    #[test]
    fn test_unexpected_characters_in_order() {
        assert_eq!(
            diagnostics("#\n$ %\n\n@"),
            vec![
                "[line 1] Error: Unexpected character: #",
                "[line 2] Error: Unexpected character: $",
                "[line 2] Error: Unexpected character: %",
                "[line 4] Error: Unexpected character: @",
            ]
        );
    }

    #[test]
    fn test_non_ascii_is_one_unexpected_character() {
        let output = Scanner::new("é1").tokenize_all();
        assert_eq!(
            output.errors,
            vec![LexError::UnexpectedCharacter {
                character: "é".to_string(),
                line: 1,
                span: Span::new(0, 2),
            }]
        );
        assert_eq!(output.tokens[0].to_string(), "NUMBER 1 1.0");
    }

    #[test]
    fn test_unterminated_string_abandons_scan() {
        let output = Scanner::new("+ \"abc\n+ 1").tokenize_all();
        assert_eq!(
            output.tokens,
            vec![Token::new(TokenKind::Plus, "+", 1), Token::eof(1)]
        );
        assert_eq!(diagnostics("+ \"abc\n+ 1"), vec!["[line 1] Error: Unterminated string."]);
    }

    #[test]
    fn test_unterminated_string_reports_opening_line() {
        assert_eq!(
            diagnostics("\n\n\"never\nclosed"),
            vec!["[line 3] Error: Unterminated string."]
        );
    }

    #[test]
    fn test_multiline_string_advances_line() {
        let output = Scanner::new("\"a\nb\"\n@").tokenize_all();
        assert_eq!(output.tokens[0].line, 1);
        assert_eq!(output.tokens[0].to_string(), "STRING \"a\nb\" a\nb");
        assert_eq!(output.errors[0].line(), 3);
    }

    #[test]
    fn test_diagnostic_line_counts_preceding_newlines() {
        let source = "var a = 1;\n\nprint a;\n  # here";
        let errors = Scanner::new(source).tokenize_all().errors;
        let position = errors[0].span().start;
        let newlines = source[..position].matches('\n').count();
        assert_eq!(errors[0].line(), newlines + 1);
    }

    #[test]
    fn test_single_eof_after_errors() {
        for source in ["", "@", "\"open", "1 + 2", "$$$\n\n"] {
            let output = Scanner::new(source).tokenize_all();
            let eofs = output.tokens.iter().filter(|token| token.is_eof()).count();
            assert_eq!(eofs, 1, "source {source:?}");
            assert!(output.tokens.last().is_some_and(Token::is_eof));
        }
    }

    #[test]
    fn test_eof_repeats_after_end() {
        let mut scanner = Scanner::new("+");
        assert_eq!(scanner.next_token().unwrap().kind, TokenKind::Plus);
        assert!(scanner.next_token().unwrap().is_eof());
        assert!(scanner.next_token().unwrap().is_eof());
    }

    #[test]
    fn test_operator_lexemes_rescan_to_same_kind() {
        let source = "( ) { } , . - + ; * / ! != = == > >= < <=";
        for token in Scanner::new(source).tokenize_all().tokens {
            if token.is_eof() {
                continue;
            }
            let rescanned = Scanner::new(token.lexeme).tokenize_all().tokens;
            assert_eq!(rescanned[0].kind, token.kind, "lexeme {:?}", token.lexeme);
            assert!(rescanned[1].is_eof());
        }
    }

    #[test]
    fn test_line_counter_at_end() {
        let mut scanner = Scanner::new("a\nb\n\n");
        while !scanner.next_token().unwrap().is_eof() {}
        assert_eq!(scanner.line(), 4);
        assert!(!scanner.had_error());
    }
}
