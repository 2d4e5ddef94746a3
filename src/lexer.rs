//! Module `lexer` implements a pull-based, forward-only lexer for subjs expressions.
//!
//! It turns a `&str` into [`Token`]s one request at a time, skipping whitespace.
//! Scanning works on `char`s, so multi-byte characters (CJK, emoji, ...) are
//! always consumed as single units and never split across tokens.
//!
//! # Public API
//!
//! - `Lexer::new(src: &'a str) -> Lexer<'a>`
//!   Create a new lexer over the input text.
//!
//! - `Lexer::next_token(&mut self) -> Result<Token<'a>>`
//!   Pull the next token. Once the input is exhausted every call returns `EOF`.
//!
//! - `impl Iterator for Lexer<'a>`
//!   Yields `Result<Token<'a>>` until (and including) exactly one `EOF`.
//!
//! # Token Recognition
//!
//! - Single‑character tokens: `+`, `(`, `)`, `.`, `,`.
//! - String literals: `"…"` or `'…'`, closed by the *same* quote, no escapes.
//!   Reaching end of input first is an `Unterminated string.` error.
//! - Numbers: maximal run of ASCII digits, parsed as `i64`.
//! - Identifiers: maximal run of Unicode letters (general category `L`), so no
//!   digits, `_`, letter-numbers such as `Ⅻ` or combining marks.
//! - Anything else: `Unexpected character` error.
//!
//! # Example
//!
//! ```rust
//! use subjs::lexer::Lexer;
//!
//! let mut lexer = Lexer::new("obj.method(1, 'x')");
//! for result in &mut lexer {
//!     match result {
//!         Ok(token) => println!("{}", token),
//!         Err(err) => eprintln!("Lex error: {}", err),
//!     }
//! }
//! ```

use crate::error::{Result, SubjsError};
use crate::token::{Token, TokenType};
use log::{debug, info};
use memchr::memchr;
use regex::Regex;
use std::iter::FusedIterator;
use std::sync::OnceLock;

/// Anchored run of letters, compiled once per process.
fn letter_run() -> Result<&'static Regex> {
    static LETTER_RUN: OnceLock<Regex> = OnceLock::new();

    if let Some(re) = LETTER_RUN.get() {
        return Ok(re);
    }

    let re = Regex::new(r"^\p{L}+")
        .map_err(|e| SubjsError::lex(0, format!("Failed to compile letter pattern: {}", e)))?;

    Ok(LETTER_RUN.get_or_init(|| re))
}

/// A single pass lexer.  The lifetime `'a` ties every emitted token's
/// `lexeme` slice back to the original source text.
pub struct Lexer<'a> {
    src: &'a str,   // entire source text
    start: usize,   // byte offset of the *first* char of the current lexeme
    curr: usize,    // byte offset *one past* the last char examined
    finished: bool, // iterator view already yielded EOF
}

impl<'a> Lexer<'a> {
    /// Create a new lexer over `src`.
    #[inline]
    pub fn new(src: &'a str) -> Self {
        info!("Lexer created over {} bytes", src.len());

        Self {
            src,
            start: 0,
            curr: 0,
            finished: false,
        }
    }

    /// Current scan position as a byte offset.
    #[inline]
    pub fn offset(&self) -> usize {
        self.curr
    }

    // ───────────────────────────── primitive helpers ────────────────────────

    /// Look at the next char without consuming it. `None` at end of input.
    #[inline(always)]
    fn peek(&self) -> Option<char> {
        self.src[self.curr..].chars().next()
    }

    /// Consume one char, advancing by its UTF‑8 width.
    #[inline(always)]
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.curr += c.len_utf8();
        Some(c)
    }

    #[inline(always)]
    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    // ───────────────────────────── core lexing ─────────────────────────────

    /// Scan and return the next token.
    pub fn next_token(&mut self) -> Result<Token<'a>> {
        self.skip_whitespace();
        self.start = self.curr;

        let Some(c) = self.advance() else {
            return Ok(Token::new(TokenType::EOF, "", self.curr));
        };

        let token_type = match c {
            '+' => TokenType::PLUS,
            '(' => TokenType::LEFT_PAREN,
            ')' => TokenType::RIGHT_PAREN,
            '.' => TokenType::DOT,
            ',' => TokenType::COMMA,

            '"' | '\'' => self.scan_string(c)?,

            '0'..='9' => self.scan_number()?,

            other => {
                if !self.scan_identifier()? {
                    return Err(SubjsError::lex(
                        self.start,
                        format!("Unexpected character: {}", other),
                    ));
                }

                TokenType::IDENTIFIER
            }
        };

        let lexeme: &'a str = &self.src[self.start..self.curr];
        debug!("Scanned {} at offset {}", token_type.name(), self.start);

        Ok(Token::new(token_type, lexeme, self.start))
    }

    /// Scan a quoted literal.  `self.curr` sits just past the opening quote;
    /// on success it ends up past the closing one.
    fn scan_string(&mut self, quote: char) -> Result<TokenType> {
        // Both quote characters are ASCII, so a byte search can only land on a
        // char boundary.
        match memchr(quote as u8, &self.src.as_bytes()[self.curr..]) {
            Some(pos) => {
                let contents: &str = &self.src[self.curr..self.curr + pos];
                self.curr += pos + 1;

                Ok(TokenType::STRING(contents.to_owned()))
            }

            None => {
                self.curr = self.src.len();

                Err(SubjsError::lex(self.start, "Unterminated string."))
            }
        }
    }

    fn scan_number(&mut self) -> Result<TokenType> {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }

        let digits: &str = &self.src[self.start..self.curr];

        digits.parse::<i64>().map(TokenType::NUMBER).map_err(|_| {
            SubjsError::lex(
                self.start,
                format!("Number literal out of range: {}", digits),
            )
        })
    }

    /// Extend the current lexeme over a run of letters.  Returns `false`
    /// when the char at `self.start` is not a letter.
    fn scan_identifier(&mut self) -> Result<bool> {
        match letter_run()?.find(&self.src[self.start..]) {
            Some(run) => {
                self.curr = self.start + run.end();

                Ok(true)
            }

            None => Ok(false),
        }
    }
}

// ───────────────────────── Iterator implementation ─────────────────────────

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let result = self.next_token();

        if matches!(&result, Ok(token) if token.token_type == TokenType::EOF) {
            self.finished = true;
        }

        Some(result)
    }
}

impl<'a> FusedIterator for Lexer<'a> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_on_empty_input() {
        let mut lexer = Lexer::new("");

        assert_eq!(lexer.advance(), None);
        assert_eq!(lexer.offset(), 0);
    }

    #[test]
    fn advance_steps_over_ascii() {
        let mut lexer = Lexer::new("ab");

        assert_eq!(lexer.advance(), Some('a'));
        assert_eq!(lexer.offset(), 1);
        assert_eq!(lexer.advance(), Some('b'));
        assert_eq!(lexer.offset(), 2);
        assert_eq!(lexer.advance(), None);
        assert_eq!(lexer.offset(), 2);
    }

    #[test]
    fn advance_steps_over_three_byte_char() {
        let src = "世a";
        let mut lexer = Lexer::new(src);

        assert_eq!(lexer.advance(), Some('世'));
        assert_eq!(lexer.offset(), '世'.len_utf8());
        assert_eq!(lexer.advance(), Some('a'));
        assert_eq!(lexer.offset(), src.len());
        assert_eq!(lexer.advance(), None);
    }

    #[test]
    fn advance_steps_over_four_byte_char() {
        let src = "😊x";
        let mut lexer = Lexer::new(src);

        assert_eq!(lexer.advance(), Some('😊'));
        assert_eq!(lexer.offset(), 4);
        assert_eq!(lexer.peek(), Some('x'));
        assert_eq!(lexer.advance(), Some('x'));
        assert_eq!(lexer.offset(), src.len());
    }

    #[test]
    fn next_token_keeps_returning_eof() {
        let mut lexer = Lexer::new("  ");

        for _ in 0..3 {
            let token = lexer.next_token().unwrap();
            assert_eq!(token.token_type, TokenType::EOF);
            assert_eq!(token.offset, 2);
        }
    }
}
