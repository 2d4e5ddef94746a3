use log::debug;
use serde::Serialize;
use std::fmt;
use std::mem;

/// The different kinds of tokens recognized by the lexer.
///
/// Variants without data represent single‑character tokens.
/// `STRING(String)` and `NUMBER(i64)` carry their decoded literal values.
/// `IDENTIFIER` keeps its text in the token's lexeme.
/// `EOF` marks the end of input.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Serialize)]
pub enum TokenType {
    /// '+'
    PLUS,

    /// '('
    LEFT_PAREN,

    /// ')'
    RIGHT_PAREN,

    /// '.'
    DOT,

    /// ','
    COMMA,

    /// A string literal (contents without quotes)
    STRING(String),

    /// A non-negative integer literal
    NUMBER(i64),

    /// A run of letters
    IDENTIFIER,

    /// End‑of‑input marker
    EOF,
}

impl TokenType {
    /// Upper-case variant name without payload, as printed by `tokenize`.
    pub fn name(&self) -> &'static str {
        match self {
            TokenType::PLUS => "PLUS",
            TokenType::LEFT_PAREN => "LEFT_PAREN",
            TokenType::RIGHT_PAREN => "RIGHT_PAREN",
            TokenType::DOT => "DOT",
            TokenType::COMMA => "COMMA",
            TokenType::STRING(_) => "STRING",
            TokenType::NUMBER(_) => "NUMBER",
            TokenType::IDENTIFIER => "IDENTIFIER",
            TokenType::EOF => "EOF",
        }
    }
}

impl PartialEq for TokenType {
    /// Two TokenTypes are equal if they share the same variant
    /// (ignoring any inner data). Uses `mem::discriminant` to compare.
    fn eq(&self, other: &Self) -> bool {
        mem::discriminant(self) == mem::discriminant(other)
    }
}

/// A scanned token: its type, the original lexeme and where it started.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Token<'a> {
    /// The category of this token.
    pub token_type: TokenType,

    /// The exact substring from the source that produced this token.
    pub lexeme: &'a str,

    /// Byte offset of the lexeme's first character.
    pub offset: usize,
}

impl<'a> Token<'a> {
    /// Create a new Token with the given type, lexeme, and offset.
    pub fn new(token_type: TokenType, lexeme: &'a str, offset: usize) -> Self {
        debug!(
            "Creating new token: type={:?}, lexeme={}, offset={}",
            token_type, lexeme, offset
        );

        Self {
            token_type,
            lexeme,
            offset,
        }
    }

    /// Human description used in syntax errors.
    pub fn describe(&self) -> String {
        match self.token_type {
            TokenType::EOF => "end of input".to_string(),
            _ => format!("'{}'", self.lexeme),
        }
    }
}

impl<'a> fmt::Display for Token<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.token_type {
            TokenType::STRING(s) => write!(f, "STRING {} {}", self.lexeme, s),
            TokenType::NUMBER(n) => write!(f, "NUMBER {} {}", self.lexeme, n),
            other => write!(f, "{} {} null", other.name(), self.lexeme),
        }
    }
}
