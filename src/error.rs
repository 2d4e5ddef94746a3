//! Centralised error hierarchy for the **subjs** expression front end.
//!
//! The lexer, parser and resolver all report failures through [`SubjsError`].
//! Source-text problems (`Lex`, `Parse`) and value problems raised while
//! resolving an addition (`TypeMismatch`, `Overflow`) are separate variants so
//! callers never confuse "bad input" with "cannot add these two values".
//!
//! The module **does not** print diagnostics itself

use std::io;
use thiserror::Error;

use log::info;

/// Canonical error type used throughout the crate.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SubjsError {
    /// Lexical error (unterminated literal, stray character, ...).
    #[error("[offset {offset}] Error: {message}")]
    Lex {
        /// Human‑readable description.
        message: String,

        /// Byte offset in the source where the offending lexeme starts.
        offset: usize,
    },

    /// Syntactic (parser) error.
    #[error("[offset {offset}] Error: {message}")]
    Parse { message: String, offset: usize },

    /// `AddExpr::resolve` was handed operands that are not two numbers or two
    /// strings.
    #[error("Type mismatch: cannot add {left} and {right}")]
    TypeMismatch {
        left: &'static str,
        right: &'static str,
    },

    /// Integer addition left the `i64` range.
    #[error("Integer overflow: {left} + {right}")]
    Overflow { left: i64, right: i64 },

    /// Wrapper around `std::io::Error` (transparent).  Enables `?` on I/O ops.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// UTF‑8 decoding failure when ingesting external text.
    #[error(transparent)]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl SubjsError {
    /// Helper constructor for the **lexer**.
    pub fn lex<S: Into<String>>(offset: usize, msg: S) -> Self {
        let message: String = msg.into();

        info!("Creating Lex error: offset={}, msg={}", offset, message);

        SubjsError::Lex { message, offset }
    }

    /// Helper constructor for the **parser**.
    pub fn parse<S: Into<String>>(offset: usize, msg: S) -> Self {
        let message: String = msg.into();

        info!("Creating Parse error: offset={}, msg={}", offset, message);

        SubjsError::Parse { message, offset }
    }

    /// `true` for errors caused by malformed source text.
    pub fn is_syntax_error(&self) -> bool {
        matches!(self, SubjsError::Lex { .. } | SubjsError::Parse { .. })
    }

    /// `true` for errors raised while resolving an addition.
    pub fn is_resolve_error(&self) -> bool {
        matches!(
            self,
            SubjsError::TypeMismatch { .. } | SubjsError::Overflow { .. }
        )
    }
}

/// Crate‑wide `Result` alias.
pub type Result<T> = std::result::Result<T, SubjsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_and_utf8_failures_are_neither_syntax_nor_resolve_errors() {
        let io_err: SubjsError = io::Error::new(io::ErrorKind::NotFound, "missing.js").into();
        assert!(matches!(io_err, SubjsError::Io(_)));
        assert_eq!(io_err.to_string(), "missing.js");

        let utf8_err: SubjsError = String::from_utf8(vec![0xff, 0xfe]).unwrap_err().into();
        assert!(matches!(utf8_err, SubjsError::Utf8(_)));

        for err in [io_err, utf8_err] {
            assert!(!err.is_syntax_error());
            assert!(!err.is_resolve_error());
        }
    }
}
