//! Decode and parse errors for Intcode programs.

use thiserror::Error;

/// Errors that occur while decoding a single instruction word.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The low two digits do not name a known opcode.
    #[error("unknown opcode in word {0}")]
    UnknownOpcode(i64),

    /// A parameter mode digit is not 0, 1 or 2.
    #[error("unknown parameter mode {mode} in word {word}")]
    UnknownMode { word: i64, mode: i64 },
}

/// Errors that occur while loading a program from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The text contained no integers at all.
    #[error("empty program")]
    Empty,

    /// A comma-separated token is not a decimal integer.
    #[error("invalid integer {token:?} at position {index}")]
    InvalidInteger { index: usize, token: String },
}
