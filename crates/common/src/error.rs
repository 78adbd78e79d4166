//! Decode errors for `.hack` machine-code text.

use thiserror::Error;

/// Errors that occur while reading `.hack` text into machine words.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// A line is not exactly 16 characters wide.
    #[error("line {line}: expected 16 binary digits, found {width}")]
    InvalidWidth { line: usize, width: usize },

    /// A line contains a character other than `0` or `1`.
    #[error("line {line}: invalid binary digit '{digit}'")]
    InvalidDigit { line: usize, digit: char },
}
