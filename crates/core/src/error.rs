//! Error types for deskutils-core

use thiserror::Error;

/// Core error type shared by every utility
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stdin was closed while a prompt was waiting for input
    #[error("End of input")]
    EndOfInput,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{what} list full (max: {max})")]
    CapacityExceeded { what: &'static str, max: usize },

    #[error("Invalid number {index} (expected 1..={len})")]
    InvalidIndex { index: usize, len: usize },

    #[error("Division by zero!")]
    DivisionByZero,

    #[error("Cannot find square root of a negative number!")]
    NegativeSquareRoot,

    #[error("Invalid file name: {0}")]
    InvalidFileName(String),

    #[error("File already exists: {0}")]
    AlreadyExists(String),

    #[error("Terminal error: {0}")]
    Terminal(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, CoreError>;
