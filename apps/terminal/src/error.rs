//! # Application Error Type
//!
//! The single error type menu actions return.
//!
//! ## Error Handling Strategy
//! Every error reaching a menu loop is printed and the loop continues -
//! bad input, a missing id, or an out-of-stock cart never terminates the
//! process. Save-path storage failures abandon the action; the previous
//! on-disk state is intact because catalog writes are atomic-replace.

use thiserror::Error;

use medstore_core::CoreError;
use medstore_store::StoreError;

/// Errors surfaced by menu actions.
#[derive(Debug, Error)]
pub enum AppError {
    /// Business rule violation (stock, cart, validation).
    #[error("{0}")]
    Core(#[from] CoreError),

    /// Storage failure or missing record.
    #[error("{0}")]
    Store(#[from] StoreError),

    /// Console I/O failed (stdin closed, broken pipe).
    #[error("console I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Input that could not be parsed (non-numeric id, malformed date).
    #[error("Invalid input: {0}")]
    Input(String),
}

impl AppError {
    /// Creates an input error.
    pub fn input(message: impl Into<String>) -> Self {
        AppError::Input(message.into())
    }

    /// True for errors a menu loop should report and swallow; console I/O
    /// failures are fatal instead.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, AppError::Io(_))
    }
}

/// Reports a recoverable error on the console and swallows it, so the
/// enclosing menu loop continues; fatal errors propagate.
pub fn report(result: Result<(), AppError>) -> Result<(), AppError> {
    match result {
        Err(err) if err.is_recoverable() => {
            println!("\nError: {err}");
            Ok(())
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_error_message() {
        let err = AppError::input("expected a number");
        assert_eq!(err.to_string(), "Invalid input: expected a number");
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_io_error_is_fatal() {
        let err: AppError =
            std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "stdin closed").into();
        assert!(!err.is_recoverable());
    }
}
