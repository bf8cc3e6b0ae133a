//! # Storage Error Types
//!
//! Error types for the flat-file storage layer.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / serde_json::Error                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← adds the file path and categorization      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  AppError (terminal app) ← reported on the console, menu continues     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A missing catalog file is NOT an error - first run starts with an empty
//! catalog. An unreadable or unparsable file is surfaced as `Io`/`Corrupt`
//! so the caller can report it and abandon the operation; the file on disk
//! is left exactly as it was.

use std::path::PathBuf;

use thiserror::Error;

use medstore_core::ValidationError;

/// Storage operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No catalog record carries the requested id.
    #[error("Medicine not found: {0}")]
    NotFound(u64),

    /// Input was rejected before anything touched the disk.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The file exists but does not parse as the expected document.
    ///
    /// ## When This Occurs
    /// - Truncation by an external process (our own writes are atomic)
    /// - Hand-editing gone wrong
    #[error("{} is corrupt: {}", .path.display(), .source)]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Reading or writing the file failed at the OS level.
    #[error("I/O error on {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    /// Creates an I/O error carrying the offending path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates a corrupt-file error carrying the offending path.
    pub fn corrupt(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        StoreError::Corrupt {
            path: path.into(),
            source,
        }
    }
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;
