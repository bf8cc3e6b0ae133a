//! # Error Types
//!
//! Domain-specific error types for medstore-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  medstore-core errors (this file)                                      │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  medstore-store errors (separate crate)                                │
//! │  └── StoreError       - File storage failures                          │
//! │                                                                         │
//! │  Terminal app errors                                                   │
//! │  └── AppError         - What the menu loop reports and survives        │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → AppError → console   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (id, name, quantities)
//! 3. Errors are enum variants, never String
//! 4. Stock shortage and bad input are reported outcomes, not crashes

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These represent business rule violations. The menu loop catches them,
/// prints a message, and continues - they never terminate the process.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Medicine id is absent from the catalog snapshot.
    ///
    /// ## When This Occurs
    /// - The id was mistyped
    /// - The record was deleted after the customer put it in the cart
    #[error("Medicine not found: {0}")]
    MedicineNotFound(u64),

    /// Insufficient stock to satisfy a requested quantity.
    ///
    /// Raised at add-to-cart time against the snapshot, and re-checked at
    /// checkout against a freshly loaded catalog.
    ///
    /// ## User Workflow
    /// ```text
    /// Add to Cart (qty: 5)
    ///      │
    ///      ▼
    /// Check stock: available=3
    ///      │
    ///      ▼
    /// InsufficientStock { name: "Paracetamol", available: 3, requested: 5 }
    ///      │
    ///      ▼
    /// Console shows: "Insufficient stock for Paracetamol: available 3, requested 5"
    /// ```
    #[error("Insufficient stock for {name}: available {available}, requested {requested}")]
    InsufficientStock {
        name: String,
        available: i64,
        requested: i64,
    },

    /// Medicine id is not on any cart line.
    #[error("Medicine {0} is not in the cart")]
    NotInCart(u64),

    /// A cart line would exceed the per-line quantity guard.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when input doesn't meet requirements. Used for early
/// validation before business logic runs. Negative values are rejected,
/// never clamped.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative (zero is allowed).
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Invalid format (e.g. a malformed date or number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
