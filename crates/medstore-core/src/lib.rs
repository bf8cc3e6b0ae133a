//! # medstore-core: Pure Business Logic for the Medical Store
//!
//! This crate is the heart of the system. It contains every business rule as
//! pure functions and types with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       medstore Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Terminal App (apps/terminal)                   │   │
//! │  │    Main Menu ──► Admin Panel ──► Customer Panel ──► Receipts    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ medstore-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌────────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │  checkout  │  │   │
//! │  │   │ Medicine  │  │   Money   │  │   Cart    │  │ settlement │  │   │
//! │  │   │ Txn types │  │  TaxCalc  │  │ CartLine  │  │            │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILE SYSTEM • NO CONSOLE • PURE FUNCTIONS         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              medstore-store (Flat-File Storage)                 │   │
//! │  │       catalog document, transaction log, receipt log            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Medicine, TransactionRecord, patches)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - Shopping cart with merge-on-add and partial removal
//! - [`checkout`] - Pure checkout settlement (validate + decrement)
//! - [`validation`] - Business rule validation
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: deterministic - same input, same output
//! 2. **No I/O**: file system and console access are FORBIDDEN here
//! 3. **Integer Money**: all monetary values are in cents (i64)
//! 4. **Explicit Errors**: all errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod checkout;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartLine, CartTotals};
pub use checkout::{settle, Settlement};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::{Medicine, MedicinePatch, NewMedicine, SaleLine, TaxRate, TransactionRecord};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default VAT rate in basis points (500 = 5%).
///
/// The shop bills a flat 5% VAT on the cart subtotal. The rate is
/// configurable at the application layer; this is the canonical default.
pub const DEFAULT_TAX_RATE_BPS: u32 = 500;

/// Maximum quantity of a single medicine on one cart line.
///
/// Guards against an accidental over-order (typing 1000 instead of 10).
/// Not a storage limit - the catalog itself is unbounded.
pub const MAX_LINE_QUANTITY: i64 = 999;

/// Stock level below which a medicine shows up in the low-stock report.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 10;
