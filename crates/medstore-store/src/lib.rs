//! # medstore-store: Flat-File Storage for the Medical Store
//!
//! This crate owns every file access in the system. Three files live in the
//! data directory:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Data Directory Layout                            │
//! │                                                                         │
//! │  medicines.json      Catalog document: { last_id, records: [...] }     │
//! │                      Rewritten wholesale on every mutation via          │
//! │                      temp-file-then-rename (atomic replace).            │
//! │                                                                         │
//! │  transactions.jsonl  Structured transaction log: one JSON record per   │
//! │                      line, appended per checkout, never rewritten.      │
//! │                                                                         │
//! │  sales_history.txt   Human-readable receipt log: one block per         │
//! │                      checkout, appended, never rewritten.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Discipline
//! The stores hold no in-memory cache. Every logical operation loads the
//! catalog fresh from disk, works on that snapshot, and (if it mutates)
//! saves the whole document back in one atomic step. Checkout in particular
//! re-reads the catalog rather than trusting the snapshot taken when items
//! went into the cart.

pub mod catalog;
pub mod error;
pub mod receipt;
pub mod sales;

pub use catalog::{Catalog, CatalogStore};
pub use error::{StoreError, StoreResult};
pub use receipt::{format_receipt, ReceiptLog};
pub use sales::TransactionLog;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// First medicine id ever assigned. Ids are monotonic from here and are
/// never reused, even after the record they belonged to is deleted.
pub const FIRST_MEDICINE_ID: u64 = 1001;

/// First transaction id ever assigned.
pub const FIRST_TRANSACTION_ID: u64 = 5001;

/// Catalog document file name.
pub const CATALOG_FILE: &str = "medicines.json";

/// Structured transaction log file name.
pub const TRANSACTION_FILE: &str = "transactions.jsonl";

/// Human-readable receipt log file name.
pub const RECEIPT_FILE: &str = "sales_history.txt";
