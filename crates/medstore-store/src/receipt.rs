//! # Receipt Log
//!
//! Append-only, human-readable sales history.
//!
//! One block is appended per successful checkout:
//!
//! ```text
//! Transaction #5001
//! Purchase time: 2026-08-07 12:34:56 UTC
//! Customer: Alice
//! Items:
//!  - Paracetamol 500mg | ID:1001 | Qty:2 | Unit:$10.00 | Line:$20.00
//!  - Cough Syrup | ID:1002 | Qty:1 | Unit:$5.00 | Line:$5.00
//! Subtotal: $25.00
//! VAT (5%): $1.25
//! Total: $26.25
//! ----------------------------------------
//! ```
//!
//! The file is for people, not programs - the structured twin of every block
//! lives in the transaction log.

use std::fmt::Write as _;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{StoreError, StoreResult};
use medstore_core::{Money, TaxRate, TransactionRecord};

const SEPARATOR: &str = "----------------------------------------";

/// File-backed append-only receipt log.
#[derive(Debug, Clone)]
pub struct ReceiptLog {
    path: PathBuf,
}

impl ReceiptLog {
    /// Creates a log over the given path. The file need not exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ReceiptLog { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one receipt block for the given transaction.
    pub fn append(&self, record: &TransactionRecord, rate: TaxRate) -> StoreResult<()> {
        if let Some(dir) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| StoreError::io(dir, e))?;
        }

        let block = format_receipt(record, rate);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| StoreError::io(&self.path, e))?;
        file.write_all(block.as_bytes())
            .map_err(|e| StoreError::io(&self.path, e))?;
        file.flush().map_err(|e| StoreError::io(&self.path, e))?;

        debug!(id = record.id, "receipt appended");
        Ok(())
    }

    /// Reads the whole log as text. Missing file reads as empty history.
    pub fn read_all(&self) -> StoreResult<String> {
        if !self.path.exists() {
            return Ok(String::new());
        }
        fs::read_to_string(&self.path).map_err(|e| StoreError::io(&self.path, e))
    }
}

/// Renders one receipt block. Split out so the format is testable without
/// touching a file.
pub fn format_receipt(record: &TransactionRecord, rate: TaxRate) -> String {
    let mut out = String::new();

    writeln!(out, "Transaction #{}", record.id).ok();
    writeln!(
        out,
        "Purchase time: {}",
        record.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
    )
    .ok();
    match record.customer_name.as_deref() {
        Some(name) if !name.is_empty() => {
            writeln!(out, "Customer: {name}").ok();
        }
        _ => {
            writeln!(out, "Customer: (not provided)").ok();
        }
    }
    writeln!(out, "Items:").ok();
    for line in &record.lines {
        writeln!(
            out,
            " - {} | ID:{} | Qty:{} | Unit:{} | Line:{}",
            line.name,
            line.medicine_id,
            line.quantity,
            line.unit_price(),
            line.line_total()
        )
        .ok();
    }
    writeln!(out, "Subtotal: {}", Money::from_cents(record.subtotal_cents)).ok();
    writeln!(
        out,
        "VAT ({}%): {}",
        rate.percentage(),
        Money::from_cents(record.tax_cents)
    )
    .ok();
    writeln!(out, "Total: {}", Money::from_cents(record.total_cents)).ok();
    writeln!(out, "{SEPARATOR}").ok();

    out
}

// =============================================================================
// Unit Tests
// =============================================================================
