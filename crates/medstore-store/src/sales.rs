//! # Transaction Log
//!
//! Append-only structured log of completed sales.
//!
//! ## Log Shape
//! One JSON-encoded [`TransactionRecord`] per line (JSON Lines). A record is
//! appended exactly once, by a successful checkout, and is never edited or
//! deleted afterwards. Reading tolerates a missing file - no sales yet is a
//! normal state, not an error.
//!
//! ## Id Assignment
//! Transaction ids are monotonic starting at 5001 and derive from the log
//! itself: `max(logged ids) + 1`. Because the log is append-only this is
//! restart-safe without any process-lifetime counter.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::FIRST_TRANSACTION_ID;
use medstore_core::TransactionRecord;

/// File-backed append-only transaction log.
#[derive(Debug, Clone)]
pub struct TransactionLog {
    path: PathBuf,
}

impl TransactionLog {
    /// Creates a log over the given path. The file need not exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        TransactionLog { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the id the next appended transaction should carry.
    pub fn next_id(&self) -> StoreResult<u64> {
        let max = self.list()?.iter().map(|t| t.id).max();
        Ok(match max {
            Some(id) => id.max(FIRST_TRANSACTION_ID - 1) + 1,
            None => FIRST_TRANSACTION_ID,
        })
    }

    /// Appends one record to the log.
    pub fn append(&self, record: &TransactionRecord) -> StoreResult<()> {
        if let Some(dir) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| StoreError::io(dir, e))?;
        }

        let line = serde_json::to_string(record)
            .map_err(|e| StoreError::corrupt(&self.path, e))?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| StoreError::io(&self.path, e))?;
        writeln!(file, "{line}").map_err(|e| StoreError::io(&self.path, e))?;
        file.flush().map_err(|e| StoreError::io(&self.path, e))?;

        debug!(
            id = record.id,
            total_cents = record.total_cents,
            lines = record.lines.len(),
            "transaction appended"
        );
        Ok(())
    }

    /// Reads every logged transaction, oldest first.
    pub fn list(&self) -> StoreResult<Vec<TransactionRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content =
            fs::read_to_string(&self.path).map_err(|e| StoreError::io(&self.path, e))?;

        let mut records = Vec::new();
        for line in content.lines() {
            if line.trim().is_empty() {
                continue;
            }
            let record: TransactionRecord =
                serde_json::from_str(line).map_err(|e| StoreError::corrupt(&self.path, e))?;
            records.push(record);
        }
        Ok(records)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use medstore_core::SaleLine;
    use tempfile::tempdir;

    fn record(id: u64, total_cents: i64) -> TransactionRecord {
        TransactionRecord {
            id,
            timestamp: Utc.with_ymd_and_hms(2026, 8, 7, 12, 0, 0).unwrap(),
            customer_name: None,
            lines: vec![SaleLine {
                medicine_id: 1001,
                name: "Paracetamol".to_string(),
                unit_price_cents: total_cents,
                quantity: 1,
            }],
            subtotal_cents: total_cents,
            tax_cents: 0,
            total_cents,
        }
    }

    #[test]
    fn test_missing_log_is_empty() {
        let dir = tempdir().unwrap();
        let log = TransactionLog::new(dir.path().join("transactions.jsonl"));

        assert!(log.list().unwrap().is_empty());
        assert_eq!(log.next_id().unwrap(), FIRST_TRANSACTION_ID);
    }

    #[test]
    fn test_append_and_list_in_order() {
        let dir = tempdir().unwrap();
        let log = TransactionLog::new(dir.path().join("transactions.jsonl"));

        log.append(&record(5001, 1000)).unwrap();
        log.append(&record(5002, 2500)).unwrap();

        let records = log.list().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, 5001);
        assert_eq!(records[1].id, 5002);
        assert_eq!(records[1].total_cents, 2500);
    }

    #[test]
    fn test_next_id_is_monotonic() {
        let dir = tempdir().unwrap();
        let log = TransactionLog::new(dir.path().join("transactions.jsonl"));

        assert_eq!(log.next_id().unwrap(), 5001);
        log.append(&record(5001, 1000)).unwrap();
        assert_eq!(log.next_id().unwrap(), 5002);
        log.append(&record(5002, 1000)).unwrap();
        assert_eq!(log.next_id().unwrap(), 5003);
    }

    #[test]
    fn test_append_never_rewrites_earlier_records() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("transactions.jsonl");
        let log = TransactionLog::new(&path);

        log.append(&record(5001, 1000)).unwrap();
        let first = fs::read_to_string(&path).unwrap();

        log.append(&record(5002, 2000)).unwrap();
        let both = fs::read_to_string(&path).unwrap();

        assert!(both.starts_with(&first));
    }

    #[test]
    fn test_corrupt_line_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("transactions.jsonl");
        fs::write(&path, "not json\n").unwrap();

        let log = TransactionLog::new(&path);
        assert!(matches!(log.list(), Err(StoreError::Corrupt { .. })));
    }
}
