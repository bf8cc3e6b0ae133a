//! # Catalog Record Store
//!
//! Load, mutate, and atomically persist the full set of medicine records.
//!
//! ## Save Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Atomic Whole-File Replace                            │
//! │                                                                         │
//! │  save(catalog)                                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  1. serialize the full document to a temp file                          │
//! │     (same directory, so the rename below stays on one filesystem)       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  2. rename temp file over medicines.json                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  A reader sees either the old document or the new one - never a        │
//! │  truncated half-write. A failed save leaves the old file untouched.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Id Assignment
//! The document persists a `last_id` watermark next to the records.
//! `next_id = max(watermark, highest live id) + 1`, floored so the first id
//! is 1001. Deleting a record never lowers the watermark, so an id is never
//! reused - including the delete-the-maximum-then-add case that a plain
//! `max + 1` scan would get wrong - and assignment resumes correctly after
//! a restart because the watermark lives in the file, not in the process.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::FIRST_MEDICINE_ID;
use medstore_core::validation::{validate_new_medicine, validate_patch, validate_search_query};
use medstore_core::{Medicine, MedicinePatch, NewMedicine};

// =============================================================================
// Catalog Snapshot
// =============================================================================

/// An in-memory snapshot of the catalog document.
///
/// Loaded fresh at the start of each logical operation and discarded
/// afterwards - nothing caches a `Catalog` across operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    /// Highest id ever assigned (watermark). Never decreases.
    last_id: u64,
    /// Live records in storage order.
    pub records: Vec<Medicine>,
}

impl Catalog {
    /// An empty catalog, as used on first run when no file exists yet.
    pub fn empty() -> Self {
        Catalog {
            last_id: FIRST_MEDICINE_ID - 1,
            records: Vec::new(),
        }
    }

    /// Returns the id the next added record will receive.
    pub fn next_id(&self) -> u64 {
        let max_live = self.records.iter().map(|m| m.id).max().unwrap_or(0);
        self.last_id.max(max_live).max(FIRST_MEDICINE_ID - 1) + 1
    }

    /// Assigns an id to `new`, appends the record, and advances the
    /// watermark. Returns the stored record.
    pub fn add(&mut self, new: NewMedicine) -> Medicine {
        let id = self.next_id();
        let medicine = new.into_medicine(id);
        self.records.push(medicine.clone());
        self.last_id = id;
        medicine
    }

    /// Linear scan for an id. Ids are unique, so at most one match.
    pub fn find_by_id(&self, id: u64) -> Option<&Medicine> {
        self.records.iter().find(|m| m.id == id)
    }

    /// Case-insensitive substring match against names, storage order
    /// preserved. An empty result is not an error.
    pub fn search_by_name(&self, query: &str) -> Vec<&Medicine> {
        let needle = query.to_lowercase();
        self.records
            .iter()
            .filter(|m| m.name.to_lowercase().contains(&needle))
            .collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::empty()
    }
}

// =============================================================================
// Catalog Store
// =============================================================================

/// File-backed store for the catalog document.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    path: PathBuf,
}

impl CatalogStore {
    /// Creates a store over the given document path. The file need not
    /// exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CatalogStore { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the full catalog.
    ///
    /// A missing file yields an empty catalog (first run). An unreadable or
    /// unparsable file is an error; the caller reports it and the operation
    /// is abandoned without touching anything.
    pub fn load(&self) -> StoreResult<Catalog> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "catalog file absent, starting empty");
            return Ok(Catalog::empty());
        }

        let content =
            fs::read_to_string(&self.path).map_err(|e| StoreError::io(&self.path, e))?;
        let catalog: Catalog =
            serde_json::from_str(&content).map_err(|e| StoreError::corrupt(&self.path, e))?;

        debug!(
            path = %self.path.display(),
            records = catalog.records.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// Atomically replaces the document with exactly the given catalog.
    ///
    /// Writes the serialized document to a temp file in the same directory,
    /// then renames it over the target. A failed save leaves the previous
    /// file intact.
    pub fn save(&self, catalog: &Catalog) -> StoreResult<()> {
        // parent() yields Some("") for a bare relative file name
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(|e| StoreError::io(dir, e))?;

        let mut content = serde_json::to_string_pretty(catalog)
            .map_err(|e| StoreError::corrupt(&self.path, e))?;
        content.push('\n');

        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| StoreError::io(dir, e))?;
        tmp.write_all(content.as_bytes())
            .map_err(|e| StoreError::io(tmp.path().to_path_buf(), e))?;
        tmp.as_file()
            .sync_all()
            .map_err(|e| StoreError::io(tmp.path().to_path_buf(), e))?;
        tmp.persist(&self.path)
            .map_err(|e| StoreError::io(&self.path, e.error))?;

        debug!(
            path = %self.path.display(),
            records = catalog.records.len(),
            "catalog saved"
        );
        Ok(())
    }

    /// Validates and adds a new medicine; persists the grown catalog.
    pub fn add(&self, new: NewMedicine) -> StoreResult<Medicine> {
        validate_new_medicine(&new)?;

        let mut catalog = self.load()?;
        let medicine = catalog.add(new);
        self.save(&catalog)?;

        debug!(id = medicine.id, name = %medicine.name, "medicine added");
        Ok(medicine)
    }

    /// Lists all records in storage order.
    pub fn list(&self) -> StoreResult<Vec<Medicine>> {
        Ok(self.load()?.records)
    }

    /// Looks up one record by id.
    pub fn find_by_id(&self, id: u64) -> StoreResult<Option<Medicine>> {
        Ok(self.load()?.find_by_id(id).cloned())
    }

    /// Case-insensitive substring search against names.
    pub fn search_by_name(&self, query: &str) -> StoreResult<Vec<Medicine>> {
        let query = validate_search_query(query)?;
        let catalog = self.load()?;
        Ok(catalog
            .search_by_name(&query)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Records with stock below `threshold`, storage order preserved.
    pub fn low_stock(&self, threshold: i64) -> StoreResult<Vec<Medicine>> {
        let catalog = self.load()?;
        Ok(catalog
            .records
            .iter()
            .filter(|m| m.is_low_stock(threshold))
            .cloned()
            .collect())
    }

    /// Applies a partial update to the record with the given id, keeping its
    /// position, and persists. Fields the patch leaves unset are untouched.
    pub fn update(&self, id: u64, patch: &MedicinePatch) -> StoreResult<Medicine> {
        validate_patch(patch)?;

        let mut catalog = self.load()?;
        let medicine = catalog
            .records
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(StoreError::NotFound(id))?;

        patch.apply(medicine);
        let updated = medicine.clone();
        self.save(&catalog)?;

        debug!(id, "medicine updated");
        Ok(updated)
    }

    /// Removes the record with the given id, compacting the sequence while
    /// preserving the relative order of the remaining records, and persists.
    /// The id stays burned - it is never assigned again.
    pub fn delete(&self, id: u64) -> StoreResult<Medicine> {
        let mut catalog = self.load()?;
        let index = catalog
            .records
            .iter()
            .position(|m| m.id == id)
            .ok_or(StoreError::NotFound(id))?;

        let removed = catalog.records.remove(index);
        self.save(&catalog)?;

        debug!(id, name = %removed.name, "medicine deleted");
        Ok(removed)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn new_medicine(name: &str, price_cents: i64, quantity: i64) -> NewMedicine {
        NewMedicine {
            name: name.to_string(),
            category: "Tablet".to_string(),
            price_cents,
            quantity,
            expiry: NaiveDate::from_ymd_opt(2027, 1, 1).unwrap(),
        }
    }

    #[test]
    fn test_load_missing_file_is_empty_catalog() {
        let dir = tempdir().unwrap();
        let store = CatalogStore::new(dir.path().join("medicines.json"));

        let catalog = store.load().unwrap();
        assert!(catalog.records.is_empty());
        assert_eq!(catalog.next_id(), FIRST_MEDICINE_ID);
    }

    #[test]
    fn test_load_corrupt_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("medicines.json");
        fs::write(&path, "{ not json").unwrap();

        let store = CatalogStore::new(&path);
        assert!(matches!(store.load(), Err(StoreError::Corrupt { .. })));
    }

    #[test]
    fn test_add_assigns_sequential_ids_from_1001() {
        let dir = tempdir().unwrap();
        let store = CatalogStore::new(dir.path().join("medicines.json"));

        let a = store.add(new_medicine("Paracetamol", 1000, 10)).unwrap();
        let b = store.add(new_medicine("Ibuprofen", 450, 20)).unwrap();

        assert_eq!(a.id, 1001);
        assert_eq!(b.id, 1002);
    }

    #[test]
    fn test_delete_of_maximum_id_is_never_reused() {
        let dir = tempdir().unwrap();
        let store = CatalogStore::new(dir.path().join("medicines.json"));

        store.add(new_medicine("A", 100, 1)).unwrap(); // 1001
        let b = store.add(new_medicine("B", 100, 1)).unwrap(); // 1002

        store.delete(b.id).unwrap();
        let c = store.add(new_medicine("C", 100, 1)).unwrap();

        // A plain max+1 scan would hand 1002 out again; the watermark
        // keeps it burned.
        assert_eq!(c.id, 1003);
    }

    #[test]
    fn test_add_rejects_negative_price_and_quantity() {
        let dir = tempdir().unwrap();
        let store = CatalogStore::new(dir.path().join("medicines.json"));

        assert!(matches!(
            store.add(new_medicine("Bad", -1, 5)),
            Err(StoreError::Validation(_))
        ));
        assert!(matches!(
            store.add(new_medicine("Bad", 100, -5)),
            Err(StoreError::Validation(_))
        ));
        // Nothing was persisted
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_save_load_round_trip_is_byte_identical() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("medicines.json");
        let store = CatalogStore::new(&path);

        store.add(new_medicine("Paracetamol", 1000, 10)).unwrap();
        store.add(new_medicine("Ibuprofen", 450, 20)).unwrap();

        let before = fs::read(&path).unwrap();
        let catalog = store.load().unwrap();
        store.save(&catalog).unwrap();
        let after = fs::read(&path).unwrap();

        assert_eq!(before, after);
    }

    #[test]
    fn test_update_patches_in_place() {
        let dir = tempdir().unwrap();
        let store = CatalogStore::new(dir.path().join("medicines.json"));

        let a = store.add(new_medicine("A", 100, 1)).unwrap();
        let b = store.add(new_medicine("B", 200, 2)).unwrap();

        let patch = MedicinePatch {
            price_cents: Some(150),
            ..Default::default()
        };
        let updated = store.update(a.id, &patch).unwrap();
        assert_eq!(updated.price_cents, 150);
        assert_eq!(updated.quantity, 1);

        // Position preserved: A is still first
        let records = store.list().unwrap();
        assert_eq!(records[0].id, a.id);
        assert_eq!(records[1].id, b.id);
    }

    #[test]
    fn test_update_with_empty_patch_changes_nothing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("medicines.json");
        let store = CatalogStore::new(&path);

        let a = store.add(new_medicine("A", 100, 1)).unwrap();
        let before = fs::read(&path).unwrap();

        let updated = store.update(a.id, &MedicinePatch::default()).unwrap();
        assert_eq!(updated, a);
        assert_eq!(fs::read(&path).unwrap(), before);
    }

    #[test]
    fn test_update_and_delete_missing_id() {
        let dir = tempdir().unwrap();
        let store = CatalogStore::new(dir.path().join("medicines.json"));

        assert!(matches!(
            store.update(9999, &MedicinePatch::default()),
            Err(StoreError::NotFound(9999))
        ));
        assert!(matches!(
            store.delete(9999),
            Err(StoreError::NotFound(9999))
        ));
    }

    #[test]
    fn test_delete_compacts_preserving_order() {
        let dir = tempdir().unwrap();
        let store = CatalogStore::new(dir.path().join("medicines.json"));

        let a = store.add(new_medicine("A", 100, 1)).unwrap();
        let b = store.add(new_medicine("B", 200, 2)).unwrap();
        let c = store.add(new_medicine("C", 300, 3)).unwrap();

        store.delete(b.id).unwrap();

        let ids: Vec<u64> = store.list().unwrap().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![a.id, c.id]);
    }

    #[test]
    fn test_search_is_case_insensitive_and_order_preserving() {
        let dir = tempdir().unwrap();
        let store = CatalogStore::new(dir.path().join("medicines.json"));

        store.add(new_medicine("Paracetamol", 1000, 10)).unwrap();
        store.add(new_medicine("Ibuprofen", 450, 20)).unwrap();
        store.add(new_medicine("paracetamol500", 1200, 5)).unwrap();

        let hits = store.search_by_name("PARA").unwrap();
        let names: Vec<&str> = hits.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Paracetamol", "paracetamol500"]);

        assert!(store.search_by_name("zzz").unwrap().is_empty());
    }

    #[test]
    fn test_low_stock_filter() {
        let dir = tempdir().unwrap();
        let store = CatalogStore::new(dir.path().join("medicines.json"));

        store.add(new_medicine("Plenty", 100, 50)).unwrap();
        store.add(new_medicine("Scarce", 100, 3)).unwrap();
        store.add(new_medicine("Gone", 100, 0)).unwrap();

        let low = store.low_stock(10).unwrap();
        let names: Vec<&str> = low.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Scarce", "Gone"]);
    }
}
