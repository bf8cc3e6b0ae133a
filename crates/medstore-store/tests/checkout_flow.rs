//! End-to-end checkout flow over a real (temporary) data directory:
//! load → settle → atomic save → log append, plus the id-assignment and
//! search properties that only show up across several operations.

use chrono::{NaiveDate, Utc};
use tempfile::tempdir;

use medstore_core::{settle, Cart, MedicinePatch, NewMedicine, TaxRate};
use medstore_store::{CatalogStore, ReceiptLog, TransactionLog};
use medstore_core::TransactionRecord;

fn new_medicine(name: &str, price_cents: i64, quantity: i64) -> NewMedicine {
    NewMedicine {
        name: name.to_string(),
        category: "Tablet".to_string(),
        price_cents,
        quantity,
        expiry: NaiveDate::from_ymd_opt(2027, 6, 30).unwrap(),
    }
}

/// Runs the commit half of a checkout the way the terminal app does:
/// settle against a fresh load, save the decremented catalog atomically,
/// append to both logs.
fn commit_checkout(
    catalog_store: &CatalogStore,
    transactions: &TransactionLog,
    receipts: &ReceiptLog,
    cart: &mut Cart,
    customer_name: Option<String>,
    rate: TaxRate,
) -> Result<TransactionRecord, medstore_core::CoreError> {
    let catalog = catalog_store.load().unwrap();
    let settlement = settle(&catalog.records, cart, rate)?;

    let mut catalog = catalog;
    catalog.records = settlement.records;
    catalog_store.save(&catalog).unwrap();

    let record = TransactionRecord {
        id: transactions.next_id().unwrap(),
        timestamp: Utc::now(),
        customer_name,
        lines: settlement.lines,
        subtotal_cents: settlement.subtotal_cents,
        tax_cents: settlement.tax_cents,
        total_cents: settlement.total_cents,
    };
    transactions.append(&record).unwrap();
    receipts.append(&record, rate).unwrap();
    cart.clear();
    Ok(record)
}

#[test]
fn ids_are_strictly_increasing_across_interleaved_deletes() {
    let dir = tempdir().unwrap();
    let store = CatalogStore::new(dir.path().join("medicines.json"));

    let mut seen = Vec::new();
    let a = store.add(new_medicine("A", 100, 1)).unwrap();
    seen.push(a.id);
    let b = store.add(new_medicine("B", 100, 1)).unwrap();
    seen.push(b.id);

    store.delete(a.id).unwrap();
    let c = store.add(new_medicine("C", 100, 1)).unwrap();
    seen.push(c.id);

    store.delete(c.id).unwrap(); // delete the current maximum
    let d = store.add(new_medicine("D", 100, 1)).unwrap();
    seen.push(d.id);

    for pair in seen.windows(2) {
        assert!(pair[1] > pair[0], "ids must be strictly increasing: {seen:?}");
    }
    // No deleted id is ever handed out again
    assert!(!seen[2..].contains(&a.id));
    assert_ne!(d.id, c.id);
}

#[test]
fn search_is_case_insensitive_and_insertion_ordered() {
    let dir = tempdir().unwrap();
    let store = CatalogStore::new(dir.path().join("medicines.json"));

    store.add(new_medicine("Paracetamol", 1000, 10)).unwrap();
    store.add(new_medicine("paracetamol500", 1200, 5)).unwrap();

    let hits = store.search_by_name("PARA").unwrap();
    let names: Vec<&str> = hits.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["Paracetamol", "paracetamol500"]);
}

#[test]
fn checkout_success_decrements_stock_and_logs_one_transaction() {
    let dir = tempdir().unwrap();
    let store = CatalogStore::new(dir.path().join("medicines.json"));
    let transactions = TransactionLog::new(dir.path().join("transactions.jsonl"));
    let receipts = ReceiptLog::new(dir.path().join("sales_history.txt"));
    let rate = TaxRate::from_bps(500);

    let a = store.add(new_medicine("Medicine A", 1000, 10)).unwrap();
    let b = store.add(new_medicine("Medicine B", 500, 4)).unwrap();

    let mut cart = Cart::new();
    cart.add_line(&a, 2).unwrap();
    cart.add_line(&b, 1).unwrap();

    let record =
        commit_checkout(&store, &transactions, &receipts, &mut cart, None, rate).unwrap();

    // Totals: 2 × 10.00 + 1 × 5.00 = 25.00, VAT 1.25, total 26.25
    assert_eq!(record.subtotal_cents, 2500);
    assert_eq!(record.tax_cents, 125);
    assert_eq!(record.total_cents, 2625);
    assert_eq!(record.items_count(), 2);

    // Stock decremented on disk
    assert_eq!(store.find_by_id(a.id).unwrap().unwrap().quantity, 8);
    assert_eq!(store.find_by_id(b.id).unwrap().unwrap().quantity, 3);

    // Cart cleared, exactly one transaction logged, receipt block written
    assert!(cart.is_empty());
    let logged = transactions.list().unwrap();
    assert_eq!(logged.len(), 1);
    assert_eq!(logged[0], record);
    assert!(receipts.read_all().unwrap().contains("Total: $26.25"));
}

#[test]
fn checkout_rejects_when_stock_dropped_and_changes_nothing() {
    let dir = tempdir().unwrap();
    let store = CatalogStore::new(dir.path().join("medicines.json"));
    let transactions = TransactionLog::new(dir.path().join("transactions.jsonl"));
    let receipts = ReceiptLog::new(dir.path().join("sales_history.txt"));
    let rate = TaxRate::from_bps(500);

    let a = store.add(new_medicine("Medicine A", 1000, 5)).unwrap();

    let mut cart = Cart::new();
    cart.add_line(&a, 3).unwrap();

    // Stock drops below the cart quantity between add and checkout
    // (an admin update in the same session)
    store
        .update(
            a.id,
            &MedicinePatch {
                quantity: Some(2),
                ..Default::default()
            },
        )
        .unwrap();

    let err = commit_checkout(&store, &transactions, &receipts, &mut cart, None, rate)
        .unwrap_err();
    assert!(matches!(
        err,
        medstore_core::CoreError::InsufficientStock { .. }
    ));

    // Cart intact for the customer to adjust
    assert_eq!(cart.line(a.id).unwrap().quantity, 3);
    // Catalog quantity untouched by the failed checkout
    assert_eq!(store.find_by_id(a.id).unwrap().unwrap().quantity, 2);
    // No transaction was logged
    assert!(transactions.list().unwrap().is_empty());
    assert_eq!(receipts.read_all().unwrap(), "");
}

#[test]
fn transaction_ids_stay_monotonic_across_checkouts() {
    let dir = tempdir().unwrap();
    let store = CatalogStore::new(dir.path().join("medicines.json"));
    let transactions = TransactionLog::new(dir.path().join("transactions.jsonl"));
    let receipts = ReceiptLog::new(dir.path().join("sales_history.txt"));
    let rate = TaxRate::from_bps(500);

    let a = store.add(new_medicine("Medicine A", 1000, 10)).unwrap();

    let mut first_id = 0;
    for i in 0..3 {
        let current = store.find_by_id(a.id).unwrap().unwrap();
        let mut cart = Cart::new();
        cart.add_line(&current, 1).unwrap();
        let record = commit_checkout(
            &store,
            &transactions,
            &receipts,
            &mut cart,
            Some("Alice".to_string()),
            rate,
        )
        .unwrap();
        if i == 0 {
            first_id = record.id;
            assert_eq!(first_id, 5001);
        }
    }

    let ids: Vec<u64> = transactions.list().unwrap().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![5001, 5002, 5003]);
    assert_eq!(store.find_by_id(a.id).unwrap().unwrap().quantity, 7);
}

#[test]
fn update_keep_current_leaves_record_identical() {
    let dir = tempdir().unwrap();
    let store = CatalogStore::new(dir.path().join("medicines.json"));

    let a = store.add(new_medicine("Medicine A", 1000, 10)).unwrap();

    // All fields "keep current"
    let untouched = store.update(a.id, &MedicinePatch::default()).unwrap();
    assert_eq!(untouched, a);

    // Only the set field changes
    let patched = store
        .update(
            a.id,
            &MedicinePatch {
                name: Some("Medicine A Forte".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(patched.name, "Medicine A Forte");
    assert_eq!(patched.price_cents, a.price_cents);
    assert_eq!(patched.quantity, a.quantity);
    assert_eq!(patched.expiry, a.expiry);
}
