//! # Domain Types
//!
//! Core domain types for the medical store.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌───────────────────┐     │
//! │  │    Medicine     │   │ TransactionRec. │   │     SaleLine      │     │
//! │  │  ─────────────  │   │  ─────────────  │   │  ───────────────  │     │
//! │  │  id (u64)       │   │  id (u64)       │   │  medicine_id      │     │
//! │  │  name           │   │  timestamp      │   │  name (frozen)    │     │
//! │  │  category       │   │  customer_name  │   │  unit_price (fr.) │     │
//! │  │  price_cents    │   │  lines          │   │  quantity         │     │
//! │  │  quantity       │   │  totals         │   └───────────────────┘     │
//! │  │  expiry         │   └─────────────────┘                             │
//! │  └─────────────────┘                                                   │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │    TaxRate      │   │  MedicinePatch  │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  bps (u32)      │   │  Option per     │                             │
//! │  │  500 = 5%       │   │  field - no     │                             │
//! │  └─────────────────┘   │  sentinels      │                             │
//! │                        └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! Cart lines and sale lines freeze the medicine's name and unit price at
//! the moment they are created. A later price change in the catalog never
//! rewrites an old receipt.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 500 bps = 5% (the shop's VAT rate)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate(crate::DEFAULT_TAX_RATE_BPS)
    }
}

// =============================================================================
// Medicine
// =============================================================================

/// A medicine record in the catalog.
///
/// ## Identity
/// `id` is assigned by the record store (monotonic, starting at 1001) and is
/// never reused, even after the record is deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medicine {
    /// Unique identifier, assigned by the store.
    pub id: u64,

    /// Display name shown in tables and on receipts.
    pub name: String,

    /// Category (e.g. "Tablet", "Syrup", "Injection").
    pub category: String,

    /// Unit price in cents.
    pub price_cents: i64,

    /// Stock on hand. Invariant: never negative.
    pub quantity: i64,

    /// Expiry date.
    pub expiry: NaiveDate,
}

impl Medicine {
    /// Returns the unit price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Checks whether the given quantity can currently be sold.
    pub fn can_sell(&self, quantity: i64) -> bool {
        quantity > 0 && self.quantity >= quantity
    }

    /// True when stock is below the low-stock threshold.
    #[inline]
    pub fn is_low_stock(&self, threshold: i64) -> bool {
        self.quantity < threshold
    }
}

/// A medicine as entered by the administrator, before the store assigns
/// its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMedicine {
    pub name: String,
    pub category: String,
    pub price_cents: i64,
    pub quantity: i64,
    pub expiry: NaiveDate,
}

impl NewMedicine {
    /// Builds the catalog record once the store has assigned an id.
    pub fn into_medicine(self, id: u64) -> Medicine {
        Medicine {
            id,
            name: self.name,
            category: self.category,
            price_cents: self.price_cents,
            quantity: self.quantity,
            expiry: self.expiry,
        }
    }
}

// =============================================================================
// Medicine Patch
// =============================================================================

/// A partial update to a medicine record.
///
/// ## Why Option Per Field?
/// The console update flow lets the administrator keep any field by leaving
/// the prompt blank. Encoding "keep" as `None` makes that unambiguous: a
/// legitimate new value of zero (free sample, zero stock) is `Some(0)`,
/// which no sentinel scheme can distinguish.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MedicinePatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price_cents: Option<i64>,
    pub quantity: Option<i64>,
    pub expiry: Option<NaiveDate>,
}

impl MedicinePatch {
    /// True when no field is set; applying such a patch is a no-op.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.price_cents.is_none()
            && self.quantity.is_none()
            && self.expiry.is_none()
    }

    /// Applies the set fields to `medicine`, leaving unset fields untouched.
    pub fn apply(&self, medicine: &mut Medicine) {
        if let Some(name) = &self.name {
            medicine.name = name.clone();
        }
        if let Some(category) = &self.category {
            medicine.category = category.clone();
        }
        if let Some(price_cents) = self.price_cents {
            medicine.price_cents = price_cents;
        }
        if let Some(quantity) = self.quantity {
            medicine.quantity = quantity;
        }
        if let Some(expiry) = self.expiry {
            medicine.expiry = expiry;
        }
    }
}

// =============================================================================
// Sale Line
// =============================================================================

/// A line item in a completed transaction.
/// Uses the snapshot pattern to freeze medicine data at time of sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleLine {
    /// Catalog id of the medicine sold.
    pub medicine_id: u64,
    /// Name at time of sale (frozen).
    pub name: String,
    /// Unit price in cents at time of sale (frozen).
    pub unit_price_cents: i64,
    /// Quantity sold.
    pub quantity: i64,
}

impl SaleLine {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Line total (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Transaction Record
// =============================================================================

/// A completed sale, as appended to the transaction log.
///
/// Created once by a successful checkout; immutable thereafter. The log is
/// append-only - records are never edited or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Unique transaction id, monotonic, starting at 5001.
    pub id: u64,
    /// When the checkout committed.
    pub timestamp: DateTime<Utc>,
    /// Customer name, if one was given at checkout.
    pub customer_name: Option<String>,
    /// Line snapshots taken at sale time, in cart order.
    pub lines: Vec<SaleLine>,
    /// Sum of line totals.
    pub subtotal_cents: i64,
    /// VAT on the subtotal.
    pub tax_cents: i64,
    /// Subtotal plus tax.
    pub total_cents: i64,
}

impl TransactionRecord {
    /// Number of distinct lines in the transaction.
    #[inline]
    pub fn items_count(&self) -> usize {
        self.lines.len()
    }

    /// Total quantity over all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Grand total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_medicine() -> Medicine {
        Medicine {
            id: 1001,
            name: "Paracetamol 500mg".to_string(),
            category: "Tablet".to_string(),
            price_cents: 1000,
            quantity: 8,
            expiry: NaiveDate::from_ymd_opt(2027, 6, 30).unwrap(),
        }
    }

    #[test]
    fn test_tax_rate_from_bps() {
        let rate = TaxRate::from_bps(500);
        assert_eq!(rate.bps(), 500);
        assert!((rate.percentage() - 5.0).abs() < 0.001);
    }

    #[test]
    fn test_tax_rate_default_is_shop_vat() {
        assert_eq!(TaxRate::default().bps(), crate::DEFAULT_TAX_RATE_BPS);
    }

    #[test]
    fn test_can_sell() {
        let medicine = sample_medicine();
        assert!(medicine.can_sell(1));
        assert!(medicine.can_sell(8));
        assert!(!medicine.can_sell(9));
        assert!(!medicine.can_sell(0));
        assert!(!medicine.can_sell(-1));
    }

    #[test]
    fn test_low_stock() {
        let medicine = sample_medicine();
        assert!(medicine.is_low_stock(10));
        assert!(!medicine.is_low_stock(8));
    }

    #[test]
    fn test_patch_apply_sets_only_present_fields() {
        let mut medicine = sample_medicine();
        let before = medicine.clone();

        let patch = MedicinePatch {
            price_cents: Some(1250),
            quantity: Some(0),
            ..Default::default()
        };
        patch.apply(&mut medicine);

        assert_eq!(medicine.price_cents, 1250);
        assert_eq!(medicine.quantity, 0); // Some(0) is a real value, not "keep"
        assert_eq!(medicine.name, before.name);
        assert_eq!(medicine.category, before.category);
        assert_eq!(medicine.expiry, before.expiry);
    }

    #[test]
    fn test_empty_patch_is_noop() {
        let mut medicine = sample_medicine();
        let before = medicine.clone();

        let patch = MedicinePatch::default();
        assert!(patch.is_empty());
        patch.apply(&mut medicine);

        assert_eq!(medicine, before);
    }

    #[test]
    fn test_sale_line_total() {
        let line = SaleLine {
            medicine_id: 1001,
            name: "Paracetamol 500mg".to_string(),
            unit_price_cents: 1000,
            quantity: 2,
        };
        assert_eq!(line.line_total().cents(), 2000);
    }
}
