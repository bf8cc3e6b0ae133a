//! # Checkout Settlement
//!
//! The pure half of the checkout engine: validate a cart against a fresh
//! catalog snapshot and compute the decremented record set plus the sale
//! snapshots. The caller (the terminal app) owns the impure half - one
//! atomic catalog save, one transaction-log append, one receipt append.
//!
//! ## Checkout State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Checkout State Machine                               │
//! │                                                                         │
//! │   ┌──────┐  review   ┌───────────┐  confirm  ┌────────────┐            │
//! │   │ Open │──────────►│ Reviewing │──────────►│ Validating │            │
//! │   └──────┘           └───────────┘           └─────┬──────┘            │
//! │      ▲                 (display only,              │ settle()          │
//! │      │                  no mutation)       ┌───────┴────────┐          │
//! │      │                                     ▼                ▼          │
//! │      │                              ┌───────────┐    ┌───────────┐     │
//! │      └──────────────────────────────┤ Rejected  │    │ Committed │     │
//! │         cart left intact,           └───────────┘    └─────┬─────┘     │
//! │         user adjusts and retries                           │           │
//! │                                           save catalog + append logs + │
//! │                                           clear cart (caller's job)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Why Re-Validate?
//! Stock may have changed between add-to-cart and checkout (an admin update,
//! an earlier checkout in the same process). `settle` therefore takes the
//! records as loaded *now*, not the snapshots frozen in the cart. Prices,
//! by contrast, are honored from the cart snapshots - the customer pays what
//! was displayed when the line was added.

use crate::cart::Cart;
use crate::error::{CoreError, CoreResult};
use crate::types::{Medicine, SaleLine, TaxRate};

/// The computed outcome of a successful checkout validation.
///
/// Holds everything the caller needs to commit: the full record set with
/// stock decremented, the sale-line snapshots in cart order, and the totals.
/// Nothing has been persisted yet when this is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settlement {
    /// The complete catalog record set with every cart quantity subtracted,
    /// in storage order. Persisting this in a single save is the atomicity
    /// boundary - either all decrements land or none do.
    pub records: Vec<Medicine>,
    /// Line snapshots for the transaction record, in cart order.
    pub lines: Vec<SaleLine>,
    pub subtotal_cents: i64,
    pub tax_cents: i64,
    pub total_cents: i64,
}

/// Validates every cart line against the given catalog records and computes
/// the settlement.
///
/// ## Behavior
/// - The first cart line whose medicine is missing from `records` yields
///   `MedicineNotFound`; the first line whose current stock is short yields
///   `InsufficientStock` naming that medicine. On any error nothing is
///   mutated anywhere - the cart stays intact for the customer to adjust.
/// - On success the returned record set preserves storage order and differs
///   from the input only in the decremented quantities.
pub fn settle(records: &[Medicine], cart: &Cart, rate: TaxRate) -> CoreResult<Settlement> {
    let mut updated: Vec<Medicine> = records.to_vec();

    for line in &cart.lines {
        let medicine = updated
            .iter_mut()
            .find(|m| m.id == line.medicine_id)
            .ok_or(CoreError::MedicineNotFound(line.medicine_id))?;

        if medicine.quantity < line.quantity {
            return Err(CoreError::InsufficientStock {
                name: medicine.name.clone(),
                available: medicine.quantity,
                requested: line.quantity,
            });
        }
        medicine.quantity -= line.quantity;
    }

    let totals = cart.totals(rate);

    Ok(Settlement {
        records: updated,
        lines: cart.lines.iter().map(|l| l.to_sale_line()).collect(),
        subtotal_cents: totals.subtotal.cents(),
        tax_cents: totals.tax.cents(),
        total_cents: totals.total.cents(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
