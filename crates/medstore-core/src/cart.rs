//! # Shopping Cart
//!
//! The customer's in-progress, unpersisted selection of medicines.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Cart Operations                                    │
//! │                                                                         │
//! │  Customer Action           Cart Change                                  │
//! │  ───────────────           ───────────                                  │
//! │                                                                         │
//! │  Add medicine ───────────► merge into existing line, or push new line  │
//! │                                                                         │
//! │  Remove (partial) ───────► line.quantity -= n                          │
//! │                                                                         │
//! │  Remove (full / n ≥ qty) ► line dropped entirely                       │
//! │                                                                         │
//! │  Checkout success ───────► cart cleared                                 │
//! │                                                                         │
//! │  Leave customer panel ───► cart discarded                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cart lives only for one customer session; it is never persisted. The
//! process is single-threaded, so no locking wraps it - the menu loop owns
//! the cart exclusively.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{Medicine, SaleLine, TaxRate};
use crate::MAX_LINE_QUANTITY;

// =============================================================================
// Cart Line
// =============================================================================

/// One medicine in the cart.
///
/// ## Design Notes
/// - `medicine_id`: reference back to the catalog record
/// - `name` / `unit_price_cents`: frozen copies taken when the line was
///   created, so the cart displays consistent data even if an administrator
///   edits the record afterwards. Stock is re-validated at checkout against
///   a fresh catalog load, never against these snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Catalog id of the medicine.
    pub medicine_id: u64,

    /// Name at time of adding (frozen).
    pub name: String,

    /// Price in cents at time of adding (frozen).
    pub unit_price_cents: i64,

    /// Quantity in cart. Invariant: always > 0 while the line exists.
    pub quantity: i64,
}

impl CartLine {
    /// Creates a cart line from a catalog record and quantity.
    pub fn from_medicine(medicine: &Medicine, quantity: i64) -> Self {
        CartLine {
            medicine_id: medicine.id,
            name: medicine.name.clone(),
            unit_price_cents: medicine.price_cents,
            quantity,
        }
    }

    /// Line total (unit price × quantity).
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.unit_price_cents).multiply_quantity(self.quantity)
    }

    /// Converts the line into the snapshot stored on a transaction record.
    pub fn to_sale_line(&self) -> SaleLine {
        SaleLine {
            medicine_id: self.medicine_id,
            name: self.name.clone(),
            unit_price_cents: self.unit_price_cents,
            quantity: self.quantity,
        }
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - At most one line per `medicine_id` (adding again merges quantities)
/// - Every line has `quantity > 0` (a line reduced to 0 is removed)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    /// Lines in insertion order.
    pub lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Adds a medicine to the cart, merging with an existing line.
    ///
    /// ## Behavior
    /// - `quantity <= 0` is rejected as a validation error
    /// - `quantity > medicine.quantity` is an insufficient-stock error
    ///   (checked against the snapshot passed in; checkout re-validates
    ///   every line against a freshly loaded catalog)
    /// - if the medicine is already in the cart its quantity increases,
    ///   otherwise a new line with frozen name/price is appended
    pub fn add_line(&mut self, medicine: &Medicine, quantity: i64) -> CoreResult<()> {
        if quantity <= 0 {
            return Err(ValidationError::MustBePositive {
                field: "quantity".to_string(),
            }
            .into());
        }

        if quantity > medicine.quantity {
            return Err(CoreError::InsufficientStock {
                name: medicine.name.clone(),
                available: medicine.quantity,
                requested: quantity,
            });
        }

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|l| l.medicine_id == medicine.id)
        {
            let new_qty = line.quantity + quantity;
            if new_qty > MAX_LINE_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested: new_qty,
                    max: MAX_LINE_QUANTITY,
                });
            }
            line.quantity = new_qty;
            return Ok(());
        }

        self.lines.push(CartLine::from_medicine(medicine, quantity));
        Ok(())
    }

    /// Removes quantity from a cart line.
    ///
    /// ## Behavior
    /// - `remove_qty <= 0` or `remove_qty >= line.quantity`: the line is
    ///   removed entirely
    /// - otherwise the line's quantity is decremented
    /// - medicine not in cart: `NotInCart`
    pub fn remove(&mut self, medicine_id: u64, remove_qty: i64) -> CoreResult<()> {
        let index = self
            .lines
            .iter()
            .position(|l| l.medicine_id == medicine_id)
            .ok_or(CoreError::NotInCart(medicine_id))?;

        if remove_qty <= 0 || remove_qty >= self.lines[index].quantity {
            self.lines.remove(index);
        } else {
            self.lines[index].quantity -= remove_qty;
        }
        Ok(())
    }

    /// Looks up a cart line by medicine id.
    pub fn line(&self, medicine_id: u64) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.medicine_id == medicine_id)
    }

    /// Clears all lines (checkout success or panel exit).
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total quantity over all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Subtotal (sum of line totals, before tax).
    pub fn subtotal(&self) -> Money {
        self.lines
            .iter()
            .fold(Money::zero(), |acc, l| acc + l.line_total())
    }

    /// Computes subtotal, tax on the whole subtotal, and grand total.
    pub fn totals(&self, rate: TaxRate) -> CartTotals {
        let subtotal = self.subtotal();
        let tax = subtotal.calculate_tax(rate);
        CartTotals {
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }
}

/// Cart totals summary for review and receipt display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartTotals {
    pub subtotal: Money,
    pub tax: Money,
    pub total: Money,
}

// =============================================================================
// Unit Tests
// =============================================================================
