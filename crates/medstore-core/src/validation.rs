//! # Validation Module
//!
//! Business rule validation for catalog input.
//!
//! Validation runs before a record is persisted (add, update) and before a
//! quantity enters the cart. Bad values are rejected, never clamped, so the
//! same input always produces the same outcome.

use crate::error::ValidationError;
use crate::types::{MedicinePatch, NewMedicine};
use crate::MAX_LINE_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a medicine name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most 200 characters
pub fn validate_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a category label (e.g. "Tablet", "Syrup").
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most 50 characters
pub fn validate_category(category: &str) -> ValidationResult<()> {
    let category = category.trim();

    if category.is_empty() {
        return Err(ValidationError::Required {
            field: "category".to_string(),
        });
    }

    if category.len() > 50 {
        return Err(ValidationError::TooLong {
            field: "category".to_string(),
            max: 50,
        });
    }

    Ok(())
}

/// Validates a search query. Empty is allowed (matches everything).
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: 100,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a requested purchase quantity (cart add).
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed the per-line guard (999)
pub fn validate_purchase_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a stock quantity (catalog add/update). Zero is allowed
/// (out of stock); negative is not.
pub fn validate_stock_quantity(qty: i64) -> ValidationResult<()> {
    if qty < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a price in cents. Zero is allowed (free sample); negative
/// is not.
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Record Validators
// =============================================================================

/// Validates a complete new medicine before it is assigned an id.
pub fn validate_new_medicine(medicine: &NewMedicine) -> ValidationResult<()> {
    validate_name(&medicine.name)?;
    validate_category(&medicine.category)?;
    validate_price_cents(medicine.price_cents)?;
    validate_stock_quantity(medicine.quantity)?;
    Ok(())
}

/// Validates the fields a patch actually sets; absent fields are skipped.
pub fn validate_patch(patch: &MedicinePatch) -> ValidationResult<()> {
    if let Some(name) = &patch.name {
        validate_name(name)?;
    }
    if let Some(category) = &patch.category {
        validate_category(category)?;
    }
    if let Some(price_cents) = patch.price_cents {
        validate_price_cents(price_cents)?;
    }
    if let Some(quantity) = patch.quantity {
        validate_stock_quantity(quantity)?;
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Paracetamol 500mg").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_category() {
        assert!(validate_category("Tablet").is_ok());
        assert!(validate_category("").is_err());
        assert!(validate_category(&"A".repeat(60)).is_err());
    }

    #[test]
    fn test_validate_purchase_quantity() {
        assert!(validate_purchase_quantity(1).is_ok());
        assert!(validate_purchase_quantity(999).is_ok());

        assert!(validate_purchase_quantity(0).is_err());
        assert!(validate_purchase_quantity(-1).is_err());
        assert!(validate_purchase_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_stock_quantity_allows_zero() {
        assert!(validate_stock_quantity(0).is_ok());
        assert!(validate_stock_quantity(50).is_ok());
        assert!(validate_stock_quantity(-1).is_err());
    }

    #[test]
    fn test_validate_price_cents() {
        assert!(validate_price_cents(0).is_ok());
        assert!(validate_price_cents(1099).is_ok());
        assert!(validate_price_cents(-100).is_err());
    }

    #[test]
    fn test_validate_new_medicine_rejects_negative_fields() {
        let good = NewMedicine {
            name: "Ibuprofen".to_string(),
            category: "Tablet".to_string(),
            price_cents: 450,
            quantity: 20,
            expiry: NaiveDate::from_ymd_opt(2027, 3, 1).unwrap(),
        };
        assert!(validate_new_medicine(&good).is_ok());

        let bad_price = NewMedicine {
            price_cents: -1,
            ..good.clone()
        };
        assert!(validate_new_medicine(&bad_price).is_err());

        let bad_qty = NewMedicine {
            quantity: -5,
            ..good
        };
        assert!(validate_new_medicine(&bad_qty).is_err());
    }

    #[test]
    fn test_validate_patch_skips_absent_fields() {
        assert!(validate_patch(&MedicinePatch::default()).is_ok());

        let bad = MedicinePatch {
            price_cents: Some(-10),
            ..Default::default()
        };
        assert!(validate_patch(&bad).is_err());
    }
}
