//! # Validation Module
//!
//! Argument checks run by [`Cart`](crate::cart::Cart) before it changes
//! anything.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Add Item Checks                                    │
//! │                                                                         │
//! │  LineItemDraft (untrusted, e.g. deserialized JSON)                     │
//! │  ├── product present?      require(..., "product")                     │
//! │  ├── unit_price present?   require(..., "unit_price")                  │
//! │  └── quantity > 0?         validate_quantity                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Cart::add_item (typed: absence is unrepresentable)                    │
//! │  ├── quantity > 0?         validate_quantity                           │
//! │  ├── merged qty fits?      merged_quantity                             │
//! │  └── cart still sums?      validate_cart_capacity                      │
//! │                                                                         │
//! │  Any failure → ValidationError, cart untouched                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Prices are deliberately not range-checked: pricing rules live outside
//! this crate.

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::LineItem;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Unwraps a required value or reports the named field as missing.
///
/// ## Example
/// ```rust
/// use cartkeeper_core::validation::require;
///
/// assert_eq!(require(Some(3), "quantity").unwrap(), 3);
/// assert!(require::<i64>(None, "quantity").is_err());
/// ```
pub fn require<T>(value: Option<T>, field: &str) -> ValidationResult<T> {
    value.ok_or_else(|| ValidationError::Required {
        field: field.to_string(),
    })
}

/// Validates a quantity value.
///
/// ## Rules
/// - Must be positive (> 0)
///
/// ## Example
/// ```rust
/// use cartkeeper_core::validation::validate_quantity;
///
/// assert!(validate_quantity(1).is_ok());
/// assert!(validate_quantity(0).is_err());
/// assert!(validate_quantity(-1).is_err());
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Sums an existing quantity with an added one.
///
/// Both inputs are already positive, so the only failure is overflow.
pub fn merged_quantity(existing: i64, added: i64) -> ValidationResult<i64> {
    existing
        .checked_add(added)
        .ok_or_else(|| ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: i64::MAX,
        })
}

/// Validates that a cart's line items can always be summed.
///
/// ## Rules
/// - Every line total (unit price × quantity) fits in a `Decimal`
/// - The sum of the absolute line totals fits in a `Decimal`
/// - The sum of the quantities fits in an `i64`
///
/// Bounding the absolute sum, not the signed one, keeps every subset of
/// the items summable too. Removing an entry can then never make
/// `Cart::total` overflow, even with negative prices in the cart.
pub fn validate_cart_capacity<'a, I>(items: I) -> ValidationResult<()>
where
    I: IntoIterator<Item = &'a LineItem>,
{
    let mut gross = Money::zero();
    let mut quantity: i64 = 0;

    for item in items {
        let line_total = item
            .unit_price()
            .checked_multiply_quantity(item.quantity())
            .ok_or_else(|| too_large("line total"))?;
        gross = gross
            .checked_add(line_total.abs())
            .ok_or_else(|| too_large("cart total"))?;
        quantity = quantity
            .checked_add(item.quantity())
            .ok_or_else(|| ValidationError::OutOfRange {
                field: "cart quantity".to_string(),
                min: 1,
                max: i64::MAX,
            })?;
    }

    Ok(())
}

fn too_large(field: &str) -> ValidationError {
    ValidationError::TooLarge {
        field: field.to_string(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Product;
    use rust_decimal_macros::dec;

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(i64::MAX).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(i64::MIN).is_err());
    }

    #[test]
    fn test_require_names_field() {
        let err = require::<String>(None, "product").unwrap_err();
        assert_eq!(
            err,
            ValidationError::Required {
                field: "product".to_string()
            }
        );
    }

    fn line(price: rust_decimal::Decimal, quantity: i64) -> LineItem {
        LineItem::new(Product::new(1, "item"), Money::new(price), quantity)
    }

    #[test]
    fn test_validate_cart_capacity() {
        assert!(validate_cart_capacity(&[line(dec!(7599.00), 2), line(dec!(-5.00), 1)]).is_ok());
        assert!(validate_cart_capacity(&[]).is_ok());
    }

    #[test]
    fn test_validate_cart_capacity_rejects_line_overflow() {
        let err = validate_cart_capacity(&[line(dec!(100000000000000000000), 1_000_000_000)])
            .unwrap_err();
        assert_eq!(err, too_large("line total"));
    }

    #[test]
    fn test_validate_cart_capacity_bounds_absolute_sum() {
        // Signed sum is 5e28, but dropping the middle entry would give 1e29
        let huge = dec!(50000000000000000000000000000);
        let err = validate_cart_capacity(&[line(huge, 1), line(-huge, 1), line(huge, 1)])
            .unwrap_err();
        assert_eq!(err, too_large("cart total"));
    }

    #[test]
    fn test_validate_cart_capacity_rejects_quantity_overflow() {
        let err = validate_cart_capacity(&[line(dec!(0), i64::MAX), line(dec!(0), 1)]).unwrap_err();
        assert!(matches!(err, ValidationError::OutOfRange { ref field, .. } if field == "cart quantity"));
    }

    #[test]
    fn test_merged_quantity() {
        assert_eq!(merged_quantity(2, 3).unwrap(), 5);
        assert!(matches!(
            merged_quantity(i64::MAX, 1),
            Err(ValidationError::OutOfRange { .. })
        ));
    }
}
