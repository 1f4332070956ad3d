//! # Cart
//!
//! A single customer's shopping cart.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Caller Action              Cart Method            State Change         │
//! │  ─────────────              ───────────            ────────────         │
//! │                                                                         │
//! │  Add product ─────────────► add_item() ──────────► merge or push        │
//! │                                                                         │
//! │  Add from untrusted input ► add(draft) ──────────► validate, add_item   │
//! │                                                                         │
//! │  Remove product ──────────► remove_item() ───────► retain != product    │
//! │                                                                         │
//! │  Remove by position ──────► remove_item_at() ────► items.remove(i)      │
//! │                                                                         │
//! │  View cart ───────────────► items() / total() ───► (read only)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ordering
//! Items are kept in insertion order. Position 0 is the oldest entry that
//! is still in the cart, and a merge never moves an entry.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::MergePolicy;
use crate::error::CoreResult;
use crate::money::Money;
use crate::types::{LineItem, Product};
use crate::validation::{merged_quantity, require, validate_cart_capacity, validate_quantity};

/// An add request that has not been validated yet.
///
/// This is the shape an add takes when it comes from outside Rust's type
/// system (JSON, a form, a message), so product and price may be missing.
///
/// ```rust
/// use cartkeeper_core::cart::{Cart, LineItemDraft};
///
/// let draft: LineItemDraft =
///     serde_json::from_str(r#"{ "unit_price": "10.00", "quantity": 1 }"#).unwrap();
///
/// let mut cart = Cart::new();
/// assert!(cart.add(draft).is_err()); // no product
/// assert!(cart.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItemDraft {
    #[serde(default)]
    pub product: Option<Product>,
    #[serde(default)]
    pub unit_price: Option<Money>,
    pub quantity: i64,
}

/// The shopping cart.
///
/// ## Invariants
/// - Every entry has quantity > 0
/// - A rejected add leaves the cart exactly as it was
/// - Under [`MergePolicy::ByProduct`] there is at most one entry per product
///
/// Serializable as a snapshot; there is no way to deserialize a cart, so
/// every cart in memory was built through its own operations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Cart {
    items: Vec<LineItem>,
    merge_policy: MergePolicy,
}

impl Cart {
    /// Creates a new empty cart with the default merge policy.
    pub fn new() -> Self {
        Self::with_merge_policy(MergePolicy::default())
    }

    /// Creates a new empty cart with the given merge policy.
    pub fn with_merge_policy(merge_policy: MergePolicy) -> Self {
        Cart {
            items: Vec::new(),
            merge_policy,
        }
    }

    pub fn merge_policy(&self) -> MergePolicy {
        self.merge_policy
    }

    /// Adds a product to the cart or merges it into an existing entry.
    ///
    /// ## Behavior
    /// Which entry absorbs the add is decided by the cart's
    /// [`MergePolicy`]. When an entry absorbs it, the quantities are summed
    /// and the entry takes the new unit price if it differs. When none does,
    /// the new item is appended.
    ///
    /// ## Returns
    /// - `Ok(())` on success
    /// - `Err(CoreError::InvalidArgument)` if quantity <= 0, the merged
    ///   quantity overflows, or the cart's totals would no longer fit in a
    ///   `Decimal` (see [`validate_cart_capacity`])
    pub fn add_item(&mut self, product: &Product, unit_price: Money, quantity: i64) -> CoreResult<()> {
        if let Err(err) = validate_quantity(quantity) {
            warn!(product_id = product.id(), quantity, "Rejected add");
            return Err(err.into());
        }

        let candidate = LineItem::new(product.clone(), unit_price, quantity);

        let existing = match self.merge_policy {
            MergePolicy::ExactMatch => self.items.iter().position(|item| *item == candidate),
            MergePolicy::ByProduct => self.items.iter().position(|item| item.product() == product),
        };

        let updated = match existing {
            Some(index) => {
                let mut item = self.items[index].clone();
                item.set_quantity(merged_quantity(item.quantity(), quantity)?);
                if item.unit_price() != unit_price {
                    item.set_unit_price(unit_price);
                }
                item
            }
            None => candidate,
        };

        let after_add = self
            .items
            .iter()
            .enumerate()
            .filter(|(index, _)| Some(*index) != existing)
            .map(|(_, item)| item)
            .chain(std::iter::once(&updated));
        if let Err(err) = validate_cart_capacity(after_add) {
            warn!(product_id = product.id(), quantity, unit_price = %unit_price, error = %err, "Rejected add");
            return Err(err.into());
        }

        match existing {
            Some(index) => {
                debug!(
                    product_id = product.id(),
                    quantity = updated.quantity(),
                    unit_price = %unit_price,
                    "Merged into existing line item"
                );
                self.items[index] = updated;
            }
            None => {
                debug!(
                    product_id = product.id(),
                    quantity,
                    unit_price = %unit_price,
                    "Adding line item"
                );
                self.items.push(updated);
            }
        }

        Ok(())
    }

    /// Validates a draft and adds it.
    ///
    /// Fails with `CoreError::InvalidArgument` naming the first missing or
    /// invalid field: product, then unit price, then quantity.
    pub fn add(&mut self, draft: LineItemDraft) -> CoreResult<()> {
        let checked = require(draft.product, "product").and_then(|product| {
            let unit_price = require(draft.unit_price, "unit_price")?;
            validate_quantity(draft.quantity)?;
            Ok((product, unit_price))
        });

        match checked {
            Ok((product, unit_price)) => self.add_item(&product, unit_price, draft.quantity),
            Err(err) => {
                warn!(error = %err, "Rejected add");
                Err(err.into())
            }
        }
    }

    /// Removes every entry for the product.
    ///
    /// Returns `true` if at least one entry was removed.
    pub fn remove_item(&mut self, product: &Product) -> bool {
        let initial_len = self.items.len();
        self.items.retain(|item| item.product() != product);

        let removed = initial_len - self.items.len();
        if removed > 0 {
            debug!(product_id = product.id(), removed, "Removed product from cart");
        }
        removed > 0
    }

    /// Removes the entry at a zero-based position in insertion order.
    ///
    /// Returns `false` when `position` is negative or past the end.
    pub fn remove_item_at(&mut self, position: isize) -> bool {
        match usize::try_from(position) {
            Ok(index) if index < self.items.len() => {
                let item = self.items.remove(index);
                debug!(position = index, product_id = item.product().id(), "Removed line item");
                true
            }
            _ => false,
        }
    }

    /// Sum of every line total, exact. Zero for an empty cart.
    ///
    /// Cannot overflow: `add_item` keeps the absolute line totals of the
    /// cart, and so every subset of them, within the `Decimal` range.
    pub fn total(&self) -> Money {
        self.items.iter().map(LineItem::total).sum()
    }

    /// Returns a copy of the current line items.
    pub fn items(&self) -> Vec<LineItem> {
        self.items.clone()
    }

    /// Iterates the line items in insertion order without copying.
    pub fn iter(&self) -> impl Iterator<Item = &LineItem> + '_ {
        self.items.iter()
    }

    /// Returns the number of line items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the total quantity of all items.
    ///
    /// Fits in an `i64`; `add_item` rejects any add that would not.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(LineItem::quantity).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CoreError, ValidationError};
    use rust_decimal_macros::dec;

    fn phone() -> Product {
        Product::new(1, "iphone 14 pro max")
    }

    fn tv() -> Product {
        Product::new(2, "Smart TV LG Nanocell 55' 4K")
    }

    fn price(amount: rust_decimal::Decimal) -> Money {
        Money::new(amount)
    }

    #[test]
    fn test_cart_add_item() {
        let mut cart = Cart::new();

        cart.add_item(&phone(), price(dec!(7599.00)), 2).unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total_quantity(), 2);
        assert_eq!(cart.total(), price(dec!(15198.00)));
    }

    #[test]
    fn test_empty_cart_total_is_zero() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert!(cart.total().is_zero());
    }

    #[test]
    fn test_total_is_exact() {
        let mut cart = Cart::new();
        cart.add_item(&phone(), price(dec!(0.1)), 1).unwrap();
        cart.add_item(&tv(), price(dec!(0.2)), 1).unwrap();

        assert_eq!(cart.total(), price(dec!(0.3)));
    }

    #[test]
    fn test_add_rejects_non_positive_quantity() {
        let mut cart = Cart::new();
        cart.add_item(&phone(), price(dec!(1.00)), 1).unwrap();
        let before = cart.clone();

        for qty in [0, -1, i64::MIN] {
            let err = cart.add_item(&tv(), price(dec!(1.00)), qty).unwrap_err();
            assert_eq!(
                err,
                CoreError::InvalidArgument(ValidationError::MustBePositive {
                    field: "quantity".to_string()
                })
            );
        }
        assert_eq!(cart, before);
    }

    #[test]
    fn test_add_draft_requires_product_and_price() {
        let mut cart = Cart::new();

        let no_product = LineItemDraft {
            product: None,
            unit_price: Some(price(dec!(1.00))),
            quantity: 1,
        };
        let err = cart.add(no_product).unwrap_err();
        assert_eq!(err.to_string(), "Invalid argument: product is required");

        let no_price = LineItemDraft {
            product: Some(phone()),
            unit_price: None,
            quantity: 1,
        };
        let err = cart.add(no_price).unwrap_err();
        assert_eq!(err.to_string(), "Invalid argument: unit_price is required");

        let bad_qty = LineItemDraft {
            product: Some(phone()),
            unit_price: Some(price(dec!(1.00))),
            quantity: 0,
        };
        assert!(cart.add(bad_qty).is_err());

        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_draft_from_json() {
        let mut cart = Cart::new();
        let draft: LineItemDraft = serde_json::from_str(
            r#"{ "product": { "id": 2, "description": "tv" }, "unit_price": "2564.05", "quantity": 3 }"#,
        )
        .unwrap();

        cart.add(draft).unwrap();

        assert_eq!(cart.total(), price(dec!(7692.15)));
    }

    #[test]
    fn test_exact_match_merges_identical_add() {
        let mut cart = Cart::new();

        cart.add_item(&phone(), price(dec!(10.00)), 2).unwrap();
        cart.add_item(&phone(), price(dec!(10.00)), 2).unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity(), 4);
    }

    #[test]
    fn test_exact_match_keeps_same_product_with_other_quantity_apart() {
        let mut cart = Cart::new();

        cart.add_item(&phone(), price(dec!(10.00)), 2).unwrap();
        cart.add_item(&phone(), price(dec!(10.00)), 3).unwrap();
        cart.add_item(&phone(), price(dec!(12.00)), 2).unwrap();

        let items = cart.items();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].quantity(), 2);
        assert_eq!(items[1].quantity(), 3);
        assert_eq!(items[2].unit_price(), price(dec!(12.00)));
        assert_eq!(cart.total(), price(dec!(74.00)));
    }

    #[test]
    fn test_by_product_sums_quantity_and_takes_new_price() {
        let mut cart = Cart::with_merge_policy(MergePolicy::ByProduct);

        cart.add_item(&phone(), price(dec!(10.00)), 2).unwrap();
        cart.add_item(&tv(), price(dec!(5.00)), 1).unwrap();
        cart.add_item(&phone(), price(dec!(12.00)), 3).unwrap();

        let items = cart.items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].product(), &phone());
        assert_eq!(items[0].quantity(), 5);
        assert_eq!(items[0].unit_price(), price(dec!(12.00)));
        assert_eq!(cart.total(), price(dec!(65.00)));
    }

    #[test]
    fn test_merge_overflow_leaves_cart_unchanged() {
        let mut cart = Cart::with_merge_policy(MergePolicy::ByProduct);
        cart.add_item(&phone(), price(dec!(1)), i64::MAX).unwrap();
        let before = cart.clone();

        let err = cart.add_item(&phone(), price(dec!(2)), 1).unwrap_err();

        assert!(matches!(
            err,
            CoreError::InvalidArgument(ValidationError::OutOfRange { .. })
        ));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_add_rejects_line_total_overflow() {
        let mut cart = Cart::new();
        cart.add_item(&tv(), price(dec!(5.00)), 1).unwrap();
        let before = cart.clone();

        let err = cart
            .add_item(&phone(), price(dec!(100000000000000000000)), 1_000_000_000)
            .unwrap_err();

        assert!(matches!(
            err,
            CoreError::InvalidArgument(ValidationError::TooLarge { .. })
        ));
        assert_eq!(cart, before);
        assert_eq!(cart.total(), price(dec!(5.00)));
    }

    #[test]
    fn test_add_rejects_cart_total_overflow() {
        let huge = dec!(50000000000000000000000000000);
        let mut cart = Cart::new();
        cart.add_item(&phone(), price(huge), 1).unwrap();
        cart.add_item(&tv(), price(-huge), 1).unwrap();

        // Accepting this would let remove_item(&tv()) leave 1e29 behind
        let err = cart.add_item(&Product::new(3, "radio"), price(huge), 1).unwrap_err();

        assert!(matches!(
            err,
            CoreError::InvalidArgument(ValidationError::TooLarge { .. })
        ));
        assert_eq!(cart.len(), 2);
        assert!(cart.remove_item(&tv()));
        assert_eq!(cart.total(), price(huge));
    }

    #[test]
    fn test_add_rejects_merge_that_overflows_line_total() {
        let mut cart = Cart::with_merge_policy(MergePolicy::ByProduct);
        cart.add_item(&phone(), price(dec!(1)), 1).unwrap();
        let before = cart.clone();

        let err = cart
            .add_item(&phone(), price(dec!(50000000000000000000000000000)), 1)
            .unwrap_err();

        assert!(matches!(
            err,
            CoreError::InvalidArgument(ValidationError::TooLarge { .. })
        ));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_add_rejects_total_quantity_overflow() {
        let mut cart = Cart::new();
        cart.add_item(&phone(), price(dec!(0.01)), i64::MAX - 1).unwrap();

        // Different quantity, so a second ExactMatch entry
        let err = cart.add_item(&phone(), price(dec!(0.01)), 2).unwrap_err();

        assert!(matches!(
            err,
            CoreError::InvalidArgument(ValidationError::OutOfRange { .. })
        ));
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total_quantity(), i64::MAX - 1);
    }

    #[test]
    fn test_remove_item_by_product() {
        let mut cart = Cart::new();
        cart.add_item(&phone(), price(dec!(10.00)), 1).unwrap();
        cart.add_item(&phone(), price(dec!(10.00)), 2).unwrap();
        cart.add_item(&tv(), price(dec!(5.00)), 1).unwrap();

        assert!(cart.remove_item(&phone()));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].product(), &tv());
    }

    #[test]
    fn test_remove_missing_product_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(&tv(), price(dec!(5.00)), 1).unwrap();
        let before = cart.clone();

        assert!(!cart.remove_item(&phone()));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_remove_item_at_uses_insertion_order() {
        let mut cart = Cart::new();
        for (id, name) in [(1, "a"), (2, "b"), (3, "c")] {
            cart.add_item(&Product::new(id, name), price(dec!(1.00)), 1).unwrap();
        }

        assert!(cart.remove_item_at(1));

        let ids: Vec<i64> = cart.iter().map(|item| item.product().id()).collect();
        assert_eq!(ids, vec![1, 3]);

        assert!(cart.remove_item_at(0));
        assert_eq!(cart.items()[0].product().id(), 3);
    }

    #[test]
    fn test_remove_item_at_out_of_range() {
        let mut cart = Cart::new();
        cart.add_item(&phone(), price(dec!(1.00)), 1).unwrap();

        assert!(!cart.remove_item_at(-1));
        assert!(!cart.remove_item_at(1));
        assert!(!cart.remove_item_at(isize::MAX));
        assert_eq!(cart.len(), 1);

        assert!(!Cart::new().remove_item_at(0));
    }

    #[test]
    fn test_items_is_a_snapshot() {
        let mut cart = Cart::new();
        cart.add_item(&phone(), price(dec!(1.00)), 1).unwrap();

        let mut snapshot = cart.items();
        snapshot.clear();

        assert_eq!(cart.len(), 1);
    }
}
