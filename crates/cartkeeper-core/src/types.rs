//! # Domain Types
//!
//! The values a cart is built from.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐        ┌─────────────────────┐                    │
//! │  │    Product      │◄───────│      LineItem       │                    │
//! │  │  ─────────────  │        │  ─────────────────  │                    │
//! │  │  id (i64)       │        │  product            │                    │
//! │  │  description    │        │  unit_price (Money) │                    │
//! │  │  (immutable)    │        │  quantity (> 0)     │                    │
//! │  └─────────────────┘        └─────────────────────┘                    │
//! │                                                                         │
//! │  Product identity:  (id, description)                                  │
//! │  LineItem identity: (product, unit_price, quantity)                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## LineItem Equality
//! Two line items are equal only when product, unit price AND quantity all
//! match. The same product at two different quantities is two different
//! line items. [`Cart`](crate::cart::Cart) relies on this when it decides
//! whether an add merges into an existing entry.

use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A purchasable good.
///
/// Fields are private so a product cannot change once it is in a cart.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Product {
    id: i64,
    description: String,
}

impl Product {
    /// Creates a product.
    pub fn new(id: i64, description: impl Into<String>) -> Self {
        Product {
            id,
            description: description.into(),
        }
    }

    #[inline]
    pub fn id(&self) -> i64 {
        self.id
    }

    #[inline]
    pub fn description(&self) -> &str {
        &self.description
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// A product in a cart at a unit price and quantity.
///
/// Only [`Cart`](crate::cart::Cart) can change a line item after it is
/// built; everything outside the crate sees getters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct LineItem {
    product: Product,
    unit_price: Money,
    quantity: i64,
}

impl LineItem {
    /// Builds a line item. Argument checks belong to the cart.
    pub(crate) fn new(product: Product, unit_price: Money, quantity: i64) -> Self {
        LineItem {
            product,
            unit_price,
            quantity,
        }
    }

    #[inline]
    pub fn product(&self) -> &Product {
        &self.product
    }

    #[inline]
    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    #[inline]
    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    /// Line total (unit price × quantity), exact.
    ///
    /// ## Example
    /// ```text
    /// Product: Smart TV 2564.05
    /// Quantity: 3
    ///      │
    ///      ▼
    /// total() ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Line Total: 7692.15
    /// ```
    #[inline]
    pub fn total(&self) -> Money {
        self.unit_price * self.quantity
    }

    pub(crate) fn set_quantity(&mut self, quantity: i64) {
        self.quantity = quantity;
    }

    pub(crate) fn set_unit_price(&mut self, unit_price: Money) {
        self.unit_price = unit_price;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
