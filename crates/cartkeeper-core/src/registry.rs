//! # Cart Registry
//!
//! Owns one [`Cart`] per customer and computes the average ticket.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  get_or_create("alice") ──► no cart? ──► Cart::with_merge_policy(..)    │
//! │          │                                        │                     │
//! │          └──────────────── &mut Cart ◄────────────┘                     │
//! │                                                                         │
//! │  average_ticket() ──► Σ cart.total() / carts ──► round half-up         │
//! │                                                                         │
//! │  invalidate("alice") ──► cart dropped (checkout, session expiry)        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The registry is a plain value. Construct it once and hand out borrows;
//! a caller that needs it on several threads wraps it in its own lock.

use std::collections::HashMap;
use std::num::NonZeroU64;

use tracing::debug;

use crate::cart::Cart;
use crate::config::RegistryConfig;
use crate::money::Money;

/// Maps customer identifiers to their carts.
#[derive(Debug, Clone, Default)]
pub struct CartRegistry {
    carts: HashMap<String, Cart>,
    config: RegistryConfig,
}

impl CartRegistry {
    /// Creates an empty registry with the default configuration.
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Creates an empty registry with the given configuration.
    pub fn with_config(config: RegistryConfig) -> Self {
        CartRegistry {
            carts: HashMap::new(),
            config,
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Returns the customer's cart, creating an empty one on first use.
    pub fn get_or_create(&mut self, customer_id: &str) -> &mut Cart {
        let merge_policy = self.config.merge_policy;
        self.carts.entry(customer_id.to_string()).or_insert_with(|| {
            debug!(customer_id, %merge_policy, "Creating cart");
            Cart::with_merge_policy(merge_policy)
        })
    }

    /// Returns the customer's cart without creating one.
    pub fn get(&self, customer_id: &str) -> Option<&Cart> {
        self.carts.get(customer_id)
    }

    /// Average of every cart's total, rounded half-up to
    /// `config.ticket_scale` places.
    ///
    /// Empty carts count. An empty registry averages to zero. Never panics:
    /// when the summed totals overflow, each total is divided by the cart
    /// count before summing.
    ///
    /// ## Example
    /// ```text
    /// alice: 10.005
    /// bob:   10.005
    /// carol: 10.00
    ///      │
    ///      ▼
    /// 30.01 / 3 = 10.00333..  ──► 10.00
    /// ```
    pub fn average_ticket(&self) -> Money {
        let scale = self.config.ticket_scale;

        let Some(count) = NonZeroU64::new(self.carts.len() as u64) else {
            return Money::zero().round_half_up(scale);
        };

        let sum = self
            .carts
            .values()
            .try_fold(Money::zero(), |acc, cart| acc.checked_add(cart.total()));

        match sum {
            Some(sum) => sum.divide_half_up(count, scale),
            None => {
                // Each cart fits, so each share fits, and so does their sum
                // up to rounding at the very edge of the range.
                debug!(carts = count.get(), "Ticket sum overflows, averaging per cart");
                self.carts
                    .values()
                    .fold(Money::zero(), |acc, cart| {
                        acc.saturating_add(cart.total().share(count))
                    })
                    .round_half_up(scale)
            }
        }
    }

    /// Drops the customer's cart.
    ///
    /// Returns `true` if the customer had a cart.
    pub fn invalidate(&mut self, customer_id: &str) -> bool {
        let removed = self.carts.remove(customer_id).is_some();
        if removed {
            debug!(customer_id, "Invalidated cart");
        }
        removed
    }

    /// Returns the number of carts.
    pub fn len(&self) -> usize {
        self.carts.len()
    }

    /// Checks if no cart is registered.
    pub fn is_empty(&self) -> bool {
        self.carts.is_empty()
    }

    /// Iterates the customer ids that currently hold a cart, in no
    /// particular order.
    pub fn customers(&self) -> impl Iterator<Item = &str> + '_ {
        self.carts.keys().map(String::as_str)
    }
}
