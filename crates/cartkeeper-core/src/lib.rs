//! # cartkeeper-core: Pure Cart Logic
//!
//! Per-customer shopping carts, their totals, and the average ticket across
//! all carts. Everything here is in-memory and synchronous.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cartkeeper                                       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Caller (storefront, service, CLI)            │   │
//! │  │        owns the CartRegistry, decides how to share it           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ cartkeeper-core (THIS CRATE) ★                  │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ registry  │  │   cart    │  │   types   │  │   money   │  │   │
//! │  │   │ Registry  │─►│   Cart    │─►│ LineItem  │─►│   Money   │  │   │
//! │  │   │ avg ticket│  │  Draft    │  │ Product   │  │ (Decimal) │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO DATABASE • NO NETWORK • NO THREADS                        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Product and LineItem
//! - [`money`] - Money type over an exact decimal (no floating point!)
//! - [`cart`] - Cart and the unvalidated LineItemDraft
//! - [`registry`] - CartRegistry and the average ticket
//! - [`config`] - RegistryConfig, MergePolicy
//! - [`error`] - Domain error types
//! - [`validation`] - Argument checks
//!
//! ## Example Usage
//!
//! ```rust
//! use cartkeeper_core::{CartRegistry, Money, Product};
//!
//! let phone = Product::new(1, "iphone 14 pro max");
//! let tv = Product::new(2, "Smart TV LG Nanocell 55' 4K");
//!
//! let mut registry = CartRegistry::new();
//! let cart = registry.get_or_create("alice");
//!
//! cart.add_item(&phone, "7599.00".parse().unwrap(), 2).unwrap();
//! cart.add_item(&tv, "2564.05".parse().unwrap(), 3).unwrap();
//! assert_eq!(cart.total().to_string(), "22890.15");
//!
//! assert!(cart.remove_item(&phone));
//! assert_eq!(cart.total().to_string(), "7692.15");
//!
//! assert_eq!(registry.average_ticket().to_string(), "7692.15");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod config;
pub mod error;
pub mod money;
pub mod registry;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use cartkeeper_core::Cart` instead of
// `use cartkeeper_core::cart::Cart`

pub use cart::{Cart, LineItemDraft};
pub use config::{ConfigError, MergePolicy, RegistryConfig};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use registry::CartRegistry;
pub use types::{LineItem, Product};
