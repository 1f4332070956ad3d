//! Registry configuration.
//!
//! Configuration is loaded from environment variables with fallback to defaults.
//!
//! | Variable                  | Default       | Meaning                              |
//! |---------------------------|---------------|--------------------------------------|
//! | `CARTKEEPER_TICKET_SCALE` | `2`           | Decimal places of the average ticket |
//! | `CARTKEEPER_MERGE_POLICY` | `exact_match` | `exact_match` or `by_product`        |
//!
//! The merge policy also accepts the short forms `exact` and `product`.

use std::env;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Environment variable holding the average-ticket scale.
pub const TICKET_SCALE_VAR: &str = "CARTKEEPER_TICKET_SCALE";

/// Environment variable holding the merge policy.
pub const MERGE_POLICY_VAR: &str = "CARTKEEPER_MERGE_POLICY";

/// Largest scale a `Decimal` can carry.
pub const MAX_TICKET_SCALE: u32 = 28;

/// Decides which existing line item absorbs a repeated add.
///
/// ```text
/// cart: [ phone × 2 @ 7599.00 ]
/// add:    phone × 1 @ 7599.00
///
/// ExactMatch → [ phone × 2 @ 7599.00, phone × 1 @ 7599.00 ]   (no equal entry)
/// ByProduct  → [ phone × 3 @ 7599.00 ]                        (same product)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergePolicy {
    /// Merge only into an entry equal to the new one (product, unit price
    /// and quantity). Any other repeated add becomes a separate entry.
    #[default]
    ExactMatch,
    /// Merge into the first entry for the same product, whatever its price
    /// and quantity. A cart holds at most one entry per product.
    ByProduct,
}

impl FromStr for MergePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exact" | "exact_match" => Ok(MergePolicy::ExactMatch),
            "product" | "by_product" => Ok(MergePolicy::ByProduct),
            other => Err(ConfigError::InvalidValue {
                key: MERGE_POLICY_VAR.to_string(),
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for MergePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergePolicy::ExactMatch => f.write_str("exact_match"),
            MergePolicy::ByProduct => f.write_str("by_product"),
        }
    }
}

/// Cart registry configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Decimal places of `average_ticket`
    pub ticket_scale: u32,

    /// Merge policy handed to every cart the registry creates
    pub merge_policy: MergePolicy,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        RegistryConfig {
            ticket_scale: 2,
            merge_policy: MergePolicy::ExactMatch,
        }
    }
}

impl RegistryConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(|key| env::var(key).ok())
    }

    /// Load configuration through a key lookup.
    ///
    /// Missing keys fall back to [`RegistryConfig::default`].
    pub fn load_from<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = RegistryConfig::default();

        let ticket_scale = match lookup(TICKET_SCALE_VAR) {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|scale| *scale <= MAX_TICKET_SCALE)
                .ok_or(ConfigError::InvalidValue {
                    key: TICKET_SCALE_VAR.to_string(),
                    value: raw,
                })?,
            None => defaults.ticket_scale,
        };

        let merge_policy = match lookup(MERGE_POLICY_VAR) {
            Some(raw) => raw.parse()?,
            None => defaults.merge_policy,
        };

        Ok(RegistryConfig {
            ticket_scale,
            merge_policy,
        })
    }
}

/// Configuration error types.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },
}
