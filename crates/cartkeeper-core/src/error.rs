//! # Error Types
//!
//! Domain-specific error types for cartkeeper-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  cartkeeper-core errors (this file)                                    │
//! │  ├── CoreError        - What a cart operation can fail with            │
//! │  └── ValidationError  - Which argument was rejected, and how           │
//! │                                                                         │
//! │  config.rs                                                             │
//! │  └── ConfigError      - Unparsable environment settings                │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError::InvalidArgument → caller           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include the offending field in the message
//! 3. Errors are enum variants, never String
//! 4. Absence (nothing to remove, no such cart) is a `bool`, not an error

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors returned by cart operations.
///
/// The domain has a single failure kind: a caller passed an argument the
/// cart cannot accept. The wrapped [`ValidationError`] says which one.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// An argument to a cart operation was absent or out of range.
    ///
    /// ## When This Occurs
    /// - `add` with no product or no unit price
    /// - `add_item` with quantity <= 0
    /// - A merge whose summed quantity no longer fits in an `i64`
    /// - An add whose line total or cart total would overflow
    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before any state is touched, so a rejected call never leaves a
/// cart half-modified.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// An amount would exceed what an exact decimal can hold.
    #[error("{field} exceeds the largest representable amount")]
    TooLarge { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
