//! # Money Module
//!
//! Provides the `Money` type for handling monetary values exactly.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Unit prices are not always whole cents:                                │
//! │    10.005 cannot be held in i64 cents without losing the last digit    │
//! │                                                                         │
//! │  OUR SOLUTION: base-10 Decimal                                          │
//! │    mantissa × 10^-scale, exact for every amount a caller can type      │
//! │    Rounding happens once, explicitly, where the business asks for it   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use cartkeeper_core::money::Money;
//!
//! let price: Money = "2564.05".parse().unwrap();
//! let line_total = price * 3;
//! assert_eq!(line_total.to_string(), "7692.15");
//!
//! // NEVER do this:
//! // let bad = Money::from_f64(10.99); // NO SUCH METHOD EXISTS!
//! ```

use std::fmt;
use std::iter::Sum;
use std::num::NonZeroU64;
use std::ops::{Add, Mul};
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

// =============================================================================
// Money Type
// =============================================================================

/// An exact monetary amount.
///
/// ## Design Decisions
/// - **Decimal, not cents**: keeps whatever scale the caller supplied
/// - **Numeric equality**: `7599.00 == 7599.0`, the scale is presentation
/// - **Transparent serde**: serialized as the decimal string, e.g. `"10.50"`
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                                                                         │
/// │  LineItem.unit_price ──► LineItem.total ──► Cart.total                  │
/// │                                                 │                       │
/// │                                                 ▼                       │
/// │                          CartRegistry.average_ticket (rounded half-up)  │
/// │                                                                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Wraps a decimal amount.
    #[inline]
    pub const fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Creates a Money value from cents (scale 2).
    ///
    /// ## Example
    /// ```rust
    /// use cartkeeper_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.to_string(), "10.99");
    /// ```
    #[inline]
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, 2))
    }

    /// Returns the underlying decimal.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns the absolute value.
    #[inline]
    pub fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Adds two amounts, `None` when the sum leaves the `Decimal` range.
    #[inline]
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Multiplies money by a quantity, `None` when the product leaves the
    /// `Decimal` range.
    #[inline]
    pub fn checked_multiply_quantity(&self, qty: i64) -> Option<Self> {
        self.0.checked_mul(Decimal::from(qty)).map(Money)
    }

    /// Multiplies money by a quantity.
    ///
    /// Panics when the product leaves the `Decimal` range. Line items in a
    /// cart never do: `Cart::add_item` rejects any add that would.
    ///
    /// ## Example
    /// ```rust
    /// use cartkeeper_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(759_900);
    /// assert_eq!(unit_price.multiply_quantity(2).to_string(), "15198.00");
    /// ```
    #[inline]
    pub fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * Decimal::from(qty))
    }

    /// Rounds to `dp` decimal places, 0-4 down and 5-9 up.
    ///
    /// The midpoint rounds away from zero, so `-0.005` becomes `-0.01`.
    /// The result always carries exactly `dp` places: `10` at 2 places
    /// displays as `10.00`.
    ///
    /// ## Example
    /// ```rust
    /// use cartkeeper_core::money::Money;
    ///
    /// let amount: Money = "10.005".parse().unwrap();
    /// assert_eq!(amount.round_half_up(2).to_string(), "10.01");
    ///
    /// let amount: Money = "10.004".parse().unwrap();
    /// assert_eq!(amount.round_half_up(2).to_string(), "10.00");
    /// ```
    pub fn round_half_up(&self, dp: u32) -> Self {
        let mut rounded = self
            .0
            .round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(dp);
        Money(rounded)
    }

    /// Divides by a whole count and rounds the quotient half-up to `dp` places.
    ///
    /// ## Exactness
    /// The quotient is never materialized at finite precision before
    /// rounding. Both sides are lifted to integers and the half-up decision
    /// is taken on the exact remainder:
    /// ```text
    ///   value = mantissa / 10^scale
    ///
    ///   value / n at dp places = (mantissa × 10^dp) / (10^scale × n)
    ///                          = quotient  rem  remainder
    ///
    ///   2 × |remainder| >= denominator  →  quotient moves one unit away from zero
    /// ```
    /// Only when the lifted integers do not fit in an `i128` does this fall
    /// back to `Decimal` division, which carries 28 significant digits.
    ///
    /// ## Example
    /// ```rust
    /// use std::num::NonZeroU64;
    /// use cartkeeper_core::money::Money;
    ///
    /// let sum: Money = "30.01".parse().unwrap();
    /// let three = NonZeroU64::new(3).unwrap();
    /// assert_eq!(sum.divide_half_up(three, 2).to_string(), "10.00");
    /// ```
    pub fn divide_half_up(&self, divisor: NonZeroU64, dp: u32) -> Self {
        match exact_quotient(self.0, divisor, dp) {
            Some(quotient) => Money(quotient),
            None => self.share(divisor).round_half_up(dp),
        }
    }

    /// Splits the amount into `count` equal shares, at `Decimal` precision.
    ///
    /// Dividing by a whole count of at least one cannot overflow.
    #[inline]
    pub fn share(&self, count: NonZeroU64) -> Self {
        Money(self.0 / Decimal::from(count.get()))
    }

    /// Adds two amounts, clamping to the `Decimal` range instead of
    /// overflowing.
    #[inline]
    pub fn saturating_add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

/// Integer long division with a half-up decision on the remainder.
///
/// Returns `None` when an intermediate does not fit in `i128` or the result
/// does not fit in a `Decimal`.
fn exact_quotient(value: Decimal, divisor: NonZeroU64, dp: u32) -> Option<Decimal> {
    let numerator = value.mantissa().checked_mul(10i128.checked_pow(dp)?)?;
    let denominator = 10i128
        .checked_pow(value.scale())?
        .checked_mul(i128::from(divisor.get()))?;

    let mut quotient = numerator / denominator;
    let remainder = numerator % denominator;

    // remainder < denominator <= i128::MAX, so doubling fits in u128
    if remainder.unsigned_abs() * 2 >= denominator.unsigned_abs() {
        quotient += numerator.signum();
    }

    Decimal::try_from_i128_with_scale(quotient, dp).ok()
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the amount at its own scale, without currency.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str_exact(s.trim()).map(Money)
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money(amount)
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.0
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Multiplication by quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
