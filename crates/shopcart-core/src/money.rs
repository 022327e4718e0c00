//! # Money Module
//!
//! Provides the `Money` type for cart prices and totals.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Product records carry prices as loose JSON numbers:                    │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: round each line once, then add integers                  │
//! │    "price": 9.99 × 3  ──► Money(2997) ──► Σ                             │
//! │    "price": "abc"     ──► Money(0)                                      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use shopcart_core::money::Money;
//!
//! let line_total = Money::from_major_units(9.99 * 3.0);
//! assert_eq!(line_total.to_string(), "$29.97");
//!
//! let total: Money = [line_total, Money::from_cents(3)].into_iter().sum();
//! assert_eq!(total.cents(), 3000);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: negative prices coming from loose input are kept, not clamped
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Saturating arithmetic**: huge quantities never panic, they pin at the bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use shopcart_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from an amount in major units, rounded to the
    /// nearest cent (half away from zero). NaN is zero; amounts beyond the
    /// `i64` range saturate.
    ///
    /// ## Example
    /// ```rust
    /// use shopcart_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_units(9.99).cents(), 999);
    /// assert_eq!(Money::from_major_units(0.125).cents(), 13);
    /// assert_eq!(Money::from_major_units(f64::NAN).cents(), 0);
    /// assert_eq!(Money::from_major_units(f64::INFINITY).cents(), i64::MAX);
    /// ```
    pub fn from_major_units(amount: f64) -> Self {
        if amount.is_nan() {
            return Money::zero();
        }
        // `as` saturates at the i64 bounds
        Money((amount * 100.0).round() as i64)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Debug-friendly rendering such as `$10.99`.
///
/// ## Note
/// UI code should format with its own currency settings; see the CLI's
/// `CliConfig::format_currency`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_from_major_units() {
        assert_eq!(Money::from_major_units(10.0).cents(), 1000);
        assert_eq!(Money::from_major_units(19.95).cents(), 1995);
        assert_eq!(Money::from_major_units(0.005 * 100.0).cents(), 50);
        assert_eq!(Money::from_major_units(-2.5).cents(), -250);
        assert_eq!(Money::from_major_units(f64::NEG_INFINITY).cents(), i64::MIN);
    }

    #[test]
    fn test_float_prices_sum_exactly() {
        let total: Money = [0.1, 0.2].into_iter().map(Money::from_major_units).sum();
        assert_eq!(total.cents(), 30);
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);

        let mut acc = Money::zero();
        acc += a;
        acc += b;
        assert_eq!(acc.cents(), 1500);
    }

    #[test]
    fn test_add_saturates() {
        let price = Money::from_cents(1000);
        assert_eq!((Money::from_cents(i64::MAX) + price).cents(), i64::MAX);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert_eq!(zero.cents(), 0);
        assert_eq!(Money::default(), zero);
    }
}
