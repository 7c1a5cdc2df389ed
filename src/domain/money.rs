//! In-game token amounts.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, Sub};

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Ledger amounts are stored as integer micro-units.
pub const MICROS_PER_IGGT: u32 = 6;

/// An amount of IGGT, the token that denominates P&L and balances.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Iggt(Decimal);

impl Iggt {
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Convert a raw ledger amount (millionths of a token).
    #[must_use]
    pub fn from_micros(micros: i64) -> Self {
        Self(Decimal::new(micros, MICROS_PER_IGGT).normalize())
    }

    #[must_use]
    pub const fn new(value: Decimal) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(self) -> Decimal {
        self.0
    }

    #[must_use]
    pub fn is_positive(self) -> bool {
        self.0 > Decimal::ZERO
    }

    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    /// Lossy conversion for chart geometry.
    #[must_use]
    pub fn to_f64(self) -> f64 {
        self.0.to_f64().unwrap_or(0.0)
    }

    /// Divide by a count, returning zero when the count is zero.
    #[must_use]
    pub fn per(self, count: i64) -> Self {
        if count == 0 {
            return Self::ZERO;
        }
        Self(self.0 / Decimal::from(count))
    }

    /// Ratio of two amounts, `None` when the divisor is zero.
    #[must_use]
    pub fn ratio(self, divisor: Self) -> Option<Decimal> {
        if divisor.is_zero() {
            None
        } else {
            Some(self.0 / divisor.0)
        }
    }

    /// Format with thousands separators and `dp` decimal places.
    #[must_use]
    pub fn grouped(self, dp: u32) -> String {
        group_decimal(self.0, dp)
    }
}

/// Format a decimal as `1,234.56`, rounding half away from zero.
#[must_use]
pub fn group_decimal(value: Decimal, dp: u32) -> String {
    let rounded = value.round_dp_with_strategy(
        dp,
        rust_decimal::RoundingStrategy::MidpointAwayFromZero,
    );
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = format!("{:.*}", dp as usize, rounded.abs());
    let (whole, fraction) = match text.split_once('.') {
        Some((whole, fraction)) => (whole.to_string(), Some(fraction.to_string())),
        None => (text, None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3 + 4);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(&fraction);
    }
    out
}

/// Format an integer count with thousands separators.
#[must_use]
pub fn group_count(value: i64) -> String {
    group_decimal(Decimal::from(value), 0)
}

impl fmt::Display for Iggt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.grouped(2))
    }
}

impl Add for Iggt {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Iggt {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Iggt {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Div<Decimal> for Iggt {
    type Output = Self;

    fn div(self, rhs: Decimal) -> Self {
        Self(self.0 / rhs)
    }
}

impl Sum for Iggt {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Iggt> for Iggt {
    fn sum<I: Iterator<Item = &'a Iggt>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl From<Decimal> for Iggt {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn from_micros_divides_by_a_million() {
        assert_eq!(Iggt::from_micros(1_500_000).value(), dec!(1.5));
        assert_eq!(Iggt::from_micros(-250_000).value(), dec!(-0.25));
        assert_eq!(Iggt::from_micros(1).value(), dec!(0.000001));
    }

    #[test]
    fn grouped_inserts_thousands_separators() {
        assert_eq!(Iggt::new(dec!(1234567.891)).grouped(2), "1,234,567.89");
        assert_eq!(Iggt::new(dec!(999.5)).grouped(0), "1,000");
        assert_eq!(Iggt::new(dec!(12)).grouped(2), "12.00");
    }

    #[test]
    fn grouped_keeps_sign_for_negative_values() {
        assert_eq!(Iggt::new(dec!(-4321.005)).grouped(2), "-4,321.01");
        assert_eq!(Iggt::new(dec!(-0.001)).grouped(2), "0.00");
    }

    #[test]
    fn per_returns_zero_for_zero_count() {
        assert_eq!(Iggt::new(dec!(100)).per(0), Iggt::ZERO);
        assert_eq!(Iggt::new(dec!(100)).per(4).value(), dec!(25));
    }

    #[test]
    fn ratio_is_none_for_zero_divisor() {
        assert!(Iggt::new(dec!(10)).ratio(Iggt::ZERO).is_none());
        assert_eq!(
            Iggt::new(dec!(10)).ratio(Iggt::new(dec!(4))),
            Some(dec!(2.5))
        );
    }

    #[test]
    fn sum_adds_all_amounts() {
        let amounts = [Iggt::new(dec!(1.25)), Iggt::new(dec!(-0.25)), Iggt::new(dec!(3))];
        let total: Iggt = amounts.iter().sum();
        assert_eq!(total.value(), dec!(4));
    }

    #[test]
    fn group_count_formats_integers() {
        assert_eq!(group_count(0), "0");
        assert_eq!(group_count(1234), "1,234");
        assert_eq!(group_count(-1234567), "-1,234,567");
    }

    #[test]
    fn serializes_as_decimal_string() {
        let json = serde_json::to_value(Iggt::from_micros(2_500_000)).unwrap();
        assert_eq!(json, "2.5");
    }
}
