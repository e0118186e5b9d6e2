//! Money type for representing currency amounts
//!
//! Amounts are whole cents in an `i64`, so every sum the ledger checks is an
//! exact integer comparison.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use super::percentage::Percentage;

/// A monetary amount in cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);
    pub const MAX: Money = Money(i64::MAX);

    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use potluck::models::Money;
    /// let amount = Money::from_cents(1050); // $10.50
    /// assert_eq!(amount.to_string(), "$10.50");
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from whole currency units
    pub const fn from_units(units: i64) -> Self {
        Self(units * 100)
    }

    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Whole units, truncated toward zero
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// The cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    pub const fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Add, returning `None` if the result would not fit
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Add, clamping at [`Money::MAX`] (or its negative counterpart)
    pub fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Sum an iterator, returning `None` on overflow
    pub fn checked_sum<I: IntoIterator<Item = Money>>(iter: I) -> Option<Self> {
        iter.into_iter().try_fold(Money::ZERO, Money::checked_add)
    }

    /// Divide into `parts` amounts that differ by at most one cent and sum
    /// back to `self`. The leftover cents go to the earliest parts.
    ///
    /// Returns an empty vector when `parts` is zero.
    ///
    /// # Examples
    /// ```
    /// use potluck::models::Money;
    /// let parts = Money::from_cents(10000).split_evenly(3);
    /// assert_eq!(parts, vec![
    ///     Money::from_cents(3334),
    ///     Money::from_cents(3333),
    ///     Money::from_cents(3333),
    /// ]);
    /// ```
    pub fn split_evenly(&self, parts: usize) -> Vec<Money> {
        if parts == 0 {
            return Vec::new();
        }
        let n = parts as i64;
        let base = self.0.div_euclid(n);
        let remainder = self.0.rem_euclid(n) as usize;
        (0..parts)
            .map(|i| Money(if i < remainder { base + 1 } else { base }))
            .collect()
    }

    /// The given percentage of this amount, rounded down to a whole cent
    pub fn percent_floor(&self, pct: Percentage) -> Money {
        let scaled = self.0 as i128 * pct.basis_points() as i128;
        Money(scaled.div_euclid(Percentage::BASIS_POINTS_PER_WHOLE as i128) as i64)
    }

    /// Parse a money amount from a string
    ///
    /// Accepts formats: "10.50", "-10.50", "$10.50", "10" (whole units)
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let trimmed = s.trim();
        let invalid = || MoneyParseError::InvalidFormat(trimmed.to_string());

        let (negative, rest) = match trimmed.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, trimmed),
        };
        let rest = rest.strip_prefix('$').unwrap_or(rest);
        if rest.is_empty() {
            return Err(invalid());
        }

        let (whole, fraction) = match rest.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (rest, ""),
        };

        let units: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };
        if !fraction.chars().all(|c| c.is_ascii_digit()) || fraction.len() > 2 {
            return Err(invalid());
        }
        let cents: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => fraction.parse().map_err(|_| invalid())?,
        };

        let total = units
            .checked_mul(100)
            .and_then(|c| c.checked_add(cents))
            .ok_or_else(invalid)?;
        Ok(Self(if negative { -total } else { total }))
    }

    /// Format with a currency symbol
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        format!(
            "{}{}{}.{:02}",
            sign,
            symbol,
            self.units().abs(),
            self.cents_part()
        )
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with_symbol("$"))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

/// Saturates instead of overflowing; use [`Money::checked_sum`] where an
/// overflow has to be reported.
impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Money::saturating_add)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoneyParseError {
    #[error("Invalid money format: {0}")]
    InvalidFormat(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1050).to_string(), "$10.50");
        assert_eq!(Money::ZERO.to_string(), "$0.00");
        assert_eq!(Money::from_cents(-1050).to_string(), "-$10.50");
        assert_eq!(Money::from_cents(5).to_string(), "$0.05");
        assert_eq!(Money::from_cents(25000).format_with_symbol("₹"), "₹250.00");
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("$10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("-10.50").unwrap().cents(), -1050);
        assert_eq!(Money::parse("300").unwrap().cents(), 30000);
        assert_eq!(Money::parse("10.5").unwrap().cents(), 1050);
        assert_eq!(Money::parse(".05").unwrap().cents(), 5);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Money::parse("").is_err());
        assert!(Money::parse("$").is_err());
        assert!(Money::parse("ten").is_err());
        assert!(Money::parse("1.234").is_err());
        assert!(Money::parse("1.2.3").is_err());
    }

    #[test]
    fn test_split_evenly_keeps_total() {
        let total = Money::from_cents(10000);
        let parts = total.split_evenly(3);
        assert_eq!(parts.iter().sum::<Money>(), total);
        assert_eq!(parts[0].cents(), 3334);
        assert_eq!(parts[2].cents(), 3333);

        let exact = Money::from_units(300).split_evenly(3);
        assert!(exact.iter().all(|m| *m == Money::from_units(100)));

        assert!(total.split_evenly(0).is_empty());
    }

    #[test]
    fn test_percent_floor() {
        let amount = Money::from_units(500);
        assert_eq!(
            amount.percent_floor(Percentage::from_basis_points(5000)),
            Money::from_units(250)
        );
        // 33.33% of $1.00 is 33.33 cents
        assert_eq!(
            Money::from_cents(100).percent_floor(Percentage::from_basis_points(3333)),
            Money::from_cents(33)
        );
    }

    #[test]
    fn test_arithmetic_and_sum() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);
        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((-a).cents(), -1000);
        assert_eq!(vec![a, b].into_iter().sum::<Money>().cents(), 1500);
    }

    #[test]
    fn test_checked_arithmetic() {
        let big = Money::parse("50000000000000000").unwrap();
        assert_eq!(big.checked_add(big), None);
        assert_eq!(Money::checked_sum([big, big]), None);
        assert_eq!(
            Money::checked_sum([Money::from_cents(1), Money::from_cents(2)]),
            Some(Money::from_cents(3))
        );
        assert_eq!(big.saturating_add(big), Money::MAX);
        assert_eq!([big, big, big].into_iter().sum::<Money>(), Money::MAX);
    }

    #[test]
    fn test_parse_rejects_out_of_range() {
        assert!(Money::parse("92233720368547758.08").is_err());
        assert_eq!(Money::parse("92233720368547758.07").unwrap(), Money::MAX);
    }

    #[test]
    fn test_serialization() {
        let m = Money::from_cents(1050);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "1050");
    }
}
