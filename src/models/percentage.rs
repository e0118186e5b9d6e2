//! Fixed-point percentages
//!
//! Stored as basis points (hundredths of a percent) so that "do these add up
//! to 100%" is an exact integer comparison.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A percentage in basis points: 10 000 bp = 100%
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percentage(u32);

impl Percentage {
    pub const BASIS_POINTS_PER_WHOLE: u32 = 10_000;
    pub const WHOLE: Percentage = Percentage(Self::BASIS_POINTS_PER_WHOLE);

    pub const fn from_basis_points(bp: u32) -> Self {
        Self(bp)
    }

    /// Whole percent, e.g. `from_percent(30)` is 30%
    pub const fn from_percent(pct: u32) -> Self {
        Self(pct * 100)
    }

    pub const fn basis_points(&self) -> u32 {
        self.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Parse "30", "30%", "33.33" or "12.5%"
    pub fn parse(s: &str) -> Result<Self, PercentageParseError> {
        let trimmed = s.trim();
        let invalid = || PercentageParseError::InvalidFormat(trimmed.to_string());
        let body = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();
        if body.is_empty() {
            return Err(invalid());
        }

        let (whole, fraction) = body.split_once('.').unwrap_or((body, ""));
        if !whole.chars().all(|c| c.is_ascii_digit())
            || !fraction.chars().all(|c| c.is_ascii_digit())
            || fraction.len() > 2
        {
            return Err(invalid());
        }

        let whole: u32 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };
        let fraction: u32 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<u32>().map_err(|_| invalid())? * 10,
            _ => fraction.parse().map_err(|_| invalid())?,
        };

        whole
            .checked_mul(100)
            .and_then(|bp| bp.checked_add(fraction))
            .map(Self)
            .ok_or_else(invalid)
    }
}

/// Format a basis point count as a percentage, e.g. 3333 as "33.33%"
///
/// Takes a `u64` so totals of several percentages can be shown without
/// wrapping.
pub fn format_basis_points(bp: u64) -> String {
    let whole = bp / 100;
    let fraction = bp % 100;
    if fraction == 0 {
        format!("{}%", whole)
    } else {
        format!("{}.{:02}%", whole, fraction)
    }
}

/// Sum of the basis points in `iter`, widened so it cannot overflow
pub fn total_basis_points<I: IntoIterator<Item = Percentage>>(iter: I) -> u64 {
    iter.into_iter().map(|p| u64::from(p.0)).sum()
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_basis_points(u64::from(self.0)))
    }
}

/// Saturates at `u32::MAX` basis points; use [`total_basis_points`] to
/// compare a total against 100%.
impl std::iter::Sum for Percentage {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        Self(iter.fold(0u32, |acc, p| acc.saturating_add(p.0)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PercentageParseError {
    #[error("Invalid percentage: {0}")]
    InvalidFormat(String),
}
