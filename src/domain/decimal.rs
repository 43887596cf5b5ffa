//! Exact decimal type backed by rust_decimal.
//!
//! Used for reported payout multipliers and bet-size percentages. Payout
//! amounts themselves are integer chip math (see `OddsRatio`); this type never
//! feeds back into a credited amount.

use rust_decimal::Decimal as RustDecimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Decimal value for multipliers and percentages.
///
/// Serializes to a JSON number (not string).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Decimal(#[serde(with = "rust_decimal::serde::float")] RustDecimal);

impl Decimal {
    /// The additive identity (0).
    pub fn zero() -> Self {
        Decimal(RustDecimal::ZERO)
    }

    /// Whole number value.
    pub fn from_int(value: u64) -> Self {
        Decimal(RustDecimal::from(value))
    }

    /// `num / den`, or zero when `den` is zero.
    pub fn from_ratio(num: u64, den: u64) -> Self {
        if den == 0 {
            return Decimal::zero();
        }
        Decimal(RustDecimal::from(num) / RustDecimal::from(den))
    }

    /// `part / whole * 100`, rounded to two decimal places. Zero when `whole` is zero.
    pub fn percent_of(part: u64, whole: u64) -> Self {
        if whole == 0 {
            return Decimal::zero();
        }
        let ratio = RustDecimal::from(part) * RustDecimal::ONE_HUNDRED / RustDecimal::from(whole);
        Decimal(ratio.round_dp(2))
    }

    /// Parse a Decimal from a string losslessly.
    ///
    /// # Errors
    /// Returns an error if the string is not a valid decimal number.
    pub fn from_str_canonical(s: &str) -> Result<Self, rust_decimal::Error> {
        RustDecimal::from_str(s).map(Decimal)
    }

    /// Format without exponent notation or trailing zeros.
    pub fn to_canonical_string(&self) -> String {
        format!("{}", self.0.normalize())
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_canonical_string())
    }
}

impl FromStr for Decimal {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_canonical(s)
    }
}
