//! Value amount type.
//!
//! Amounts are fixed-point integers (u128) to avoid floating-point errors.
//! The smallest unit is 1 raw; 1 AERO = 10^18 raw. Fees, premiums and
//! payouts are all expressed as `Amount`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// Raw units per whole AERO.
pub const AERO_UNIT: u128 = 1_000_000_000_000_000_000;

/// A value amount, stored as raw units (u128) for precision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Amount(u128);

impl Amount {
    pub const ZERO: Self = Self(0);

    pub fn new(raw: u128) -> Self {
        Self(raw)
    }

    /// Whole AERO to raw units.
    pub fn from_aero(aero: u128) -> Self {
        Self(aero * AERO_UNIT)
    }

    /// Raw units truncated to whole AERO.
    pub fn to_aero(&self) -> u128 {
        self.0 / AERO_UNIT
    }

    pub fn raw(&self) -> u128 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    pub fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    /// Scale by a rational factor, e.g. the 3/2 insurance payout multiple.
    /// Truncates toward zero.
    pub fn scale(self, numerator: u128, denominator: u128) -> Self {
        Self(self.0.saturating_mul(numerator) / denominator)
    }
}

impl Add for Amount {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Amount {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} raw", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aero_conversion_round_trips() {
        let a = Amount::from_aero(10);
        assert_eq!(a.raw(), 10 * AERO_UNIT);
        assert_eq!(a.to_aero(), 10);
    }

    #[test]
    fn scale_computes_payout_multiple() {
        // 1 AERO premium at 3/2 pays out 1.5 AERO
        let premium = Amount::from_aero(1);
        let payout = premium.scale(3, 2);
        assert_eq!(payout.raw(), AERO_UNIT + AERO_UNIT / 2);
    }

    #[test]
    fn scale_truncates() {
        assert_eq!(Amount::new(3).scale(3, 2), Amount::new(4));
    }

    #[test]
    fn checked_sub_underflow_is_none() {
        assert!(Amount::new(1).checked_sub(Amount::new(2)).is_none());
    }

    #[test]
    fn saturating_sub_floors_at_zero() {
        assert_eq!(Amount::new(1).saturating_sub(Amount::new(2)), Amount::ZERO);
    }
}
