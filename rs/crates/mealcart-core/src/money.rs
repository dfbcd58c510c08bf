use serde::Serialize;
use std::fmt;
use std::iter::Sum;
use std::ops::Add;

/// Fixed currency prefix on every displayed amount.
pub const CURRENCY_PREFIX: &str = "RM";

/// Sales tax in basis points (6%).
pub const TAX_RATE_BPS: u64 = 600;

/// An amount in minor units (sen). Two decimal places, never negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_minor(minor: u64) -> Self {
        Money(minor)
    }

    pub const fn from_units(units: u64) -> Self {
        Money(units * 100)
    }

    pub const fn minor(self) -> u64 {
        self.0
    }

    /// Line total for `qty` units at this price.
    pub fn times(self, qty: u32) -> Money {
        Money(self.0.saturating_mul(u64::from(qty)))
    }

    /// Tax owed on this amount, rounded half-up to the nearest sen.
    pub fn tax(self) -> Money {
        Money((self.0.saturating_mul(TAX_RATE_BPS) + 5_000) / 10_000)
    }

    pub fn as_f64(self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

/// `RM 84.00`
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}.{:02}", CURRENCY_PREFIX, self.0 / 100, self.0 % 100)
    }
}
