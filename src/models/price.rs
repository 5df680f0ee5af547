//! Integer prices quoted without their decimal point.

use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

/// A positive price in the pair's smallest quoted unit.
///
/// `0.90400` is held as `90400`; the decimal point is a display convention
/// and is never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    /// Largest accepted price.
    pub const MAX: u64 = 1_000_000_000_000;

    /// Returns `None` for zero or anything above [`Price::MAX`].
    pub fn new(value: u64) -> Option<Self> {
        (value > 0 && value <= Self::MAX).then_some(Self(value))
    }

    pub fn get(self) -> u64 {
        self.0
    }

    /// Absolute distance to another price, in quoted units.
    pub fn distance(self, other: Price) -> Decimal {
        Decimal::from(self.0.abs_diff(other.0))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
