//! An open position and the request that values a set of them.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use super::{Direction, Pair, Price};

/// One open trade.
///
/// Lot is always in `(0, MAX_LOT]`; construct through [`Position::new`] or
/// the validation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Position {
    direction: Direction,
    #[serde(with = "rust_decimal::serde::float")]
    lot: Decimal,
    open: Price,
}

impl Position {
    /// Largest accepted lot size.
    pub const MAX_LOT: Decimal = dec!(1000000);

    /// Returns `None` when `lot` is not positive or exceeds [`Position::MAX_LOT`].
    pub fn new(direction: Direction, lot: Decimal, open: Price) -> Option<Self> {
        (lot > Decimal::ZERO && lot <= Self::MAX_LOT).then_some(Self {
            direction,
            lot,
            open,
        })
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Lot size (volume).
    pub fn lot(&self) -> Decimal {
        self.lot
    }

    /// Opening price.
    pub fn open(&self) -> Price {
        self.open
    }

    /// Same trade in the opposite direction.
    pub fn flipped(&self) -> Self {
        Self {
            direction: self.direction.flipped(),
            ..self.clone()
        }
    }

    /// Same trade with `lot` scaled by a positive factor.
    pub fn scaled(&self, factor: Decimal) -> Option<Self> {
        Self::new(self.direction, self.lot * factor, self.open)
    }
}

/// Snapshot of everything needed to value a set of positions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalculationRequest {
    pair: Pair,
    close: Price,
    positions: Vec<Position>,
}

impl CalculationRequest {
    pub fn new(pair: Pair, close: Price, positions: Vec<Position>) -> Self {
        Self {
            pair,
            close,
            positions,
        }
    }

    pub fn pair(&self) -> Pair {
        self.pair
    }

    /// Hypothetical closing price.
    pub fn close(&self) -> Price {
        self.close
    }

    /// Positions in insertion order.
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
