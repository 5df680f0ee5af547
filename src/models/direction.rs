//! Trade direction of an open position.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Price;

/// Direction of a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Long: profits when the close is above the open
    Buy,
    /// Short: profits when the close is below the open
    Sell,
}

impl Direction {
    /// Every direction, in display order.
    pub const ALL: [Direction; 2] = [Direction::Buy, Direction::Sell];

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Buy => "buy",
            Direction::Sell => "sell",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Direction::Buy => "Buy",
            Direction::Sell => "Sell",
        }
    }

    /// Returns true if price moved against this direction.
    ///
    /// A close equal to the open is never adverse.
    pub fn is_adverse(&self, open: Price, close: Price) -> bool {
        match self {
            Direction::Buy => close < open,
            Direction::Sell => close > open,
        }
    }

    /// The opposite direction.
    pub fn flipped(&self) -> Self {
        match self {
            Direction::Buy => Direction::Sell,
            Direction::Sell => Direction::Buy,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Direction {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "buy" => Ok(Direction::Buy),
            "sell" => Ok(Direction::Sell),
            _ => Err(()),
        }
    }
}
