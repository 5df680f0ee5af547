//! Tradeable pairs and their spread factors.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Tradeable pair.
///
/// Adding a variant requires an arm in [`Pair::spread_factor`], which the
/// compiler enforces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[allow(clippy::upper_case_acronyms)]
pub enum Pair {
    #[default]
    AUDCADc,
    EURUSDc,
}

impl Pair {
    /// Every pair, in the order they are offered for selection.
    pub const ALL: [Pair; 2] = [Pair::AUDCADc, Pair::EURUSDc];

    /// Display label, e.g. `AUDCADc`.
    pub fn label(&self) -> &'static str {
        match self {
            Pair::AUDCADc => "AUDCADc",
            Pair::EURUSDc => "EURUSDc",
        }
    }

    /// Wire value, e.g. `audcadc`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Pair::AUDCADc => "audcadc",
            Pair::EURUSDc => "eurusdc",
        }
    }

    /// Multiplier applied to lot size during valuation.
    pub fn spread_factor(&self) -> Decimal {
        match self {
            Pair::AUDCADc => dec!(0.73),
            Pair::EURUSDc => Decimal::ONE,
        }
    }
}

impl fmt::Display for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Pair {
    type Err = ();

    /// Accepts either the label or the wire value, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Pair::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(wanted))
            .ok_or(())
    }
}
