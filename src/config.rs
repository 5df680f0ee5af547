//! Calculator configuration.

use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::models::Pair;

/// Environment variable holding the pre-selected pair.
pub const DEFAULT_PAIR_VAR: &str = "PLCALC_DEFAULT_PAIR";

/// Environment variable holding the number of decimals shown for totals.
pub const PRECISION_VAR: &str = "PLCALC_PRECISION";

/// Configuration for the calculator front ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatorConfig {
    /// Pair pre-selected in a fresh form
    pub default_pair: Pair,

    /// Decimal places used when displaying totals
    pub precision: u32,
}

impl CalculatorConfig {
    /// Upper bound for `precision`.
    pub const MAX_PRECISION: u32 = 10;

    /// Load from the process environment, falling back to defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(DEFAULT_PAIR_VAR) {
            config.default_pair = value
                .parse()
                .map_err(|_| anyhow!("Invalid {}: unknown pair `{}`", DEFAULT_PAIR_VAR, value))?;
        }

        if let Some(value) = lookup(PRECISION_VAR) {
            config.precision = value
                .trim()
                .parse()
                .with_context(|| format!("Invalid {}", PRECISION_VAR))?;
            if config.precision > Self::MAX_PRECISION {
                bail!(
                    "Invalid {}: {} exceeds {}",
                    PRECISION_VAR,
                    config.precision,
                    Self::MAX_PRECISION
                );
            }
        }

        Ok(config)
    }
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            default_pair: Pair::AUDCADc,
            precision: 2,
        }
    }
}
