//! In-memory calculator form: the state a front end edits between
//! calculations.
//!
//! Any edit clears the last computed total so a stale number is never shown
//! against inputs it was not computed from.

use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::config::CalculatorConfig;
use crate::models::{CalculationRequest, Pair, Position};
use crate::validation::{self, PositionInput, ValidationError};
use crate::valuation::{calculate_total_value, Valuation};

/// Calculator form state.
#[derive(Debug, Clone)]
pub struct CalculatorForm {
    config: CalculatorConfig,
    pair: Pair,
    close: String,
    positions: Vec<Position>,
    total: Option<Decimal>,
}

impl CalculatorForm {
    /// Create an empty form with the configured default pair.
    pub fn new(config: CalculatorConfig) -> Self {
        Self {
            pair: config.default_pair,
            config,
            close: String::new(),
            positions: Vec::new(),
            total: None,
        }
    }

    pub fn pair(&self) -> Pair {
        self.pair
    }

    /// Closing price as entered.
    pub fn close(&self) -> &str {
        &self.close
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// Decimal places used for display.
    pub fn precision(&self) -> u32 {
        self.config.precision
    }

    /// Last computed total, cleared by any edit.
    pub fn total(&self) -> Option<Decimal> {
        self.total
    }

    pub fn set_pair(&mut self, pair: Pair) {
        self.pair = pair;
        self.invalidate();
    }

    pub fn set_close(&mut self, close: impl Into<String>) {
        self.close = close.into();
        self.invalidate();
    }

    /// Validate and append a position.
    pub fn add_position(&mut self, input: &PositionInput) -> Result<Position, ValidationError> {
        let position = validation::validate_position(input)?;
        debug!(
            direction = %position.direction(),
            lot = %position.lot(),
            open = %position.open(),
            "Position added"
        );
        self.positions.push(position.clone());
        self.invalidate();
        Ok(position)
    }

    /// Remove the position at `index` (zero-based).
    pub fn remove_position(&mut self, index: usize) -> Option<Position> {
        if index >= self.positions.len() {
            return None;
        }
        let removed = self.positions.remove(index);
        debug!(index, "Position removed");
        self.invalidate();
        Some(removed)
    }

    /// Restore defaults: configured pair, empty close, no positions.
    pub fn reset(&mut self) {
        self.pair = self.config.default_pair;
        self.close.clear();
        self.positions.clear();
        self.invalidate();
    }

    /// Calculation needs at least one position.
    pub fn can_calculate(&self) -> bool {
        !self.positions.is_empty()
    }

    /// Snapshot the current inputs as a validated request.
    pub fn request(&self) -> Result<CalculationRequest, ValidationError> {
        let close = validation::validate_close(Some(self.close.as_str()))?;
        Ok(CalculationRequest::new(self.pair, close, self.positions.clone()))
    }

    /// Validate, value and remember the total.
    pub fn calculate(&mut self) -> Result<Decimal, ValidationError> {
        let request = self.request()?;
        let total = calculate_total_value(&request);
        info!(
            pair = %request.pair(),
            close = %request.close(),
            positions = request.positions().len(),
            total = %total,
            "Total value calculated"
        );
        self.total = Some(total);
        Ok(total)
    }

    /// Itemised valuation of the current inputs. Does not store a total.
    pub fn valuation(&self) -> Result<Valuation, ValidationError> {
        self.request().map(|request| Valuation::of(&request))
    }

    /// Total formatted to the configured precision, zero when cleared.
    pub fn display_total(&self) -> String {
        format_value(self.total.unwrap_or(Decimal::ZERO), self.config.precision)
    }

    /// `Total value: 400.00 (1 position)`
    pub fn summary(&self) -> String {
        let count = self.positions.len();
        format!(
            "Total value: {} ({} position{})",
            self.display_total(),
            count,
            if count == 1 { "" } else { "s" }
        )
    }

    fn invalidate(&mut self) {
        self.total = None;
    }
}

impl Default for CalculatorForm {
    fn default() -> Self {
        Self::new(CalculatorConfig::default())
    }
}

/// Round half away from zero to `precision` decimals and pad.
pub fn format_value(value: Decimal, precision: u32) -> String {
    let rounded = value.round_dp_with_strategy(
        precision,
        rust_decimal::RoundingStrategy::MidpointAwayFromZero,
    );
    format!("{:.*}", precision as usize, rounded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Direction;
    use crate::validation::{FieldPath, IssueKind};
    use rust_decimal_macros::dec;

    fn filled_form() -> CalculatorForm {
        let mut form = CalculatorForm::default();
        form.set_pair(Pair::EURUSDc);
        form.set_close("90800");
        form.add_position(&PositionInput::new("buy", "1", "90400")).unwrap();
        form
    }

    #[test]
    fn test_new_form_defaults() {
        let form = CalculatorForm::default();
        assert_eq!(form.pair(), Pair::AUDCADc);
        assert_eq!(form.close(), "");
        assert!(form.positions().is_empty());
        assert_eq!(form.total(), None);
        assert!(!form.can_calculate());
        assert_eq!(form.summary(), "Total value: 0.00 (0 positions)");
    }

    #[test]
    fn test_calculate_stores_total() {
        let mut form = filled_form();
        assert_eq!(form.calculate().unwrap(), dec!(400));
        assert_eq!(form.total(), Some(dec!(400)));
        assert_eq!(form.summary(), "Total value: 400.00 (1 position)");
    }

    #[test]
    fn test_edits_clear_total() {
        let mut form = filled_form();

        form.calculate().unwrap();
        form.add_position(&PositionInput::new("sell", "2", "90400")).unwrap();
        assert_eq!(form.total(), None);

        form.calculate().unwrap();
        assert_eq!(form.total(), Some(dec!(-400)));
        form.remove_position(1);
        assert_eq!(form.total(), None);

        form.calculate().unwrap();
        form.set_close("90400");
        assert_eq!(form.total(), None);

        form.calculate().unwrap();
        form.set_pair(Pair::AUDCADc);
        assert_eq!(form.total(), None);

        form.calculate().unwrap();
        form.reset();
        assert_eq!(form.total(), None);
    }

    #[test]
    fn test_added_position_is_returned() {
        let mut form = filled_form();
        let added = form
            .add_position(&PositionInput::new("sell", "2.5", "90500"))
            .unwrap();
        assert_eq!(added.direction(), Direction::Sell);
        assert_eq!(added.lot(), dec!(2.5));
        assert_eq!(form.positions().last(), Some(&added));
        assert_eq!(form.positions().len(), 2);
    }

    #[test]
    fn test_rejected_position_is_not_added() {
        let mut form = filled_form();
        form.calculate().unwrap();

        let err = form
            .add_position(&PositionInput::new("buy", "0", "90400"))
            .unwrap_err();
        assert_eq!(err.issues().len(), 1);
        assert_eq!(form.positions().len(), 1);
        assert_eq!(form.total(), Some(dec!(400)));
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut form = filled_form();
        form.calculate().unwrap();
        assert!(form.remove_position(5).is_none());
        assert_eq!(form.positions().len(), 1);
        assert_eq!(form.total(), Some(dec!(400)));
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut form = filled_form();
        form.add_position(&PositionInput::new("sell", "2", "90500")).unwrap();
        form.add_position(&PositionInput::new("buy", "3", "90600")).unwrap();

        let removed = form.remove_position(1).unwrap();
        assert_eq!(removed.direction(), Direction::Sell);
        let lots: Vec<Decimal> = form.positions().iter().map(|p| p.lot()).collect();
        assert_eq!(lots, vec![dec!(1), dec!(3)]);
    }

    #[test]
    fn test_reset_restores_configured_defaults() {
        let config = CalculatorConfig {
            default_pair: Pair::EURUSDc,
            precision: 2,
        };
        let mut form = CalculatorForm::new(config);
        form.set_pair(Pair::AUDCADc);
        form.set_close("1");
        form.add_position(&PositionInput::new("buy", "1", "2")).unwrap();

        form.reset();
        assert_eq!(form.pair(), Pair::EURUSDc);
        assert_eq!(form.close(), "");
        assert!(form.positions().is_empty());
    }

    #[test]
    fn test_calculate_requires_valid_close() {
        let mut form = filled_form();
        form.set_close("");
        let err = form.calculate().unwrap_err();
        assert_eq!(err.issue_for(FieldPath::Close), Some(&IssueKind::Missing));
        assert_eq!(form.total(), None);

        form.set_close("908.5");
        let err = form.calculate().unwrap_err();
        assert_eq!(err.issue_for(FieldPath::Close), Some(&IssueKind::NotInteger));
    }

    #[test]
    fn test_valuation_does_not_store_total() {
        let form = filled_form();
        let valuation = form.valuation().unwrap();
        assert_eq!(valuation.total, dec!(400));
        assert_eq!(form.total(), None);
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(dec!(292), 2), "292.00");
        assert_eq!(format_value(dec!(-0.005), 2), "-0.01");
        assert_eq!(format_value(dec!(1.23456), 4), "1.2346");
        assert_eq!(format_value(dec!(7.5), 0), "8");
    }

    #[test]
    fn test_summary_with_precision() {
        let mut form = CalculatorForm::new(CalculatorConfig {
            default_pair: Pair::AUDCADc,
            precision: 3,
        });
        form.set_close("90401");
        form.add_position(&PositionInput::new("buy", "0.01", "90400")).unwrap();
        form.add_position(&PositionInput::new("buy", "1", "90400")).unwrap();
        form.calculate().unwrap();
        // 1.01 * 0.73 * 1
        assert_eq!(form.summary(), "Total value: 0.737 (2 positions)");
    }
}
