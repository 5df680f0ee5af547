//! Valuation engine: aggregate P&L of open positions at a hypothetical close.
//!
//! For each position:
//!
//! ```text
//! value = sign * lot * spread_factor(pair) * |open - close|
//! ```
//!
//! where `sign` is -1 when the close moved against the position's direction
//! and +1 otherwise (including a close equal to the open).

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{CalculationRequest, Pair, Position, Price};

/// Total P&L of every position in the request.
///
/// An empty request is worth zero.
pub fn calculate_total_value(request: &CalculationRequest) -> Decimal {
    request
        .positions()
        .iter()
        .map(|position| position_value(request.pair(), request.close(), position))
        .sum()
}

/// Contribution of a single position.
pub fn position_value(pair: Pair, close: Price, position: &Position) -> Decimal {
    debug_assert!(position.lot() > Decimal::ZERO, "lot must be positive");

    let adjusted_lot = position.lot() * pair.spread_factor();
    let value = position.open().distance(close) * adjusted_lot;

    if position.direction().is_adverse(position.open(), close) {
        -value
    } else {
        value
    }
}

/// One line of an itemised valuation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PositionValue {
    #[serde(flatten)]
    pub position: Position,

    /// Lot after the pair's spread factor
    #[serde(with = "rust_decimal::serde::float")]
    pub adjusted_lot: Decimal,

    /// Whether price moved against the position
    pub adverse: bool,

    #[serde(with = "rust_decimal::serde::float")]
    pub value: Decimal,
}

/// Itemised valuation of a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Valuation {
    pub pair: Pair,
    pub close: Price,
    #[serde(with = "rust_decimal::serde::float")]
    pub spread_factor: Decimal,
    pub positions: Vec<PositionValue>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

impl Valuation {
    /// Value every position and sum them.
    pub fn of(request: &CalculationRequest) -> Self {
        let pair = request.pair();
        let close = request.close();

        let positions: Vec<PositionValue> = request
            .positions()
            .iter()
            .map(|position| PositionValue {
                position: position.clone(),
                adjusted_lot: position.lot() * pair.spread_factor(),
                adverse: position.direction().is_adverse(position.open(), close),
                value: position_value(pair, close, position),
            })
            .collect();

        Self {
            pair,
            close,
            spread_factor: pair.spread_factor(),
            total: positions.iter().map(|p| p.value).sum(),
            positions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Direction;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn price(v: u64) -> Price {
        Price::new(v).unwrap()
    }

    fn pos(direction: Direction, lot: Decimal, open: u64) -> Position {
        Position::new(direction, lot, price(open)).unwrap()
    }

    fn total(pair: Pair, close: u64, positions: Vec<Position>) -> Decimal {
        calculate_total_value(&CalculationRequest::new(pair, price(close), positions))
    }

    #[test]
    fn test_buy_favorable() {
        let value = total(Pair::EURUSDc, 90800, vec![pos(Direction::Buy, dec!(1), 90400)]);
        assert_eq!(value, dec!(400));
    }

    #[test]
    fn test_buy_adverse() {
        let value = total(Pair::EURUSDc, 90400, vec![pos(Direction::Buy, dec!(1), 90800)]);
        assert_eq!(value, dec!(-400));
    }

    #[test]
    fn test_sell_adverse() {
        let value = total(Pair::EURUSDc, 90800, vec![pos(Direction::Sell, dec!(2), 90400)]);
        assert_eq!(value, dec!(-800));
    }

    #[test]
    fn test_spread_factor_applied() {
        let value = total(Pair::AUDCADc, 90800, vec![pos(Direction::Buy, dec!(1), 90400)]);
        assert_eq!(value, dec!(292));
    }

    #[test]
    fn test_mixed_positions() {
        let value = total(
            Pair::EURUSDc,
            90800,
            vec![
                pos(Direction::Buy, dec!(1), 90400),
                pos(Direction::Sell, dec!(2), 90400),
            ],
        );
        assert_eq!(value, dec!(-400));
    }

    #[test]
    fn test_empty_is_zero() {
        for pair in Pair::ALL {
            assert_eq!(total(pair, 90800, Vec::new()), Decimal::ZERO);
            assert_eq!(total(pair, 1, Vec::new()), Decimal::ZERO);
        }
    }

    #[test]
    fn test_flat_close_is_zero_both_ways() {
        for direction in Direction::ALL {
            let value = total(Pair::AUDCADc, 90400, vec![pos(direction, dec!(3), 90400)]);
            assert_eq!(value, Decimal::ZERO);
            assert!(!value.is_sign_negative());
        }
    }

    #[test]
    fn test_fractional_lot() {
        let value = total(Pair::EURUSDc, 90800, vec![pos(Direction::Buy, dec!(2.5), 90400)]);
        assert_eq!(value, dec!(1000));
    }

    #[test]
    fn test_itemised_valuation_matches_total() {
        let request = CalculationRequest::new(
            Pair::AUDCADc,
            price(90800),
            vec![
                pos(Direction::Buy, dec!(1), 90400),
                pos(Direction::Sell, dec!(2), 90400),
            ],
        );
        let valuation = Valuation::of(&request);

        assert_eq!(valuation.spread_factor, dec!(0.73));
        assert_eq!(valuation.positions[0].adjusted_lot, dec!(0.73));
        assert!(!valuation.positions[0].adverse);
        assert_eq!(valuation.positions[0].value, dec!(292));
        assert!(valuation.positions[1].adverse);
        assert_eq!(valuation.positions[1].value, dec!(-584));
        assert_eq!(valuation.total, calculate_total_value(&request));
        assert_eq!(valuation.total, dec!(-292));
    }

    #[test]
    fn test_json_amounts_are_numbers() {
        let request = CalculationRequest::new(
            Pair::AUDCADc,
            price(90800),
            vec![pos(Direction::Sell, dec!(2.5), 90400)],
        );
        let json = serde_json::to_value(Valuation::of(&request)).unwrap();
        let number = |value: &serde_json::Value| value.as_f64().unwrap();

        assert_eq!(json["pair"], "audcadc");
        assert_eq!(json["close"], 90800);
        assert!((number(&json["spread_factor"]) - 0.73).abs() < 1e-12);
        assert!((number(&json["total"]) + 730.0).abs() < 1e-9);
        let line = &json["positions"][0];
        assert_eq!(line["direction"], "sell");
        assert!((number(&line["lot"]) - 2.5).abs() < 1e-12);
        assert_eq!(line["open"], 90400);
        assert!((number(&line["adjusted_lot"]) - 1.825).abs() < 1e-12);
        assert_eq!(line["adverse"], true);
        assert!((number(&line["value"]) + 730.0).abs() < 1e-9);
    }

    fn direction_strategy() -> impl Strategy<Value = Direction> {
        prop_oneof![Just(Direction::Buy), Just(Direction::Sell)]
    }

    fn pair_strategy() -> impl Strategy<Value = Pair> {
        prop::sample::select(Pair::ALL.to_vec())
    }

    fn position_strategy() -> impl Strategy<Value = Position> {
        (direction_strategy(), 1i64..=10_000_000, 1u64..=2_000_000).prop_map(
            |(direction, lot_hundredths, open)| pos(direction, Decimal::new(lot_hundredths, 2), open),
        )
    }

    proptest! {
        #[test]
        fn prop_sign_symmetry(position in position_strategy(), close in 1u64..=2_000_000, pair in pair_strategy()) {
            let a = total(pair, close, vec![position.clone()]);
            let b = total(pair, close, vec![position.flipped()]);
            if position.open().get() == close {
                prop_assert_eq!(a, Decimal::ZERO);
                prop_assert_eq!(b, Decimal::ZERO);
            } else {
                prop_assert_eq!(a, -b);
            }
        }

        #[test]
        fn prop_spread_scaling(position in position_strategy(), close in 1u64..=2_000_000) {
            let unit = total(Pair::EURUSDc, close, vec![position.clone()]);
            let spread = total(Pair::AUDCADc, close, vec![position]);
            prop_assert_eq!(spread, unit * Pair::AUDCADc.spread_factor());
        }

        #[test]
        fn prop_linear_in_lot(position in position_strategy(), close in 1u64..=2_000_000, pair in pair_strategy()) {
            let single = total(pair, close, vec![position.clone()]);
            let doubled = total(pair, close, vec![position.scaled(dec!(2)).unwrap()]);
            prop_assert_eq!(doubled, single * dec!(2));
        }

        #[test]
        fn prop_additive(a in position_strategy(), b in position_strategy(), close in 1u64..=2_000_000, pair in pair_strategy()) {
            let both = total(pair, close, vec![a.clone(), b.clone()]);
            let sum = total(pair, close, vec![a]) + total(pair, close, vec![b]);
            prop_assert_eq!(both, sum);
        }

        #[test]
        fn prop_order_independent(positions in prop::collection::vec(position_strategy(), 0..16), close in 1u64..=2_000_000, pair in pair_strategy()) {
            let forward = total(pair, close, positions.clone());
            let mut reversed = positions;
            reversed.reverse();
            prop_assert_eq!(forward, total(pair, close, reversed));
        }
    }
}
