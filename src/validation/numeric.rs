//! Text to number coercion for form fields.

use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use super::IssueKind;
use crate::models::{Position, Price};

/// Coerce form text to a decimal.
///
/// Blank text coerces to zero. Scientific notation is accepted. Text that
/// cannot be held without rounding (more than 28 decimal places) is rejected
/// rather than rounded.
pub(crate) fn coerce_number(text: &str) -> Result<Decimal, IssueKind> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(Decimal::ZERO);
    }

    let value = match Decimal::from_str_exact(text) {
        Ok(value) => value,
        // Parses, but only by rounding.
        Err(_) if Decimal::from_str(text).is_ok() => return Err(IssueKind::TooPrecise),
        Err(_) => Decimal::from_scientific(text).map_err(|_| IssueKind::NotANumber)?,
    };

    // A nonzero mantissa must not come out as zero.
    if value.is_zero() && has_nonzero_digit(text) {
        return Err(IssueKind::TooPrecise);
    }
    Ok(value)
}

fn has_nonzero_digit(text: &str) -> bool {
    text.split(['e', 'E'])
        .next()
        .is_some_and(|mantissa| mantissa.chars().any(|c| matches!(c, '1'..='9')))
}

/// Lot sizes: positive, fractional allowed.
pub(crate) fn parse_lot(text: &str) -> Result<Decimal, IssueKind> {
    let lot = coerce_number(text)?;
    if lot <= Decimal::ZERO {
        return Err(IssueKind::NotPositive);
    }
    if lot > Position::MAX_LOT {
        return Err(IssueKind::TooLarge);
    }
    Ok(lot.normalize())
}

/// Prices: positive integers. `90400.0` is accepted as `90400`.
pub(crate) fn parse_price(text: &str) -> Result<Price, IssueKind> {
    let value = coerce_number(text)?;
    if !value.fract().is_zero() {
        return Err(IssueKind::NotInteger);
    }
    if value <= Decimal::ZERO {
        return Err(IssueKind::NotPositive);
    }

    value
        .to_u64()
        .and_then(Price::new)
        .ok_or(IssueKind::TooLarge)
}
