//! Validation gate between raw form input and the valuation engine.
//!
//! Every function here is pure: text goes in, either a strongly typed model
//! or a [`ValidationError`] listing each offending field comes out.

mod error;
mod input;
mod numeric;

pub use error::{FieldIssue, FieldPath, IssueKind, PositionField, ValidationError};
pub use input::{PositionInput, RequestInput};

use tracing::debug;

use crate::models::{CalculationRequest, Direction, Pair, Position, Price};

/// Parse a pair selection.
pub fn parse_pair(text: Option<&str>) -> Result<Pair, IssueKind> {
    let text = required(text)?;
    text.parse()
        .map_err(|_| IssueKind::UnknownPair(text.to_string()))
}

/// Parse a direction selection.
pub fn parse_direction(text: Option<&str>) -> Result<Direction, IssueKind> {
    let text = required(text)?;
    text.parse()
        .map_err(|_| IssueKind::UnknownDirection(text.to_string()))
}

/// Validate the closing price field on its own.
pub fn validate_close(text: Option<&str>) -> Result<Price, ValidationError> {
    required(text)
        .and_then(numeric::parse_price)
        .map_err(|kind| ValidationError::single(FieldPath::Close, kind))
}

/// Validate a single position, e.g. before adding it to the form.
pub fn validate_position(input: &PositionInput) -> Result<Position, ValidationError> {
    let mut issues = Vec::new();

    check_position(input, None, &mut issues).ok_or_else(|| {
        let err = ValidationError::new(issues);
        debug!(error = %err, "Position rejected");
        err
    })
}

/// Validate the whole form, reporting every offending field.
pub fn validate_request(input: &RequestInput) -> Result<CalculationRequest, ValidationError> {
    let mut issues = Vec::new();

    let pair = record(parse_pair(input.pair.as_deref()), FieldPath::Pair, &mut issues);
    let close = record(
        required(input.close.as_deref()).and_then(numeric::parse_price),
        FieldPath::Close,
        &mut issues,
    );
    let positions: Vec<Option<Position>> = input
        .positions
        .iter()
        .enumerate()
        .map(|(i, position)| check_position(position, Some(i), &mut issues))
        .collect();

    match (pair, close, positions.into_iter().collect::<Option<Vec<_>>>()) {
        (Some(pair), Some(close), Some(positions)) => {
            Ok(CalculationRequest::new(pair, close, positions))
        }
        _ => {
            let err = ValidationError::new(issues);
            debug!(
                issues = err.issues().len(),
                positions = input.positions.len(),
                "Calculation request rejected"
            );
            Err(err)
        }
    }
}

/// Returns `None` only after recording at least one issue.

fn check_position(
    input: &PositionInput,
    index: Option<usize>,
    issues: &mut Vec<FieldIssue>,
) -> Option<Position> {
    let path = |field| FieldPath::position(index, field);

    let direction = record(
        parse_direction(input.direction.as_deref()),
        path(PositionField::Direction),
        issues,
    );
    let lot = record(
        required(input.lot.as_deref()).and_then(numeric::parse_lot),
        path(PositionField::Lot),
        issues,
    );
    let open = record(
        required(input.open.as_deref()).and_then(numeric::parse_price),
        path(PositionField::Open),
        issues,
    );

    // `parse_lot` enforces the same bounds as `Position::new`.
    Position::new(direction?, lot?, open?)
}

fn required(text: Option<&str>) -> Result<&str, IssueKind> {
    text.map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(IssueKind::Missing)
}

fn record<T>(
    result: Result<T, IssueKind>,
    field: FieldPath,
    issues: &mut Vec<FieldIssue>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(kind) => {
            issues.push(FieldIssue { field, kind });
            None
        }
    }
}
