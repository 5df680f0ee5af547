//! Profit/loss calculator for open positions on a single pair.
//!
//! Positions are entered as text, checked by [`validation`], and valued at a
//! hypothetical close by [`valuation::calculate_total_value`]. [`form`] holds
//! the editable state a front end works on between calculations.

pub mod config;
pub mod form;
pub mod models;
pub mod report;
pub mod session;
pub mod validation;
pub mod valuation;

pub use config::CalculatorConfig;
pub use form::CalculatorForm;
pub use models::{CalculationRequest, Direction, Pair, Position, Price};
pub use validation::{validate_position, validate_request, PositionInput, RequestInput, ValidationError};
pub use valuation::{calculate_total_value, Valuation};
