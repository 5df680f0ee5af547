//! Data model: pairs, directions, prices and positions.

mod direction;
mod pair;
mod position;
mod price;

pub use direction::Direction;
pub use pair::Pair;
pub use position::{CalculationRequest, Position};
pub use price::Price;
