//! Tour cost evaluation.

mod evaluator;

pub(crate) use evaluator::cyclic_cost;
pub use evaluator::{tour_cost, validate_order};
