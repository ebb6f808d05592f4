//! Signal evaluation and alert de-duplication.

pub mod evaluator;
pub mod rearm;

pub use evaluator::evaluate;
pub use rearm::RearmState;
