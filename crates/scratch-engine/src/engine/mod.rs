//! Round execution: grid generation, reward evaluation and seeding.

pub use self::{evaluator::*, generator::*, round::*, round_seed::*};

mod evaluator;
mod generator;
mod round;
mod round_seed;
