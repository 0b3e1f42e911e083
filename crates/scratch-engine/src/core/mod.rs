pub use self::{grid::*, position::*};

pub(crate) mod grid;
pub(crate) mod position;
