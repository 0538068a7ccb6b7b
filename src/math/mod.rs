//! Mathematical utilities: special functions, grids, and summary statistics.

pub mod grid;
pub mod special;
pub mod stats;

pub use grid::*;
pub use special::*;
pub use stats::*;
