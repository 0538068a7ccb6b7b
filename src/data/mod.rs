//! In-memory tabular data: fixed populations and realizations.

pub mod population;
pub mod table;

pub use population::*;
pub use table::*;
