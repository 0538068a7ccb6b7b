//! Monte-Carlo sampling of Galactic realizations.
//!
//! Responsibilities:
//!
//! - stellar mass of each Milky Way component
//! - mass-weighted number of systems in a realization
//! - positions and orientations drawn from the Galactic density model

pub mod component;
pub mod positions;

pub use component::*;
pub use positions::*;
