//! Kernel density estimation utilities.
//!
//! - logit-space transform that preserves parameter bounds (`transform`)
//! - Knuth's rule bandwidth selection (`bandwidth`)
//! - multivariate Gaussian KDE with resampling (`gaussian`)

pub mod bandwidth;
pub mod gaussian;
pub mod transform;

pub use bandwidth::*;
pub use gaussian::*;
pub use transform::*;
