//! Gravitational-wave calculations for LISA.
//!
//! - constants and unit conversions (`constants`)
//! - eccentric-binary harmonics and strain (`eccentric`)
//! - instrument sensitivity (`noise`)
//! - per-binary SNR (`snr`)
//! - population PSD and foreground (`psd`)

pub mod constants;
pub mod eccentric;
pub mod noise;
pub mod psd;
pub mod snr;

pub use eccentric::*;
pub use noise::*;
pub use psd::*;
pub use snr::*;
