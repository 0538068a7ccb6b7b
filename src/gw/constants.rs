//! Physical constants (SI) and unit conversions.

/// Gravitational constant (m^3 kg^-1 s^-2).
pub const G: f64 = 6.674_30e-11;

/// Speed of light (m/s).
pub const C: f64 = 2.997_924_58e8;

/// Solar mass (kg).
pub const MSUN: f64 = 1.988_47e30;

/// Parsec (m).
pub const PARSEC: f64 = 3.085_677_581_491_367_3e16;

/// Julian year (s).
pub const SEC_IN_YEAR: f64 = 3.155_76e7;

/// Frequency band (Hz) over which LISA sensitivity is evaluated.
pub const LISA_F_MIN: f64 = 1e-5;
pub const LISA_F_MAX: f64 = 1.0;
