//! `gxreal` library crate.
//!
//! The binary (`gxreal`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - `GxReal` can be driven from other tools (batch scripts, notebooks, etc.)
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod gw;
pub mod gxreal;
pub mod io;
pub mod kde;
pub mod logging;
pub mod math;
pub mod plot;
pub mod report;
pub mod sampling;

pub use gxreal::{GxReal, LisaObservation, SampleDiagnostics};
