//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - Galactic component/model enums (`GxComponent`, `GxModel`)
//! - fixed-population row filters (`RowFilter`)
//! - GW outputs (`SnrRecord`, `PsdRecord`, `ForegroundBin`)
//! - stage configuration (`SampleConfig`, `LisaConfig`)

pub mod types;

pub use types::*;
