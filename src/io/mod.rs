//! Input/output helpers.
//!
//! - CSV ingest + validation (`ingest`)
//! - realization and observable exports (`export`)
//! - run summary JSON read/write (`summary`)

pub mod export;
pub mod ingest;
pub mod summary;

pub use export::*;
pub use ingest::*;
pub use summary::*;
