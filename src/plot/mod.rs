//! Terminal plots.

pub mod ascii;

pub use ascii::render_foreground_plot;
