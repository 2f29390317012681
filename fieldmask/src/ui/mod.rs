// fieldmask/src/ui/mod.rs
//! Terminal presentation: theme, status messages and diff output.

pub mod diff_viewer;
pub mod output_format;
pub mod theme;
