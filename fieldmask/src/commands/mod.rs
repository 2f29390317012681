// fieldmask/src/commands/mod.rs
//! Subcommand implementations.

pub mod hash;
pub mod profiles;
pub mod sanitize;
