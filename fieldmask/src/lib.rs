// fieldmask/src/lib.rs
//! # fieldmask CLI Application
//!
//! This crate provides the command-line interface for `fieldmask-core`:
//! sanitizing JSON/YAML records against a sanitizer profile, inspecting that
//! profile, and computing field digests.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;
