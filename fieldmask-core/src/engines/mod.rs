// fieldmask-core/src/engines/mod.rs
//! This module contains the sanitization engine implementations.
//!
//! Each engine lives in its own file and implements the `SanitizationEngine`
//! trait. `profile_engine` is the YAML-profile driven record sanitizer.
//!
//! # License
//! MIT OR Apache-2.0

pub mod profile_engine;
