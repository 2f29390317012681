//! errors.rs - Custom error types for the fieldmask-core library.
//!
//! This module defines a structured error enum for the library. Every variant
//! is raised internally and either propagated to configuration code or caught
//! at the sanitizer's failure boundary, where it becomes a logged warning.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// Result alias used throughout `fieldmask-core`.
pub type Result<T> = std::result::Result<T, FieldmaskError>;

/// This enum represents all possible error types in the `fieldmask-core` library.
///
/// Messages never include field values, only field and entity names, so they
/// are safe to write to the same log stream the sanitizer protects.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum FieldmaskError {
    #[error("Failed to parse sanitizer profile '{0}': {1}")]
    ProfileParse(String, String),

    #[error("Invalid sanitizer profile structure at '{0}': {1}")]
    ProfileShape(String, String),

    #[error("Sanitizer profile could not be loaded: {0}")]
    ProfileUnavailable(String),

    #[error("Cannot apply the profile for '{0}' to a {1} value")]
    UnexpectedShape(String, &'static str),

    #[error("Field '{0}' requires hashing but no secret key is configured")]
    MissingKey(String),

    #[error("Invalid hashing key: {0}")]
    KeyError(String),

    #[error("An unexpected I/O error occurred: {0}")]
    IoError(#[from] std::io::Error),

    #[error("A fatal error occurred: {0}")]
    Fatal(String),
}
