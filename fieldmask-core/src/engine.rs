// fieldmask-core/src/engine.rs
//! Defines the core SanitizationEngine trait.
//!
//! Hosts (log formatters, outbound payload builders, the CLI) depend on this
//! trait rather than on a concrete engine, so they can be handed a shared
//! engine or a test double.
//!
//! License: MIT OR APACHE 2.0

use log::warn;
use serde_json::Value;

use crate::errors::Result;
use crate::profiles::EntityProfile;

/// A trait that defines the core functionality of a record sanitization engine.
pub trait SanitizationEngine: Send + Sync {
    /// Sanitizes `data` (a record or a collection of records) of type `entity`,
    /// optionally governed by an explicit profile instead of a store lookup.
    ///
    /// This is the fallible core. Implementations must never return a value
    /// that still contains data their profile asks to suppress or hash.
    fn try_sanitize(
        &self,
        entity: &str,
        data: &Value,
        explicit_profile: Option<&EntityProfile>,
    ) -> Result<Value>;

    /// Returns true when a profile source was found for this engine.
    fn is_configured(&self) -> bool;

    /// Failure boundary around [`SanitizationEngine::try_sanitize`].
    ///
    /// Errors are logged as a warning and turned into `None`. Callers must
    /// treat `None` as "could not sanitize" and must not fall back to `data`.
    fn sanitize_with(
        &self,
        entity: &str,
        data: &Value,
        explicit_profile: Option<&EntityProfile>,
    ) -> Option<Value> {
        match self.try_sanitize(entity, data, explicit_profile) {
            Ok(sanitized) => Some(sanitized),
            Err(e) => {
                warn!("Error masking data for entity '{}': {}", entity, e);
                None
            }
        }
    }

    /// Sanitizes `data` using the profile configured for `entity`.
    fn sanitize(&self, entity: &str, data: &Value) -> Option<Value> {
        self.sanitize_with(entity, data, None)
    }
}
