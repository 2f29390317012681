// File: fieldmask-core/src/headless.rs

//! `headless.rs`
//! Convenience wrappers for building an engine straight from a
//! [`SanitizerConfig`] and running one-shot sanitization.

use anyhow::Result;
use serde_json::Value;

use crate::config::SanitizerConfig;
use crate::engine::SanitizationEngine;
use crate::engines::profile_engine::ProfileEngine;
use crate::store::ProfileStore;

/// Builds a `ProfileEngine` from configuration using a store rooted at
/// `config.config_root`.
///
/// Fails only when the configured secret cannot be turned into a key. A
/// missing profile yields an identity engine, and a malformed one yields an
/// engine whose every call fails closed.
pub fn build_engine(config: &SanitizerConfig, store: &ProfileStore) -> Result<ProfileEngine> {
    let hash_key = config.hash_key()?;
    Ok(ProfileEngine::new(store, &config.profile, hash_key))
}

/// Sanitizes a single value in one call. Returns `None` when sanitization
/// could not be performed; the reason is logged as a warning.
pub fn headless_sanitize(config: &SanitizerConfig, entity: &str, data: &Value) -> Result<Option<Value>> {
    let store = ProfileStore::new(config.config_root.clone());
    let engine = build_engine(config, &store)?;
    Ok(engine.sanitize(entity, data))
}
