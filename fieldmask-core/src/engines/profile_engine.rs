// fieldmask-core/src/engines/profile_engine.rs
//! A `SanitizationEngine` implementation driven by a YAML sanitizer profile.
//!
//! The engine walks a `serde_json::Value` and, for every field named in the
//! governing entity profile, suppresses it, replaces it with a keyed digest,
//! or recurses into it with a nested profile. Fields the profile does not
//! mention are copied through unchanged.
//! License: MIT OR APACHE 2.0

use log::{debug, warn};
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::canonicalize::canonical_entity_name;
use crate::engine::SanitizationEngine;
use crate::errors::{FieldmaskError, Result};
use crate::hashing::HashKey;
use crate::profiles::{Action, EntityProfile, Profile};
use crate::store::ProfileStore;

/// Outcome of loading the engine's profile at construction time.
#[derive(Debug)]
enum ProfileState {
    /// No profile source: the engine is the identity transform.
    Unconfigured,
    Loaded(Arc<Profile>),
    /// The source exists but could not be loaded; every call fails with this message.
    Broken(String),
}

#[derive(Debug)]
pub struct ProfileEngine {
    profile_id: String,
    state: ProfileState,
    hash_key: Option<HashKey>,
}

impl ProfileEngine {
    /// Builds an engine for `profile_id`, loading it through `store`.
    ///
    /// A malformed profile does not fail construction. The error is kept and
    /// reported by each `sanitize` call, which then yields no result.
    pub fn new(store: &ProfileStore, profile_id: &str, hash_key: Option<HashKey>) -> Self {
        let state = match store.load(profile_id) {
            Ok(Some(profile)) => ProfileState::Loaded(profile),
            Ok(None) => ProfileState::Unconfigured,
            Err(e) => {
                warn!("Sanitizer profile '{}' could not be loaded: {}", profile_id, e);
                ProfileState::Broken(e.to_string())
            }
        };
        Self {
            profile_id: profile_id.to_string(),
            state,
            hash_key,
        }
    }

    /// Builds an engine around an already loaded profile.
    pub fn with_profile(profile: Arc<Profile>, hash_key: Option<HashKey>) -> Self {
        Self {
            profile_id: "<inline>".to_string(),
            state: ProfileState::Loaded(profile),
            hash_key,
        }
    }

    /// An engine with no profile; sanitization is the identity transform.
    pub fn unconfigured() -> Self {
        Self {
            profile_id: "<none>".to_string(),
            state: ProfileState::Unconfigured,
            hash_key: None,
        }
    }

    pub fn profile_id(&self) -> &str {
        &self.profile_id
    }

    pub fn profile(&self) -> Option<&Arc<Profile>> {
        match &self.state {
            ProfileState::Loaded(p) => Some(p),
            _ => None,
        }
    }

    fn sanitize_value(
        &self,
        profile: &Profile,
        entity: &str,
        data: &Value,
        explicit: Option<&EntityProfile>,
    ) -> Result<Value> {
        match data {
            Value::Array(items) => items
                .iter()
                .map(|item| self.sanitize_value(profile, entity, item, explicit))
                .collect::<Result<Vec<_>>>()
                .map(Value::Array),
            Value::Object(record) => self.sanitize_record(profile, entity, record, explicit),
            scalar => {
                let canonical = canonical_entity_name(entity);
                match explicit.or_else(|| profile.entity(&canonical)) {
                    None => Ok(scalar.clone()),
                    Some(_) => Err(FieldmaskError::UnexpectedShape(canonical, value_kind(scalar))),
                }
            }
        }
    }

    fn sanitize_record(
        &self,
        profile: &Profile,
        entity: &str,
        record: &Map<String, Value>,
        explicit: Option<&EntityProfile>,
    ) -> Result<Value> {
        let canonical = canonical_entity_name(entity);
        let mut sanitized = record.clone();

        let governing = match explicit.or_else(|| profile.entity(&canonical)) {
            Some(p) => p,
            None => {
                debug!("No sanitizer profile for entity '{}'; passing record through.", canonical);
                return Ok(Value::Object(sanitized));
            }
        };

        for (field, action) in governing.iter() {
            let current = match sanitized.get(field) {
                Some(v) if !is_blank(v) => v,
                _ => continue,
            };

            let replacement = match action {
                Action::Nested(nested) => {
                    debug!("Recursing into field '{}' of '{}'.", field, canonical);
                    self.sanitize_value(profile, &canonical, current, Some(nested))?
                }
                Action::Hash => {
                    debug!("Hashing field '{}' of '{}'.", field, canonical);
                    let key = self
                        .hash_key
                        .as_ref()
                        .ok_or_else(|| FieldmaskError::MissingKey(format!("{}.{}", canonical, field)))?;
                    Value::String(key.hash_value(current)?)
                }
                Action::Suppress => {
                    debug!("Suppressing field '{}' of '{}'.", field, canonical);
                    Value::Null
                }
            };
            sanitized.insert(field.clone(), replacement);
        }

        Ok(Value::Object(sanitized))
    }
}

impl SanitizationEngine for ProfileEngine {
    fn try_sanitize(
        &self,
        entity: &str,
        data: &Value,
        explicit_profile: Option<&EntityProfile>,
    ) -> Result<Value> {
        match &self.state {
            ProfileState::Unconfigured => Ok(data.clone()),
            ProfileState::Broken(msg) => Err(FieldmaskError::ProfileUnavailable(msg.clone())),
            ProfileState::Loaded(profile) => self.sanitize_value(profile, entity, data, explicit_profile),
        }
    }

    fn is_configured(&self) -> bool {
        !matches!(self.state, ProfileState::Unconfigured)
    }
}

/// A field is blank when it is null, `false`, an empty or whitespace-only
/// string, or an empty collection. Blank fields are never touched.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        Value::Number(_) => false,
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
