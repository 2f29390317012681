// File: fieldmask-core/src/profiles.rs

//! profiles.rs - Sanitizer profile data structures and parsing.
//!
//! A profile maps entity names to entity profiles; an entity profile maps field
//! names to actions. Profiles are written in YAML:
//!
//! ```yaml
//! contact:
//!   email: hash
//!   phone: suppress
//!   address:
//!     line1: suppress
//!     city: hash
//! ```
//!
//! Actions are parsed once, at load time, into the closed [`Action`] enum so the
//! sanitizer never has to inspect raw YAML while walking a record. A nested
//! mapping becomes [`Action::Nested`]; a sequence of mappings is merged, in
//! order, into a single nested profile. `hash` becomes [`Action::Hash`]. Every
//! other scalar, including `suppress` and an empty value, becomes
//! [`Action::Suppress`].
//!
//! Entity keys are stored in canonical form (see [`crate::canonicalize`]);
//! field names are kept exactly as written.
//!
//! license: MIT OR Apache-2.0

use log::{debug, warn};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_yml::Value;
use std::collections::BTreeMap;

use crate::canonicalize::canonical_entity_name;
use crate::errors::{FieldmaskError, Result};

/// Directive that replaces a field's value with its keyed digest.
pub const HASH_DIRECTIVE: &str = "hash";
/// Directive that replaces a field's value with `null`.
pub const SUPPRESS_DIRECTIVE: &str = "suppress";

/// Per-field sanitization directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Suppress,
    Hash,
    /// Recurse into the field with this profile instead of looking one up.
    Nested(EntityProfile),
}

/// Field name to action mapping for one entity (or one nested level).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityProfile {
    fields: BTreeMap<String, Action>,
}

impl EntityProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insertion, mostly useful for hosts that assemble
    /// profiles in code.
    pub fn with_field(mut self, field: impl Into<String>, action: Action) -> Self {
        self.fields.insert(field.into(), action);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, action: Action) -> Option<Action> {
        self.fields.insert(field.into(), action)
    }

    pub fn get(&self, field: &str) -> Option<&Action> {
        self.fields.get(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Action)> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// The full entity-name-indexed sanitization configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Profile {
    entities: BTreeMap<String, EntityProfile>,
}

impl Profile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) the profile for an entity. The name is canonicalized.
    pub fn with_entity(mut self, entity: &str, profile: EntityProfile) -> Self {
        self.entities.insert(canonical_entity_name(entity), profile);
        self
    }

    /// Looks up an entity profile. `entity` may be in any naming convention.
    pub fn entity(&self, entity: &str) -> Option<&EntityProfile> {
        self.entities.get(&canonical_entity_name(entity))
    }

    pub fn entity_names(&self) -> impl Iterator<Item = &str> {
        self.entities.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Parses a profile from YAML text. `source` names the document in errors.
    pub fn from_yaml_str(text: &str, source: &str) -> Result<Self> {
        let value: Value = serde_yml::from_str(text)
            .map_err(|e| FieldmaskError::ProfileParse(source.to_string(), e.to_string()))?;
        Self::from_yaml_value(&value)
    }

    /// Builds a profile from an already parsed YAML document.
    pub fn from_yaml_value(value: &Value) -> Result<Self> {
        let mapping = match value {
            // An empty document configures nothing.
            Value::Null => return Ok(Self::default()),
            Value::Mapping(m) => m,
            other => {
                return Err(FieldmaskError::ProfileShape(
                    "<root>".to_string(),
                    format!("expected a mapping of entity names, found {}", yaml_kind(other)),
                ))
            }
        };

        let mut entities = BTreeMap::new();
        for (key, entry) in mapping {
            let raw_name = key_to_string(key, "<root>")?;
            let name = canonical_entity_name(&raw_name);
            if entry.is_null() {
                debug!("Entity '{}' has an empty profile; its records pass through untouched.", name);
                continue;
            }
            let profile = parse_nested(entry, &name).map_err(|e| match e {
                FieldmaskError::ProfileShape(path, msg) if path == name => FieldmaskError::ProfileShape(
                    path,
                    format!("entity profiles must be mappings ({})", msg),
                ),
                other => other,
            })?;
            if entities.insert(name.clone(), profile).is_some() {
                warn!("Entity '{}' is defined more than once (after name canonicalization); the last definition wins.", name);
            }
        }

        debug!("Parsed sanitizer profile with {} entities.", entities.len());
        Ok(Self { entities })
    }
}

fn parse_nested(value: &Value, path: &str) -> Result<EntityProfile> {
    match value {
        Value::Mapping(mapping) => {
            let mut profile = EntityProfile::new();
            for (key, action) in mapping {
                let field = key_to_string(key, path)?;
                let field_path = format!("{}.{}", path, field);
                let parsed = parse_action(action, &field_path)?;
                profile.insert(field, parsed);
            }
            Ok(profile)
        }
        Value::Sequence(items) => {
            let mut merged = EntityProfile::new();
            for (idx, item) in items.iter().enumerate() {
                let item_path = format!("{}[{}]", path, idx);
                if !matches!(item, Value::Mapping(_)) {
                    return Err(FieldmaskError::ProfileShape(
                        item_path,
                        format!("sequence profiles may only contain mappings, found {}", yaml_kind(item)),
                    ));
                }
                for (field, action) in parse_nested(item, &item_path)?.fields {
                    merged.fields.insert(field, action);
                }
            }
            Ok(merged)
        }
        other => Err(FieldmaskError::ProfileShape(
            path.to_string(),
            format!("found {}", yaml_kind(other)),
        )),
    }
}

fn parse_action(value: &Value, path: &str) -> Result<Action> {
    match value {
        Value::Mapping(_) | Value::Sequence(_) => Ok(Action::Nested(parse_nested(value, path)?)),
        Value::String(s) if s == HASH_DIRECTIVE => Ok(Action::Hash),
        Value::String(s) if s == SUPPRESS_DIRECTIVE => Ok(Action::Suppress),
        Value::Null => Ok(Action::Suppress),
        Value::Tagged(_) => Err(FieldmaskError::ProfileShape(
            path.to_string(),
            "tagged values are not valid actions".to_string(),
        )),
        other => {
            warn!(
                "Unrecognized action {:?} for '{}'; the field will be suppressed.",
                scalar_to_string(other).unwrap_or_default(),
                path
            );
            Ok(Action::Suppress)
        }
    }
}

fn key_to_string(key: &Value, path: &str) -> Result<String> {
    scalar_to_string(key).ok_or_else(|| {
        FieldmaskError::ProfileShape(
            path.to_string(),
            format!("keys must be scalars, found {}", yaml_kind(key)),
        )
    })
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn yaml_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

impl Serialize for Action {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Action::Suppress => serializer.serialize_str(SUPPRESS_DIRECTIVE),
            Action::Hash => serializer.serialize_str(HASH_DIRECTIVE),
            Action::Nested(profile) => profile.serialize(serializer),
        }
    }
}

impl Serialize for EntityProfile {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (field, action) in &self.fields {
            map.serialize_entry(field, action)?;
        }
        map.end()
    }
}

impl Serialize for Profile {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entities.len()))?;
        for (entity, profile) in &self.entities {
            map.serialize_entry(entity, profile)?;
        }
        map.end()
    }
}
