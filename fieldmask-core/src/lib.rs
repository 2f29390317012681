// fieldmask-core/src/lib.rs
//! # fieldmask Core Library
//!
//! `fieldmask-core` keeps sensitive record fields out of logs and downstream
//! sinks. A declarative YAML profile names, per entity type, which fields to
//! suppress, which to replace with a keyed digest, and which to recurse into
//! with a nested profile. The engine produces a sanitized deep copy and never
//! mutates its input.
//!
//! ## Modules
//!
//! * `profiles`: The `Profile`, `EntityProfile` and `Action` types and YAML parsing.
//! * `store`: `ProfileStore`, which resolves profile sources and caches them.
//! * `engine`: The `SanitizationEngine` trait and its failure boundary.
//! * `engines`: Concrete engines (`ProfileEngine`).
//! * `hashing`: Keyed HMAC-SHA256 digests for the `hash` action.
//! * `canonicalize`: Entity name normalization.
//! * `config`: File and environment configuration.
//! * `headless`: One-shot helpers.
//! * `errors`: `FieldmaskError`.
//!
//! ## Usage Example
//!
//! ```rust
//! use std::sync::Arc;
//! use fieldmask_core::{HashKey, Profile, ProfileEngine, SanitizationEngine};
//! use serde_json::json;
//!
//! let profile = Profile::from_yaml_str("contact:\n  email: hash\n  phone: suppress\n", "inline")?;
//! let key = HashKey::from_secret("0123456789abcdef-application-secret")?;
//! let engine = ProfileEngine::with_profile(Arc::new(profile), Some(key));
//!
//! let out = engine
//!     .sanitize("Contact", &json!({ "email": "a@b.c", "phone": "555-0100", "id": 1 }))
//!     .expect("sanitized");
//! assert_eq!(out["phone"], json!(null));
//! assert_eq!(out["id"], json!(1));
//! # Ok::<(), fieldmask_core::FieldmaskError>(())
//! ```
//!
//! ## Error Handling
//!
//! Internally every step returns `Result<_, FieldmaskError>`. The public
//! `SanitizationEngine::sanitize` converts an error into a `warn!` log line and
//! `None`; it never hands back the unsanitized input.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod canonicalize;
pub mod config;
pub mod engine;
pub mod engines;
pub mod errors;
pub mod hashing;
pub mod headless;
pub mod profiles;
pub mod store;

pub use canonicalize::canonical_entity_name;
pub use config::SanitizerConfig;
pub use engine::SanitizationEngine;
pub use engines::profile_engine::{is_blank, ProfileEngine};
pub use errors::{FieldmaskError, Result};
pub use hashing::HashKey;
pub use headless::{build_engine, headless_sanitize};
pub use profiles::{Action, EntityProfile, Profile};
pub use store::{ProfileStore, DEFAULT_PROFILE_ID};
