//! Keyed hashing for field values.
//!
//! Hashed fields are replaced with `base64(HMAC-SHA256(key, value))`. The key
//! is derived from the process secret (`secret_key_base`), so digests are
//! stable across calls and hosts that share the secret, which is what makes
//! them useful for correlating log lines without exposing the raw value.
//!
//! License: MIT OR Apache-2.0

use base64::{engine::general_purpose, Engine as _};
use hmac::{Hmac, Mac};
use serde_json::Value;
use sha2::Sha256;
use std::fmt;

use crate::errors::{FieldmaskError, Result};

type HmacSha256 = Hmac<Sha256>;

/// Number of leading secret bytes used as the hashing key.
pub const KEY_LEN: usize = 16;

/// Symmetric key for field hashing.
#[derive(Clone, PartialEq, Eq)]
pub struct HashKey {
    key: [u8; KEY_LEN],
}

impl HashKey {
    /// Derives a key from the first [`KEY_LEN`] bytes of the application secret.
    pub fn from_secret(secret_key_base: &str) -> Result<Self> {
        let bytes = secret_key_base.as_bytes();
        if bytes.len() < KEY_LEN {
            return Err(FieldmaskError::KeyError(format!(
                "secret must be at least {} bytes, got {}",
                KEY_LEN,
                bytes.len()
            )));
        }
        let mut key = [0u8; KEY_LEN];
        key.copy_from_slice(&bytes[..KEY_LEN]);
        Ok(Self { key })
    }

    pub fn from_bytes(key: [u8; KEY_LEN]) -> Self {
        Self { key }
    }

    /// Hashes the string form of `value` and returns the base64 digest.
    pub fn hash_value(&self, value: &Value) -> Result<String> {
        self.hash_str(&value_to_string(value))
    }

    pub fn hash_str(&self, input: &str) -> Result<String> {
        let mut mac = HmacSha256::new_from_slice(&self.key)
            .map_err(|e| FieldmaskError::KeyError(format!("Failed to initialize HMAC-SHA256: {}", e)))?;
        mac.update(input.as_bytes());
        Ok(general_purpose::STANDARD.encode(mac.finalize().into_bytes()))
    }
}

// Key bytes stay out of debug output.
impl fmt::Debug for HashKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashKey").field("key", &"[REDACTED]").finish()
    }
}

/// String form of a value as seen by the hasher: strings are taken raw,
/// other scalars via `Display`, containers as compact JSON.
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}
