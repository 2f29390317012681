//! `fieldmask hash` implementation.
//!
//! Lets an operator compute the digest a hashed field would carry, so log
//! lines for a known value can be found without un-hashing anything.

use anyhow::{anyhow, Result};
use serde_json::Value;

use fieldmask_core::SanitizerConfig;

pub fn run_hash(config: &SanitizerConfig, value: &str) -> Result<String> {
    let key = config.hash_key()?.ok_or_else(|| {
        anyhow!("No secret_key_base configured; set FIELDMASK_SECRET_KEY_BASE or add it to the settings file")
    })?;
    Ok(key.hash_value(&Value::String(value.to_string()))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requires_a_secret() {
        assert!(run_hash(&SanitizerConfig::default(), "x").is_err());
    }

    #[test]
    fn matches_engine_digest_for_strings() -> Result<()> {
        let config = SanitizerConfig {
            secret_key_base: Some("0123456789abcdef".to_string()),
            ..Default::default()
        };
        let key = config.hash_key()?.expect("key");
        assert_eq!(run_hash(&config, "jane")?, key.hash_str("jane")?);
        Ok(())
    }
}
