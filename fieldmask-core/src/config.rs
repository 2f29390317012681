//! Configuration management for `fieldmask-core`.
//!
//! Settings come from an optional YAML file and the environment. The
//! environment wins so deployments can keep the secret out of files.
//!
//! ```yaml
//! config_root: /srv/app
//! profile: connec_sanitizer_profile.yml
//! secret_key_base: "..."
//! ```
//!
//! License: MIT OR Apache-2.0

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::hashing::HashKey;
use crate::store::{ProfileStore, DEFAULT_PROFILE_ID};

pub const ENV_CONFIG_ROOT: &str = "FIELDMASK_CONFIG_ROOT";
pub const ENV_PROFILE: &str = "FIELDMASK_PROFILE";
pub const ENV_SECRET_KEY_BASE: &str = "FIELDMASK_SECRET_KEY_BASE";
/// Conventional application secret, used when the fieldmask-specific one is unset.
pub const ENV_SECRET_KEY_BASE_FALLBACK: &str = "SECRET_KEY_BASE";

#[derive(Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SanitizerConfig {
    /// Application configuration root; profiles live in `<root>/config/profiles`.
    pub config_root: PathBuf,
    /// Profile source identifier (file name under the profiles directory).
    pub profile: String,
    /// Process secret the hashing key is derived from.
    pub secret_key_base: Option<String>,
}

impl Default for SanitizerConfig {
    fn default() -> Self {
        Self {
            config_root: PathBuf::from("."),
            profile: DEFAULT_PROFILE_ID.to_string(),
            secret_key_base: None,
        }
    }
}

impl fmt::Debug for SanitizerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SanitizerConfig")
            .field("config_root", &self.config_root)
            .field("profile", &self.profile)
            .field("secret_key_base", &self.secret_key_base.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl SanitizerConfig {
    /// Loads settings from a YAML file. Missing keys take their defaults.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading sanitizer settings from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: SanitizerConfig = serde_yml::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Applies environment overrides read from the process environment.
    pub fn apply_env(self) -> Self {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Applies environment overrides using `lookup` to read variables.
    pub fn apply_env_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(root) = non_empty(ENV_CONFIG_ROOT) {
            debug!("Overriding config root from {}.", ENV_CONFIG_ROOT);
            self.config_root = PathBuf::from(root);
        }
        if let Some(profile) = non_empty(ENV_PROFILE) {
            debug!("Overriding profile from {}.", ENV_PROFILE);
            self.profile = profile;
        }
        if let Some(secret) = non_empty(ENV_SECRET_KEY_BASE).or_else(|| non_empty(ENV_SECRET_KEY_BASE_FALLBACK)) {
            debug!("Secret key base taken from the environment.");
            self.secret_key_base = Some(secret);
        }
        self
    }

    pub fn profile_path(&self) -> PathBuf {
        ProfileStore::new(self.config_root.clone()).profile_path(&self.profile)
    }

    /// Derives the hashing key, if a secret is configured.
    pub fn hash_key(&self) -> Result<Option<HashKey>> {
        self.secret_key_base
            .as_deref()
            .map(HashKey::from_secret)
            .transpose()
            .context("Failed to derive the hashing key from secret_key_base")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults() {
        let cfg = SanitizerConfig::default();
        assert_eq!(cfg.config_root, PathBuf::from("."));
        assert_eq!(cfg.profile, DEFAULT_PROFILE_ID);
        assert!(cfg.secret_key_base.is_none());
        assert_eq!(
            cfg.profile_path(),
            PathBuf::from("./config/profiles/connec_sanitizer_profile.yml")
        );
    }

    #[test]
    fn load_from_file_fills_missing_keys() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        file.write_all(b"config_root: /srv/app\n")?;
        let cfg = SanitizerConfig::load_from_file(file.path())?;
        assert_eq!(cfg.config_root, PathBuf::from("/srv/app"));
        assert_eq!(cfg.profile, DEFAULT_PROFILE_ID);
        Ok(())
    }

    #[test]
    fn load_from_file_reports_bad_yaml() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        file.write_all(b"config_root: [\n")?;
        let err = SanitizerConfig::load_from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
        Ok(())
    }

    #[test]
    fn env_overrides_file_values() {
        let env: HashMap<&str, &str> = [
            (ENV_CONFIG_ROOT, "/opt/app"),
            (ENV_PROFILE, "custom.yml"),
            (ENV_SECRET_KEY_BASE_FALLBACK, "fallback-secret-0123456789"),
        ]
        .into_iter()
        .collect();
        let cfg = SanitizerConfig::default().apply_env_from(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(cfg.config_root, PathBuf::from("/opt/app"));
        assert_eq!(cfg.profile, "custom.yml");
        assert_eq!(cfg.secret_key_base.as_deref(), Some("fallback-secret-0123456789"));
    }

    #[test]
    fn specific_secret_beats_fallback_and_blank_is_ignored() {
        let env: HashMap<&str, &str> = [
            (ENV_SECRET_KEY_BASE, "specific-secret-0123456789"),
            (ENV_SECRET_KEY_BASE_FALLBACK, "fallback-secret-0123456789"),
            (ENV_PROFILE, "  "),
        ]
        .into_iter()
        .collect();
        let cfg = SanitizerConfig::default().apply_env_from(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(cfg.secret_key_base.as_deref(), Some("specific-secret-0123456789"));
        assert_eq!(cfg.profile, DEFAULT_PROFILE_ID);
    }

    #[test]
    fn hash_key_requires_long_enough_secret() {
        let mut cfg = SanitizerConfig::default();
        assert!(cfg.hash_key().expect("no secret is fine").is_none());
        cfg.secret_key_base = Some("short".to_string());
        assert!(cfg.hash_key().is_err());
        cfg.secret_key_base = Some("0123456789abcdef".to_string());
        assert!(cfg.hash_key().expect("valid secret").is_some());
    }

    #[test]
    fn debug_hides_secret() {
        let cfg = SanitizerConfig {
            secret_key_base: Some("super-secret-value-123".to_string()),
            ..Default::default()
        };
        assert!(!format!("{:?}", cfg).contains("super-secret"));
    }
}
