//! store.rs - Loads and caches sanitizer profiles.
//!
//! The store resolves a profile source identifier (a file name such as
//! `connec_sanitizer_profile.yml`) against `<config_root>/config/profiles/`,
//! parses it once, and hands out shared `Arc<Profile>` handles afterwards.
//! A missing file is not an error: it means sanitization is not configured.
//!
//! One store is meant to be built at process start and shared by every engine.
//!
//! License: MIT OR APACHE 2.0

use log::{debug, info};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use crate::errors::{FieldmaskError, Result};
use crate::profiles::Profile;

/// Directory, relative to the configuration root, holding profile files.
pub const PROFILES_DIR: [&str; 2] = ["config", "profiles"];

/// Profile source used when none is specified.
pub const DEFAULT_PROFILE_ID: &str = "connec_sanitizer_profile.yml";

#[derive(Debug)]
pub struct ProfileStore {
    config_root: PathBuf,
    cache: RwLock<HashMap<String, Arc<Profile>>>,
}

impl ProfileStore {
    pub fn new<P: Into<PathBuf>>(config_root: P) -> Self {
        Self {
            config_root: config_root.into(),
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn config_root(&self) -> &Path {
        &self.config_root
    }

    /// Resolves a profile source identifier to its location on disk.
    pub fn profile_path(&self, profile_id: &str) -> PathBuf {
        PROFILES_DIR
            .iter()
            .fold(self.config_root.clone(), |p, dir| p.join(dir))
            .join(profile_id)
    }

    /// Returns true when the profile source resolves to a regular file.
    pub fn exists(&self, profile_id: &str) -> bool {
        self.profile_path(profile_id).is_file()
    }

    /// Loads the profile for `profile_id`, serving it from the cache when possible.
    ///
    /// Returns `Ok(None)` when the source does not exist. Parse errors are
    /// returned as-is and nothing is cached for that identifier.
    pub fn load(&self, profile_id: &str) -> Result<Option<Arc<Profile>>> {
        {
            let cache = self.read_cache()?;
            if let Some(profile) = cache.get(profile_id) {
                debug!("Serving sanitizer profile '{}' from cache.", profile_id);
                return Ok(Some(Arc::clone(profile)));
            }
        }

        if !self.exists(profile_id) {
            debug!(
                "Sanitizer profile '{}' not found at {}; sanitization disabled.",
                profile_id,
                self.profile_path(profile_id).display()
            );
            return Ok(None);
        }

        // Parsing happens outside the lock. If two callers race here the first
        // insert wins and both get the same Arc back.
        let path = self.profile_path(profile_id);
        let text = std::fs::read_to_string(&path)?;
        let parsed = Profile::from_yaml_str(&text, &path.display().to_string())?;
        info!(
            "Loaded sanitizer profile '{}' ({} entities) from {}.",
            profile_id,
            parsed.len(),
            path.display()
        );

        let mut cache = self.write_cache()?;
        let entry = cache
            .entry(profile_id.to_string())
            .or_insert_with(|| Arc::new(parsed));
        Ok(Some(Arc::clone(entry)))
    }

    /// Seeds the cache with an in-memory profile, replacing any cached entry.
    pub fn insert(&self, profile_id: &str, profile: Profile) -> Result<Arc<Profile>> {
        let profile = Arc::new(profile);
        self.write_cache()?
            .insert(profile_id.to_string(), Arc::clone(&profile));
        Ok(profile)
    }

    /// Drops a cached profile so the next `load` re-reads the source.
    pub fn evict(&self, profile_id: &str) -> Result<bool> {
        Ok(self.write_cache()?.remove(profile_id).is_some())
    }

    pub fn clear(&self) -> Result<()> {
        self.write_cache()?.clear();
        Ok(())
    }

    pub fn cached_ids(&self) -> Result<Vec<String>> {
        let mut ids: Vec<String> = self.read_cache()?.keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }

    fn read_cache(&self) -> Result<std::sync::RwLockReadGuard<'_, HashMap<String, Arc<Profile>>>> {
        self.cache
            .read()
            .map_err(|_| FieldmaskError::Fatal("profile cache lock poisoned".to_string()))
    }

    fn write_cache(&self) -> Result<std::sync::RwLockWriteGuard<'_, HashMap<String, Arc<Profile>>>> {
        self.cache
            .write()
            .map_err(|_| FieldmaskError::Fatal("profile cache lock poisoned".to_string()))
    }
}
