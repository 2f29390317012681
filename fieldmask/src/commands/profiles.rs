//! `fieldmask profiles` implementation.

use anyhow::{anyhow, bail, Context, Result};
use log::debug;
use std::io::{self, Write};
use std::sync::Arc;

use fieldmask_core::{canonical_entity_name, Profile, ProfileStore, SanitizerConfig};

/// Loads the configured profile, failing when it is missing or malformed.
fn load_required(store: &ProfileStore, config: &SanitizerConfig) -> Result<Arc<Profile>> {
    debug!("Loading profile '{}' from {}.", config.profile, store.config_root().display());
    store
        .load(&config.profile)
        .with_context(|| format!("Sanitizer profile '{}' is invalid", config.profile))?
        .ok_or_else(|| {
            anyhow!(
                "No sanitizer profile found at {}",
                store.profile_path(&config.profile).display()
            )
        })
}

/// Renders the parsed profile (or a single entity of it) as YAML.
pub fn render_profile(profile: &Profile, entity: Option<&str>) -> Result<String> {
    match entity {
        Some(name) => {
            let canonical = canonical_entity_name(name);
            let entity_profile = profile
                .entity(&canonical)
                .ok_or_else(|| anyhow!("Entity '{}' is not in the profile", canonical))?;
            let single = Profile::new().with_entity(&canonical, entity_profile.clone());
            Ok(serde_yaml::to_string(&single)?)
        }
        None => Ok(serde_yaml::to_string(profile)?),
    }
}

pub fn run_show(store: &ProfileStore, config: &SanitizerConfig, entity: Option<&str>) -> Result<()> {
    let profile = load_required(store, config)?;
    let rendered = render_profile(&profile, entity)?;
    let stdout = io::stdout();
    let mut writer = stdout.lock();
    write!(writer, "{}", rendered)?;
    Ok(())
}

/// Returns a one-line summary of a valid profile.
pub fn run_validate(store: &ProfileStore, config: &SanitizerConfig) -> Result<String> {
    let profile = load_required(store, config)?;
    if profile.is_empty() {
        bail!("Sanitizer profile '{}' defines no entities", config.profile);
    }
    let names: Vec<&str> = profile.entity_names().collect();
    Ok(format!(
        "Profile '{}' is valid: {} entities ({}).",
        config.profile,
        names.len(),
        names.join(", ")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_single_entity_uses_canonical_name() -> Result<()> {
        let profile = Profile::from_yaml_str("SalesOrder:\n  total: hash\nContact:\n  phone: x\n", "t")?;
        let out = render_profile(&profile, Some("sales-order"))?;
        assert!(out.contains("sales_order:"));
        assert!(out.contains("total: hash"));
        assert!(!out.contains("contact"));
        Ok(())
    }

    #[test]
    fn render_unknown_entity_fails() -> Result<()> {
        let profile = Profile::from_yaml_str("contact:\n  phone: suppress\n", "t")?;
        assert!(render_profile(&profile, Some("invoice")).is_err());
        Ok(())
    }
}
