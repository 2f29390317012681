//! Canonical entity names.
//!
//! Entity names arrive in whatever convention the caller uses (`Contact`,
//! `SalesOrder`, `sales-order`, `HTTPRequest`). Profiles are keyed by the
//! lower_snake form so lookups are insensitive to case and separator style.

use once_cell::sync::Lazy;
use regex::Regex;

static ACRONYM_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([A-Z\d]+)([A-Z][a-z])").expect("static regex"));
static WORD_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-z\d])([A-Z])").expect("static regex"));

/// Converts an entity name to its canonical lower_snake form.
///
/// `Module::Thing` namespaces become `module/thing`, hyphens become
/// underscores, and camel-case humps are split.
pub fn canonical_entity_name(name: &str) -> String {
    let word = name.trim().replace("::", "/");
    let word = ACRONYM_BOUNDARY.replace_all(&word, "${1}_${2}");
    let word = WORD_BOUNDARY.replace_all(&word, "${1}_${2}");
    word.replace('-', "_").to_lowercase()
}
