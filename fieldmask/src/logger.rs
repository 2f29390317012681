// fieldmask/src/logger.rs
//! Logger setup for the fieldmask binary.
//!
//! Log records go to stderr so they never mix with sanitized output on
//! stdout. `RUST_LOG` is honoured unless a level override is passed.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Level used when neither `RUST_LOG` nor an override is set. Warnings are
/// kept visible because the sanitizer reports failures at this level.
pub const DEFAULT_FILTER: &str = "warn";

/// Initializes the global logger. Safe to call more than once.
pub fn init_logger(level_override: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or(DEFAULT_FILTER));
    if let Some(level) = level_override {
        builder.filter_level(level);
    }
    builder.format_timestamp(None).format_target(false);
    let _ = builder.try_init();
}
