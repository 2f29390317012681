// fieldmask/src/cli.rs
//! This file defines the command-line interface (CLI) for the fieldmask application,
//! including all available commands and their arguments.
//! License: MIT OR Apache-2.0

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "fieldmask",
    author = "Obscura Team (Relay)",
    version = env!("CARGO_PKG_VERSION"),
    about = "Sanitize structured records before they reach logs",
    long_about = "fieldmask applies a per-entity YAML sanitizer profile to JSON or YAML records. Each field named in the profile is suppressed, replaced by a keyed digest, or sanitized recursively with a nested profile; every other field passes through unchanged.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Disable informational messages
    #[arg(long, short = 'q', global = true, help = "Suppress informational messages and warnings.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(long, short = 'd', global = true, help = "Enable debug logging.")]
    pub debug: bool,

    /// Path to a fieldmask settings file (YAML).
    #[arg(long = "config", value_name = "FILE", global = true, help = "Path to a fieldmask settings file (YAML).")]
    pub config: Option<PathBuf>,

    /// Application configuration root; profiles are read from <DIR>/config/profiles.
    #[arg(long = "config-root", value_name = "DIR", global = true, help = "Application configuration root (profiles live in <DIR>/config/profiles).")]
    pub config_root: Option<PathBuf>,

    /// Profile source identifier (file name under the profiles directory).
    #[arg(long = "profile", value_name = "ID", global = true, help = "Profile file name under the profiles directory.")]
    pub profile: Option<String>,

    /// Specify the path to a custom YAML theme file.
    #[arg(long = "theme", value_name = "FILE", global = true, help = "Specify the path to a custom YAML theme file.")]
    pub theme: Option<PathBuf>,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `fieldmask` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sanitizes a record (or array of records) read from a file or stdin.
    #[command(about = "Sanitizes a record (or array of records) read from a file or stdin.")]
    Sanitize(SanitizeCommand),

    /// Inspects and validates the sanitizer profile.
    #[command(subcommand, about = "Inspects and validates the sanitizer profile.")]
    Profiles(ProfilesCommand),

    /// Prints the digest the `hash` action would produce for a value.
    #[command(about = "Prints the digest the `hash` action would produce for a value.")]
    Hash(HashCommand),
}

/// Arguments for the `sanitize` command.
#[derive(Parser, Debug)]
pub struct SanitizeCommand {
    /// Entity type of the input records (e.g. "Contact", "sales_order").
    #[arg(long, short = 'e', value_name = "NAME", help = "Entity type of the input records.")]
    pub entity: String,

    /// Path to an input file (reads from stdin if not provided).
    #[arg(long, short = 'i', value_name = "FILE", help = "Read input from a specified file instead of stdin.")]
    pub input_file: Option<PathBuf>,

    /// Write sanitized output to this file instead of stdout.
    #[arg(long, short = 'o', value_name = "FILE", help = "Write output to a specified file instead of stdout.")]
    pub output: Option<PathBuf>,

    /// Input and output data format.
    #[arg(long = "format", value_name = "FORMAT", default_value = "json", help = "Data format of input and output.")]
    pub format: DataFormat,

    /// Pretty-print JSON output.
    #[arg(long, help = "Pretty-print JSON output.")]
    pub pretty: bool,

    /// Show a unified diff of the changes on stderr.
    #[arg(long, short = 'D', help = "Show a unified diff of the changes on stderr.")]
    pub diff: bool,
}

/// Subcommands for the `profiles` command.
#[derive(Subcommand, Debug)]
pub enum ProfilesCommand {
    #[command(about = "Prints the parsed profile (canonical entity names, resolved actions) as YAML.")]
    Show {
        /// Only show the profile for this entity.
        #[arg(long, short = 'e', value_name = "NAME", help = "Only show the profile for this entity.")]
        entity: Option<String>,
    },
    #[command(about = "Parses the profile and reports errors.")]
    Validate,
}

/// Arguments for the `hash` command.
#[derive(Parser, Debug)]
pub struct HashCommand {
    /// The value to hash.
    #[arg(value_name = "VALUE", help = "The value to hash.")]
    pub value: String,
}

/// Record serialization format.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum DataFormat {
    Json,
    Yaml,
}
