//! `fieldmask sanitize` implementation.

use anyhow::{bail, Context, Result};
use is_terminal::IsTerminal;
use log::{debug, info};
use serde_json::Value;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use fieldmask_core::SanitizationEngine;

use crate::cli::DataFormat;
use crate::ui::diff_viewer;
use crate::ui::output_format;
use crate::ui::theme::ThemeMap;

/// Options for the sanitize runner.
pub struct SanitizeOptions {
    pub entity: String,
    pub input: String,
    pub format: DataFormat,
    pub output_path: Option<PathBuf>,
    pub pretty: bool,
    pub diff: bool,
    pub quiet: bool,
}

/// Helper for printing info messages to stderr.
pub fn info_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_info_message(&mut io::stderr(), msg.as_ref(), theme, stderr_supports_color);
}

/// Helper for printing error messages to stderr.
pub fn error_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_error_message(&mut io::stderr(), msg.as_ref(), theme, stderr_supports_color);
}

/// Helper for printing warning messages to stderr.
pub fn warn_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_warn_message(&mut io::stderr(), msg.as_ref(), theme, stderr_supports_color);
}

/// Reads the whole input from a file, or from stdin when no path is given.
pub fn read_input(input_file: Option<&PathBuf>) -> Result<String> {
    match input_file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file: {}", path.display())),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

pub fn parse_document(input: &str, format: DataFormat) -> Result<Value> {
    match format {
        DataFormat::Json => serde_json::from_str(input).context("Input is not valid JSON"),
        DataFormat::Yaml => serde_yaml::from_str(input).context("Input is not valid YAML"),
    }
}

pub fn render_document(value: &Value, format: DataFormat, pretty: bool) -> Result<String> {
    let rendered = match format {
        DataFormat::Json if pretty => serde_json::to_string_pretty(value)?,
        DataFormat::Json => serde_json::to_string(value)?,
        DataFormat::Yaml => serde_yaml::to_string(value)?,
    };
    Ok(rendered.trim_end().to_string())
}

/// Sanitizes the input document and writes the result.
///
/// Nothing is written when the engine cannot sanitize the input.
pub fn run_sanitize(engine: &dyn SanitizationEngine, opts: SanitizeOptions, theme_map: &ThemeMap) -> Result<()> {
    info!("Starting sanitize for entity '{}'.", opts.entity);
    if !engine.is_configured() && !opts.quiet {
        warn_msg("No sanitizer profile found; records are passed through unchanged.", theme_map);
    }

    let document = parse_document(&opts.input, opts.format)?;
    let sanitized = match engine.sanitize(&opts.entity, &document) {
        Some(v) => v,
        None => bail!(
            "Could not sanitize input for entity '{}'; no output was written.",
            opts.entity
        ),
    };
    debug!("Sanitization of entity '{}' succeeded.", opts.entity);

    let rendered = render_document(&sanitized, opts.format, opts.pretty)?;
    handle_primary_output(&opts, &rendered, theme_map)?;

    if opts.diff {
        let before = serde_json::to_string_pretty(&document)? + "\n";
        let after = serde_json::to_string_pretty(&sanitized)? + "\n";
        let stderr = io::stderr();
        let supports_color = stderr.is_terminal();
        diff_viewer::print_diff(&before, &after, &mut stderr.lock(), theme_map, supports_color)?;
    }

    info!("Sanitize completed.");
    Ok(())
}

fn handle_primary_output(opts: &SanitizeOptions, rendered: &str, theme_map: &ThemeMap) -> Result<()> {
    if let Some(path) = &opts.output_path {
        if !opts.quiet {
            info_msg(format!("Writing sanitized output to file: {}", path.display()), theme_map);
        }
        let mut file = fs::File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        writeln!(file, "{}", rendered)?;
    } else {
        let stdout = io::stdout();
        let mut writer = stdout.lock();
        writeln!(writer, "{}", rendered)?;
    }
    Ok(())
}
