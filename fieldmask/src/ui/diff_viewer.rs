// fieldmask/src/ui/diff_viewer.rs
//! Unified diff between the original and the sanitized document.
//!
//! Both sides are rendered as pretty JSON first so every changed field shows
//! up on its own line.

use diffy::{create_patch, Line as DiffLine};
use owo_colors::OwoColorize;
use std::io::{self, Write};

use crate::ui::theme::{color_for, ThemeEntry, ThemeMap};

/// Writes a line-oriented diff of `original` vs `sanitized` to `writer`.
pub fn print_diff<W: Write>(
    original: &str,
    sanitized: &str,
    writer: &mut W,
    theme_map: &ThemeMap,
    supports_color: bool,
) -> io::Result<()> {
    let patch = create_patch(original, sanitized);
    let paint = |text: String, entry: ThemeEntry| {
        if supports_color {
            text.color(color_for(theme_map, entry)).to_string()
        } else {
            text
        }
    };

    writeln!(writer, "{}", paint("--- Diff View ---".to_string(), ThemeEntry::DiffHeader))?;

    if patch.hunks().is_empty() {
        writeln!(writer, "No changes.")?;
    }

    for hunk in patch.hunks() {
        for line_change in hunk.lines() {
            match line_change {
                DiffLine::Delete(s) => {
                    write!(writer, "{}", paint(format!("-{}", s), ThemeEntry::DiffRemoved))?;
                }
                DiffLine::Insert(s) => {
                    write!(writer, "{}", paint(format!("+{}", s), ThemeEntry::DiffAdded))?;
                }
                DiffLine::Context(s) => {
                    write!(writer, " {}", s)?;
                }
            }
        }
    }

    writeln!(writer, "{}", paint("-----------------".to_string(), ThemeEntry::DiffHeader))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::ThemeStyle;

    #[test]
    fn shows_removed_and_added_lines() {
        let theme = ThemeStyle::default_theme_map();
        let original = "{\n  \"phone\": \"555\",\n  \"id\": 1\n}\n";
        let sanitized = "{\n  \"phone\": null,\n  \"id\": 1\n}\n";
        let mut buf = Vec::new();
        print_diff(original, sanitized, &mut buf, &theme, false).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("-  \"phone\": \"555\","));
        assert!(out.contains("+  \"phone\": null,"));
        assert!(out.contains("   \"id\": 1"));
    }

    #[test]
    fn identical_documents_report_no_changes() {
        let theme = ThemeStyle::default_theme_map();
        let mut buf = Vec::new();
        print_diff("{}\n", "{}\n", &mut buf, &theme, false).unwrap();
        assert!(String::from_utf8(buf).unwrap().contains("No changes."));
    }
}
