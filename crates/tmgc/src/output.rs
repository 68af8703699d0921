// SPDX-FileCopyrightText: 2026 tmgc Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Output modes shared by all commands.
//!
//! Results go to stdout; warnings and logs go to stderr so `--json` output
//! stays machine-readable.

use std::io::IsTerminal;

use serde::Serialize;
use tmgc_core::TmgcError;

/// How command results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Aligned table with a header row.
    Human,
    /// Tab-separated values, no header.
    Plain,
    /// Pretty-printed JSON.
    Json,
}

impl OutputMode {
    pub fn from_flags(json: bool, plain: bool) -> Self {
        if json {
            OutputMode::Json
        } else if plain {
            OutputMode::Plain
        } else {
            OutputMode::Human
        }
    }
}

/// Printer for one invocation.
#[derive(Debug, Clone, Copy)]
pub struct Output {
    pub mode: OutputMode,
    pub color: bool,
}

impl Output {
    pub fn new(mode: OutputMode, no_color: bool) -> Self {
        let color = !no_color && mode == OutputMode::Human && std::io::stdout().is_terminal();
        if !color {
            colored::control::set_override(false);
        }
        Self { mode, color }
    }

    pub fn json<T: Serialize>(&self, value: &T) -> Result<(), TmgcError> {
        let text = serde_json::to_string_pretty(value)
            .map_err(|e| TmgcError::Internal(format!("failed to serialize output: {e}")))?;
        println!("{text}");
        Ok(())
    }

    pub fn plain(&self, fields: &[String]) {
        println!("{}", fields.join("\t"));
    }

    pub fn table(&self, header: &[&str], rows: &[Vec<String>]) {
        for line in render_table(header, rows, self.color) {
            println!("{line}");
        }
    }
}

/// Left-aligned columns separated by two spaces.
pub fn render_table(header: &[&str], rows: &[Vec<String>], color: bool) -> Vec<String> {
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 1);
    let header_line = format_row(header.iter().copied(), &widths);
    if color {
        use colored::Colorize;
        lines.push(header_line.bold().to_string());
    } else {
        lines.push(header_line);
    }
    for row in rows {
        lines.push(format_row(row.iter().map(String::as_str), &widths));
    }
    lines
}

fn format_row<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths.iter().copied())
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_from_flags() {
        assert_eq!(OutputMode::from_flags(true, false), OutputMode::Json);
        assert_eq!(OutputMode::from_flags(false, true), OutputMode::Plain);
        assert_eq!(OutputMode::from_flags(false, false), OutputMode::Human);
    }

    #[test]
    fn table_columns_align() {
        let lines = render_table(
            &["API_ID", "API_HASH", "SESSION_STORE"],
            &[vec!["12345678".into(), "ab****yz".into(), "default".into()]],
            false,
        );
        assert_eq!(lines[0], "API_ID    API_HASH  SESSION_STORE");
        assert_eq!(lines[1], "12345678  ab****yz  default");
    }

    #[test]
    fn table_without_rows_prints_header() {
        let lines = render_table(&["KEY"], &[], false);
        assert_eq!(lines, vec!["KEY"]);
    }
}
