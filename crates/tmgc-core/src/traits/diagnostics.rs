// SPDX-FileCopyrightText: 2026 tmgc Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Diagnostics channel for operator-facing warnings.

/// Receives human-readable warnings that must not end up in command output.
pub trait DiagnosticSink: Send + Sync {
    fn warn(&self, message: &str);
}

/// Writes warnings to stderr, one per line.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrDiagnostics;

impl DiagnosticSink for StderrDiagnostics {
    fn warn(&self, message: &str) {
        eprintln!("{message}");
    }
}
