// SPDX-FileCopyrightText: 2026 tmgc Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Diagnostics sink that captures warnings for assertion in tests.

use std::sync::{Arc, Mutex};

use tmgc_core::DiagnosticSink;

/// Records every warning instead of printing it.
#[derive(Clone, Default)]
pub struct RecordingDiagnostics {
    warnings: Arc<Mutex<Vec<String>>>,
}

impl RecordingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// All warnings received so far, in order.
    pub fn warnings(&self) -> Vec<String> {
        self.warnings
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .clone()
    }

    pub fn count(&self) -> usize {
        self.warnings().len()
    }
}

impl DiagnosticSink for RecordingDiagnostics {
    fn warn(&self, message: &str) {
        self.warnings
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push(message.to_string());
    }
}
