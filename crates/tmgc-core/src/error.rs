// SPDX-FileCopyrightText: 2026 tmgc Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the tmgc persistence layer.

use std::path::PathBuf;

use thiserror::Error;

/// The primary error type used across the tmgc crates.
///
/// Lookup misses are never errors: directory lookups return `Option` so that
/// resolution can fall through to the protocol client.
#[derive(Debug, Error)]
pub enum TmgcError {
    /// The peer directory file exists but could not be parsed.
    ///
    /// Fatal at construction: a damaged file is never silently replaced.
    #[error("peer directory at {} is corrupt: {source}", path.display())]
    CorruptState {
        path: PathBuf,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Writing or renaming a persisted file failed.
    #[error("failed to persist {}: {source}", path.display())]
    Persistence {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The OS secret store could not be opened or failed its health probe.
    #[error("secret store unavailable: {0}")]
    BackendUnavailable(String),

    /// A peer reference could not be resolved locally or by the protocol client.
    #[error("cannot resolve peer `{reference}`: {message}")]
    Unresolvable { reference: String, message: String },

    /// Configuration errors (missing credentials, invalid values, bad paths).
    #[error("configuration error: {0}")]
    Config(String),

    /// Filesystem errors outside the persistence path (reads, directory setup).
    #[error("{context}: {source}")]
    Io {
        context: String,
        source: std::io::Error,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl TmgcError {
    /// Wraps an I/O error with a short description of what was attempted.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}
