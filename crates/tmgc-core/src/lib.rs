// SPDX-FileCopyrightText: 2026 tmgc Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the tmgc local persistence layer.
//!
//! This crate provides the error taxonomy, the peer identifier types, and the
//! collaborator traits used throughout the tmgc workspace. The protocol client,
//! the OS secret store, and the diagnostics channel are all reached through
//! traits defined here.

pub mod error;
pub mod fs;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::TmgcError;
pub use types::{BackendKind, PeerKey, PeerKind, PeerRecord, SessionStorePreference};

pub use traits::{DiagnosticSink, SecretStore, SessionStorage, StderrDiagnostics};
