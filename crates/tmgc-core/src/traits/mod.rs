// SPDX-FileCopyrightText: 2026 tmgc Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator traits at the seams between tmgc and the systems around it.
//!
//! The protocol client consumes a [`SessionStorage`]; the credential vault
//! talks to the OS through a [`SecretStore`]; user-facing warnings go through
//! a [`DiagnosticSink`] so they never mix with structured command output.

pub mod diagnostics;
pub mod secret;
pub mod session;

pub use diagnostics::{DiagnosticSink, StderrDiagnostics};
pub use secret::SecretStore;
pub use session::SessionStorage;
