// SPDX-FileCopyrightText: 2026 tmgc Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for tmgc integration tests.
//!
//! Provides mock collaborators and an isolated profile harness for fast,
//! deterministic tests that never touch the real OS keyring or the user's
//! configuration directory.
//!
//! # Components
//!
//! - [`MockSecretStore`] - In-memory secret store with per-step failure injection
//! - [`RecordingDiagnostics`] - Diagnostics sink that captures warnings
//! - [`MockPeerSource`] - Scripted peer resolution with a call log
//! - [`TestProfile`] - Temporary profile directory with resolved paths

pub mod harness;
pub mod mock_diagnostics;
pub mod mock_source;
pub mod mock_store;

pub use harness::TestProfile;
pub use mock_diagnostics::RecordingDiagnostics;
pub use mock_source::MockPeerSource;
pub use mock_store::{MockSecretStore, failing_opener};
