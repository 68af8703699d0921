// SPDX-FileCopyrightText: 2026 tmgc Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session credential storage for tmgc.
//!
//! Chooses where the protocol client's session blob lives: the OS secret
//! store when it is available and passes a write-read-delete health probe,
//! otherwise an unencrypted file in the profile directory. Also provides the
//! best-effort local cleanup used on logout.

pub mod cleanup;
pub mod keyring_store;
pub mod mask;
pub mod probe;
pub mod select;
pub mod session;

pub use cleanup::{clear_session, clear_session_with};
pub use keyring_store::{SERVICE, open_os_store};
pub use mask::mask_secret;
pub use probe::{health_probe, probe_key};
pub use select::{Candidate, candidate_chain, select_backend, select_backend_with};
pub use session::{FileSessionStorage, SecretSessionStorage, session_key};
