// SPDX-FileCopyrightText: 2026 tmgc Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Best-effort removal of a profile's local session state.

use std::io;
use std::path::Path;

use tmgc_config::ProfilePaths;
use tmgc_core::fs::tmp_path;
use tmgc_core::{SecretStore, TmgcError};
use tracing::debug;

use crate::keyring_store::open_os_store;
use crate::session::session_key;

/// Deletes the session file, the peer directory and the keyring session.
///
/// Used after logout and after a failed login. Never fails.
pub fn clear_session(paths: &ProfilePaths) {
    clear_session_with(paths, open_os_store);
}

/// [`clear_session`] with an injected secret store opener.
pub fn clear_session_with<F>(paths: &ProfilePaths, opener: F)
where
    F: FnOnce() -> Result<Box<dyn SecretStore>, TmgcError>,
{
    remove_quietly(&paths.session_path);
    remove_quietly(&paths.peers_path);
    remove_quietly(&tmp_path(&paths.peers_path));

    let key = session_key(&paths.profile);
    match opener() {
        Ok(store) => match store.remove(&key) {
            Ok(()) => debug!(key = %key, "keyring session removed"),
            Err(e) => debug!(key = %key, error = %e, "keyring session not removed"),
        },
        Err(e) => debug!(error = %e, "keyring not available for cleanup"),
    }
}

fn remove_quietly(path: &Path) {
    match std::fs::remove_file(path) {
        Ok(()) => debug!(path = %path.display(), "removed"),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => debug!(path = %path.display(), error = %e, "cleanup failed"),
    }
}
