// SPDX-FileCopyrightText: 2026 tmgc Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session storages handed to the protocol client.

use std::io;
use std::path::{Path, PathBuf};

use tmgc_core::fs::atomic_write;
use tmgc_core::{BackendKind, SecretStore, SessionStorage, TmgcError};
use tracing::debug;

/// Secret-store item holding the session of `profile`.
pub fn session_key(profile: &str) -> String {
    let profile = profile.trim();
    if profile.is_empty() {
        "session/default".to_string()
    } else {
        format!("session/{profile}")
    }
}

/// Unencrypted session file (mode 0600).
///
/// Anyone who can read the file can reuse the session.
#[derive(Debug, Clone)]
pub struct FileSessionStorage {
    path: PathBuf,
}

impl FileSessionStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStorage for FileSessionStorage {
    fn load_session(&self) -> Result<Option<Vec<u8>>, TmgcError> {
        match std::fs::read(&self.path) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(TmgcError::io(
                format!("read session file {}", self.path.display()),
                e,
            )),
        }
    }

    fn store_session(&self, data: &[u8]) -> Result<(), TmgcError> {
        atomic_write(&self.path, data)?;
        debug!(path = %self.path.display(), "session stored in file");
        Ok(())
    }

    fn kind(&self) -> BackendKind {
        BackendKind::File
    }
}

/// Session kept in a secret store under `session/<profile>`.
pub struct SecretSessionStorage {
    store: Box<dyn SecretStore>,
    key: String,
}

impl std::fmt::Debug for SecretSessionStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretSessionStorage")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

impl SecretSessionStorage {
    pub fn new(store: Box<dyn SecretStore>, profile: &str) -> Self {
        Self {
            store,
            key: session_key(profile),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl SessionStorage for SecretSessionStorage {
    fn load_session(&self) -> Result<Option<Vec<u8>>, TmgcError> {
        self.store.get(&self.key)
    }

    fn store_session(&self, data: &[u8]) -> Result<(), TmgcError> {
        self.store.set(&self.key, data)?;
        debug!(key = %self.key, "session stored in keyring");
        Ok(())
    }

    fn kind(&self) -> BackendKind {
        BackendKind::Keyring
    }
}
