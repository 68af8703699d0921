// SPDX-FileCopyrightText: 2026 tmgc Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The persistent peer directory.
//!
//! One JSON document per profile holds every resolved peer, a phone index and
//! the contacts freshness token. The document is loaded once, mutated in
//! memory, and rewritten atomically before each mutating call returns.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use tmgc_core::fs::atomic_write;
use tmgc_core::{PeerKey, PeerRecord, TmgcError};
use tracing::debug;

/// Everything persisted in the directory file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct DirectoryState {
    #[serde(default)]
    peers: BTreeMap<PeerKey, PeerRecord>,
    #[serde(default)]
    phones: BTreeMap<String, PeerKey>,
    #[serde(default)]
    contacts_hash: i64,
}

/// File-backed cache of resolved peers for one profile.
///
/// Lookups never touch the disk. Every mutation is applied to a copy of the
/// state, persisted, and only then committed in memory: a failed write
/// leaves the directory exactly as it was after the last successful one.
pub struct PeerDirectory {
    path: PathBuf,
    state: Mutex<DirectoryState>,
}

impl std::fmt::Debug for PeerDirectory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PeerDirectory")
            .field("path", &self.path)
            .field("peers", &self.len())
            .finish()
    }
}

impl PeerDirectory {
    /// Loads the directory at `path`.
    ///
    /// A missing file yields an empty directory. A file that cannot be
    /// parsed is [`TmgcError::CorruptState`]; it is never replaced silently.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, TmgcError> {
        let path = path.into();
        let state = match std::fs::read(&path) {
            Ok(bytes) => {
                serde_json::from_slice(&bytes).map_err(|e| TmgcError::CorruptState {
                    path: path.clone(),
                    source: Box::new(e),
                })?
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => DirectoryState::default(),
            Err(e) => {
                return Err(TmgcError::io(
                    format!("read peer directory {}", path.display()),
                    e,
                ));
            }
        };

        debug!(
            path = %path.display(),
            peers = state.peers.len(),
            phones = state.phones.len(),
            "peer directory loaded"
        );
        Ok(Self {
            path,
            state: Mutex::new(state),
        })
    }

    /// Location of the directory file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of cached peers.
    pub fn len(&self) -> usize {
        self.lock().peers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().peers.is_empty()
    }

    /// Inserts or replaces the record for `key` and persists.
    pub fn save(&self, key: PeerKey, record: PeerRecord) -> Result<(), TmgcError> {
        self.mutate(|state| {
            state.peers.insert(key, record);
        })?;
        debug!(%key, "peer saved");
        Ok(())
    }

    /// The cached record for `key`, if any.
    pub fn find(&self, key: PeerKey) -> Option<PeerRecord> {
        self.lock().peers.get(&key).cloned()
    }

    /// Points `phone` at `key` and persists.
    ///
    /// The index is not validated here: `key` may not have a record yet.
    pub fn save_phone(&self, phone: &str, key: PeerKey) -> Result<(), TmgcError> {
        self.mutate(|state| {
            state.phones.insert(phone.to_string(), key);
        })
    }

    /// Looks `phone` up in the index and re-validates against the cache.
    ///
    /// An index entry whose key has no record is stale and yields `None`.
    pub fn find_phone(&self, phone: &str) -> Option<(PeerKey, PeerRecord)> {
        let state = self.lock();
        let key = *state.phones.get(phone)?;
        let record = state.peers.get(&key)?.clone();
        Some((key, record))
    }

    /// The stored contacts freshness token (0 when never saved).
    pub fn contacts_hash(&self) -> i64 {
        self.lock().contacts_hash
    }

    pub fn save_contacts_hash(&self, value: i64) -> Result<(), TmgcError> {
        self.mutate(|state| state.contacts_hash = value)
    }

    /// Applies `change` to a copy of the state, persists the copy, then
    /// commits it. The lock is held across the write.
    fn mutate(&self, change: impl FnOnce(&mut DirectoryState)) -> Result<(), TmgcError> {
        let mut state = self.lock();
        let mut next = state.clone();
        change(&mut next);
        self.persist(&next)?;
        *state = next;
        Ok(())
    }

    fn persist(&self, state: &DirectoryState) -> Result<(), TmgcError> {
        let data = serde_json::to_vec_pretty(state)
            .map_err(|e| TmgcError::Internal(format!("encode peer directory: {e}")))?;
        atomic_write(&self.path, &data)?;
        debug!(path = %self.path.display(), bytes = data.len(), "peer directory persisted");
        Ok(())
    }

    /// The state is only ever replaced by a committed copy, so a poisoned
    /// lock still guards a consistent value.
    fn lock(&self) -> MutexGuard<'_, DirectoryState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
