// SPDX-FileCopyrightText: 2026 tmgc Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scripted peer source standing in for the protocol client.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use tmgc_core::{PeerKey, PeerRecord, TmgcError};
use tmgc_peers::{PeerDirectory, PeerSource, ResolvedPeer};

#[derive(Default)]
struct SourceState {
    by_key: HashMap<PeerKey, PeerRecord>,
    by_identifier: HashMap<String, ResolvedPeer>,
    calls: Vec<String>,
}

/// A mock [`PeerSource`] that answers from registered peers.
///
/// Like the real client, it can write what it resolves into a directory
/// (see [`MockPeerSource::writing_to`]). Unknown references are
/// [`TmgcError::Unresolvable`].
#[derive(Clone, Default)]
pub struct MockPeerSource {
    state: Arc<Mutex<SourceState>>,
    directory: Option<Arc<PeerDirectory>>,
}

impl MockPeerSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a peer reachable by key.
    pub fn with_peer(self, key: PeerKey, record: PeerRecord) -> Self {
        self.lock().by_key.insert(key, record);
        self
    }

    /// Register a peer reachable by username or phone.
    pub fn with_identifier(self, identifier: &str, key: PeerKey, record: PeerRecord) -> Self {
        self.lock()
            .by_identifier
            .insert(identifier.to_string(), ResolvedPeer { key, record });
        self
    }

    /// Save every resolved peer into `directory`.
    pub fn writing_to(mut self, directory: Arc<PeerDirectory>) -> Self {
        self.directory = Some(directory);
        self
    }

    /// References passed to the source, in order (keys in string form).
    pub fn calls(&self) -> Vec<String> {
        self.lock().calls.clone()
    }

    fn lock(&self) -> MutexGuard<'_, SourceState> {
        self.state.lock().unwrap_or_else(|p| p.into_inner())
    }

    fn write_back(&self, key: PeerKey, record: &PeerRecord) -> Result<(), TmgcError> {
        match &self.directory {
            Some(directory) => directory.save(key, record.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl PeerSource for MockPeerSource {
    async fn resolve_key(&self, key: PeerKey) -> Result<PeerRecord, TmgcError> {
        let found = {
            let mut state = self.lock();
            state.calls.push(key.to_string());
            state.by_key.get(&key).cloned()
        };
        let record = found.ok_or_else(|| TmgcError::Unresolvable {
            reference: key.to_string(),
            message: "peer not found".to_string(),
        })?;
        self.write_back(key, &record)?;
        Ok(record)
    }

    async fn resolve_identifier(&self, identifier: &str) -> Result<ResolvedPeer, TmgcError> {
        let found = {
            let mut state = self.lock();
            state.calls.push(identifier.to_string());
            state.by_identifier.get(identifier).cloned()
        };
        let peer = found.ok_or_else(|| TmgcError::Unresolvable {
            reference: identifier.to_string(),
            message: "username or phone not found".to_string(),
        })?;
        self.write_back(peer.key, &peer.record)?;
        Ok(peer)
    }
}
