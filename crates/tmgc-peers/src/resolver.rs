// SPDX-FileCopyrightText: 2026 tmgc Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cache-first resolution of peer references.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tmgc_core::{PeerKey, PeerRecord, TmgcError};
use tracing::debug;

use crate::directory::PeerDirectory;
use crate::reference::{PeerRef, parse_peer_ref};

/// A resolved peer: its key and the cached metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedPeer {
    pub key: PeerKey,
    pub record: PeerRecord,
}

/// Live resolution through the protocol client.
///
/// Implementations are expected to write what they resolve into the
/// [`PeerDirectory`]; the resolver itself never saves.
#[async_trait]
pub trait PeerSource: Send + Sync {
    /// Resolves a key that missed the local cache.
    async fn resolve_key(&self, key: PeerKey) -> Result<PeerRecord, TmgcError>;

    /// Resolves a username, phone number or other free-form identifier.
    async fn resolve_identifier(&self, identifier: &str) -> Result<ResolvedPeer, TmgcError>;
}

/// Turns user-supplied references into peers.
pub struct PeerResolver<S> {
    directory: Arc<PeerDirectory>,
    source: S,
}

impl<S: PeerSource> PeerResolver<S> {
    pub fn new(directory: Arc<PeerDirectory>, source: S) -> Self {
        Self { directory, source }
    }

    pub fn directory(&self) -> &PeerDirectory {
        &self.directory
    }

    /// Resolves `reference`.
    ///
    /// Keys are looked up in the directory first and only go to the source
    /// on a miss. Identifiers always go to the source. Every failure is
    /// reported as [`TmgcError::Unresolvable`].
    pub async fn resolve(&self, reference: &str) -> Result<ResolvedPeer, TmgcError> {
        match parse_peer_ref(reference) {
            PeerRef::Key(key) => {
                if let Some(record) = self.directory.find(key) {
                    debug!(%key, "peer cache hit");
                    return Ok(ResolvedPeer { key, record });
                }
                debug!(%key, "peer cache miss");
                let record = self
                    .source
                    .resolve_key(key)
                    .await
                    .map_err(|e| unresolvable(reference, e))?;
                Ok(ResolvedPeer { key, record })
            }
            PeerRef::Identifier(identifier) => {
                debug!(identifier = %identifier, "resolving identifier");
                self.source
                    .resolve_identifier(&identifier)
                    .await
                    .map_err(|e| unresolvable(reference, e))
            }
        }
    }
}

fn unresolvable(reference: &str, err: TmgcError) -> TmgcError {
    match err {
        TmgcError::Unresolvable { .. } => err,
        other => TmgcError::Unresolvable {
            reference: reference.to_string(),
            message: other.to_string(),
        },
    }
}
