// SPDX-FileCopyrightText: 2026 tmgc Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `tmgc peer` command implementations.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tmgc_core::{PeerKey, PeerRecord, TmgcError};
use tmgc_peers::{PeerDirectory, PeerResolver, PeerSource, ResolvedPeer};

use crate::Runtime;
use crate::output::OutputMode;

/// Peer source used when no protocol client is connected.
///
/// Only the local directory can answer; every live lookup is unresolvable.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineSource;

#[async_trait]
impl PeerSource for OfflineSource {
    async fn resolve_key(&self, key: PeerKey) -> Result<PeerRecord, TmgcError> {
        Err(TmgcError::Unresolvable {
            reference: key.to_string(),
            message: "not in the local peer directory and no client is connected".to_string(),
        })
    }

    async fn resolve_identifier(&self, identifier: &str) -> Result<ResolvedPeer, TmgcError> {
        Err(TmgcError::Unresolvable {
            reference: identifier.to_string(),
            message: "usernames and phone numbers need a connected client".to_string(),
        })
    }
}

/// Resolves `reference` with `resolver`, giving up after `timeout`.
pub async fn resolve_with_timeout<S: PeerSource>(
    resolver: &PeerResolver<S>,
    reference: &str,
    timeout: Duration,
) -> Result<ResolvedPeer, TmgcError> {
    tokio::time::timeout(timeout, resolver.resolve(reference))
        .await
        .map_err(|_| TmgcError::Unresolvable {
            reference: reference.to_string(),
            message: format!("timed out after {timeout:?}"),
        })?
}

/// Run `tmgc peer show <reference>`.
pub async fn run_peer_show(rt: &Runtime, reference: &str) -> Result<(), TmgcError> {
    let directory = Arc::new(PeerDirectory::open(&rt.paths.peers_path)?);
    let resolver = PeerResolver::new(directory, OfflineSource);
    let peer = resolve_with_timeout(&resolver, reference, rt.timeout).await?;

    match rt.output.mode {
        OutputMode::Json => rt.output.json(&peer),
        OutputMode::Plain => {
            rt.output.plain(&[
                peer.key.to_string(),
                peer.key.kind.to_string(),
                peer.record.as_json().to_string(),
            ]);
            Ok(())
        }
        OutputMode::Human => {
            rt.output.table(
                &["KEY", "KIND", "RECORD"],
                &[vec![
                    peer.key.to_string(),
                    peer.key.kind.to_string(),
                    peer.record.as_json().to_string(),
                ]],
            );
            Ok(())
        }
    }
}
