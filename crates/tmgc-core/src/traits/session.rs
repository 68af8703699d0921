// SPDX-FileCopyrightText: 2026 tmgc Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session storage trait handed to the protocol client's session layer.

use crate::error::TmgcError;
use crate::types::BackendKind;

/// Backend that persists the protocol client's opaque session blob.
///
/// The blob is never interpreted here; implementations only store, return
/// and delete it.
pub trait SessionStorage: Send + Sync {
    /// Loads the stored session. `Ok(None)` means no session has been stored.
    fn load_session(&self) -> Result<Option<Vec<u8>>, TmgcError>;

    /// Replaces the stored session with `data`.
    fn store_session(&self, data: &[u8]) -> Result<(), TmgcError>;

    /// Which kind of backend this is.
    fn kind(&self) -> BackendKind;
}
