// SPDX-FileCopyrightText: 2026 tmgc Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OS secret store abstraction.

use crate::error::TmgcError;

/// A keyed store of binary secrets, scoped to one service name.
///
/// A store can open successfully and still be unusable (no unlocked
/// collection, no session bus in a container); callers must probe it before
/// trusting it with a session.
pub trait SecretStore: Send + Sync {
    /// Creates or replaces the item under `key`.
    fn set(&self, key: &str, data: &[u8]) -> Result<(), TmgcError>;

    /// Reads the item under `key`, `Ok(None)` if it does not exist.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, TmgcError>;

    /// Deletes the item under `key`. Deleting a missing item is not an error.
    fn remove(&self, key: &str) -> Result<(), TmgcError>;
}
