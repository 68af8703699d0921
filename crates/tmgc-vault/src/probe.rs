// SPDX-FileCopyrightText: 2026 tmgc Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Write-read-delete self-test for secret stores.
//!
//! A store can open cleanly and still be unusable, for example on a headless
//! host with no unlocked keyring. The probe exercises it before a session is
//! committed to it.

use tmgc_core::{SecretStore, TmgcError};
use tracing::debug;

/// Value written by the probe.
pub const PROBE_VALUE: &[u8] = b"ok";

/// Throwaway item used by the probe for `profile`.
pub fn probe_key(profile: &str) -> String {
    let profile = profile.trim();
    let profile = if profile.is_empty() { "default" } else { profile };
    format!("tmgc/health/{profile}")
}

/// Writes the probe item, reads it back, compares it and deletes it.
///
/// Once the write has succeeded the delete is always attempted, whatever the
/// read returned. Failure of any step makes the store unusable.
pub fn health_probe(store: &dyn SecretStore, profile: &str) -> Result<(), TmgcError> {
    let key = probe_key(profile);
    store.set(&key, PROBE_VALUE)?;

    let echoed = store.get(&key);
    let removed = store.remove(&key);

    match echoed? {
        Some(data) if data == PROBE_VALUE => {}
        Some(_) => {
            return Err(TmgcError::BackendUnavailable(
                "keyring data mismatch".to_string(),
            ));
        }
        None => {
            return Err(TmgcError::BackendUnavailable(
                "keyring lost the health probe entry".to_string(),
            ));
        }
    }
    removed?;

    debug!(key = %key, "keyring health probe passed");
    Ok(())
}
