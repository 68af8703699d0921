// SPDX-FileCopyrightText: 2026 tmgc Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory secret store for deterministic testing.
//!
//! Clones share state, so a test can hand a boxed clone to the code under
//! test and inspect the original afterwards.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use tmgc_core::{SecretStore, TmgcError};

#[derive(Default)]
struct StoreState {
    entries: BTreeMap<String, Vec<u8>>,
    calls: Vec<String>,
    fail_set: bool,
    fail_get: bool,
    fail_remove: bool,
    corrupt_echo: bool,
}

/// A mock secret store with failure injection.
///
/// Every call is logged as `"<op> <key>"` (`set`, `get`, `remove`).
#[derive(Clone, Default)]
pub struct MockSecretStore {
    state: Arc<Mutex<StoreState>>,
}

impl MockSecretStore {
    /// Create an empty, healthy store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every `set` fail.
    pub fn failing_set(self) -> Self {
        self.lock().fail_set = true;
        self
    }

    /// Make every `get` fail.
    pub fn failing_get(self) -> Self {
        self.lock().fail_get = true;
        self
    }

    /// Make every `remove` fail (the entry is kept).
    pub fn failing_remove(self) -> Self {
        self.lock().fail_remove = true;
        self
    }

    /// Make `get` return different bytes than were stored.
    pub fn corrupting_echo(self) -> Self {
        self.lock().corrupt_echo = true;
        self
    }

    /// Seed an entry without logging a call.
    pub fn insert(&self, key: &str, data: &[u8]) {
        self.lock().entries.insert(key.to_string(), data.to_vec());
    }

    /// The stored bytes for `key`, bypassing failure injection.
    pub fn get_entry(&self, key: &str) -> Option<Vec<u8>> {
        self.lock().entries.get(key).cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.lock().entries.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    /// All stored keys, sorted.
    pub fn keys(&self) -> Vec<String> {
        self.lock().entries.keys().cloned().collect()
    }

    /// The call log.
    pub fn calls(&self) -> Vec<String> {
        self.lock().calls.clone()
    }

    /// An opener that hands out a clone of this store.
    pub fn opener(&self) -> impl FnOnce() -> Result<Box<dyn SecretStore>, TmgcError> + use<> {
        let store = self.clone();
        move || Ok(Box::new(store) as Box<dyn SecretStore>)
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(|p| p.into_inner())
    }
}

impl SecretStore for MockSecretStore {
    fn set(&self, key: &str, data: &[u8]) -> Result<(), TmgcError> {
        let mut state = self.lock();
        state.calls.push(format!("set {key}"));
        if state.fail_set {
            return Err(TmgcError::BackendUnavailable("mock set failure".into()));
        }
        state.entries.insert(key.to_string(), data.to_vec());
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, TmgcError> {
        let mut state = self.lock();
        state.calls.push(format!("get {key}"));
        if state.fail_get {
            return Err(TmgcError::BackendUnavailable("mock get failure".into()));
        }
        let corrupt = state.corrupt_echo;
        Ok(state.entries.get(key).map(|data| {
            let mut data = data.clone();
            if corrupt {
                data.push(b'!');
            }
            data
        }))
    }

    fn remove(&self, key: &str) -> Result<(), TmgcError> {
        let mut state = self.lock();
        state.calls.push(format!("remove {key}"));
        if state.fail_remove {
            return Err(TmgcError::BackendUnavailable("mock remove failure".into()));
        }
        state.entries.remove(key);
        Ok(())
    }
}

/// An opener that always fails with [`TmgcError::BackendUnavailable`].
pub fn failing_opener(
    message: &str,
) -> impl FnOnce() -> Result<Box<dyn SecretStore>, TmgcError> + use<> {
    let message = message.to_string();
    move || Err(TmgcError::BackendUnavailable(message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_entries() {
        let store = MockSecretStore::new();
        let boxed: Box<dyn SecretStore> = Box::new(store.clone());
        boxed.set("k", b"v").unwrap();
        assert_eq!(store.get_entry("k"), Some(b"v".to_vec()));
        assert_eq!(store.calls(), vec!["set k"]);
    }

    #[test]
    fn corrupting_echo_changes_bytes() {
        let store = MockSecretStore::new().corrupting_echo();
        store.set("k", b"ok").unwrap();
        assert_ne!(store.get("k").unwrap(), Some(b"ok".to_vec()));
    }

    #[test]
    fn failing_remove_keeps_entry() {
        let store = MockSecretStore::new().failing_remove();
        store.insert("k", b"v");
        assert!(store.remove("k").is_err());
        assert!(store.contains("k"));
    }

    #[test]
    fn failing_opener_reports_message() {
        let err = failing_opener("no dbus")().err().unwrap();
        assert!(err.to_string().contains("no dbus"));
    }
}
