// SPDX-FileCopyrightText: 2026 tmgc Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session backend selection.
//!
//! The configured preference becomes an ordered chain of candidates. Each
//! candidate is tried in turn and the first one that opens and passes its
//! health probe wins. The plaintext file is always last and always viable.

use std::path::Path;

use tmgc_config::ProfilePaths;
use tmgc_core::{
    DiagnosticSink, SecretStore, SessionStorage, SessionStorePreference, TmgcError,
};
use tracing::info;

use crate::keyring_store::open_os_store;
use crate::probe::health_probe;
use crate::session::{FileSessionStorage, SecretSessionStorage};

/// One step of the fallback chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Candidate {
    /// The OS secret store, if it opens and passes the health probe.
    SecretStore,
    /// The unencrypted session file in the profile directory.
    PlaintextFile,
}

/// The candidates tried for `preference`, in order.
pub fn candidate_chain(preference: SessionStorePreference) -> &'static [Candidate] {
    match preference {
        SessionStorePreference::File => &[Candidate::PlaintextFile],
        SessionStorePreference::Unset | SessionStorePreference::Keyring => {
            &[Candidate::SecretStore, Candidate::PlaintextFile]
        }
    }
}

/// Chooses the session backend for a profile using the OS secret store.
pub fn select_backend(
    preference: SessionStorePreference,
    paths: &ProfilePaths,
    diagnostics: &dyn DiagnosticSink,
) -> Box<dyn SessionStorage> {
    select_backend_with(
        preference,
        &paths.profile,
        &paths.session_path,
        open_os_store,
        diagnostics,
    )
}

/// Chooses the session backend, opening the secret store with `opener`.
///
/// Never fails: secret store problems are reported through `diagnostics`
/// (at most one warning) and the chain moves on to the file.
pub fn select_backend_with<F>(
    preference: SessionStorePreference,
    profile: &str,
    session_path: &Path,
    opener: F,
    diagnostics: &dyn DiagnosticSink,
) -> Box<dyn SessionStorage>
where
    F: FnOnce() -> Result<Box<dyn SecretStore>, TmgcError>,
{
    let mut opener = Some(opener);

    for candidate in candidate_chain(preference) {
        match candidate {
            Candidate::SecretStore => {
                let Some(open) = opener.take() else { continue };
                match open_probed(open, profile) {
                    Ok(store) => {
                        let storage = SecretSessionStorage::new(store, profile);
                        info!(profile = %profile, key = storage.key(), "session backend: keyring");
                        return Box::new(storage);
                    }
                    Err(err) => diagnostics.warn(&keyring_fallback_warning(session_path, &err)),
                }
            }
            Candidate::PlaintextFile => break,
        }
    }

    if preference == SessionStorePreference::File {
        diagnostics.warn(&unencrypted_session_warning(session_path));
    }
    let storage = FileSessionStorage::new(session_path);
    info!(profile = %profile, path = %storage.path().display(), "session backend: file");
    Box::new(storage)
}

fn open_probed<F>(open: F, profile: &str) -> Result<Box<dyn SecretStore>, TmgcError>
where
    F: FnOnce() -> Result<Box<dyn SecretStore>, TmgcError>,
{
    let store = open()?;
    health_probe(store.as_ref(), profile)?;
    Ok(store)
}

fn keyring_fallback_warning(session_path: &Path, err: &TmgcError) -> String {
    format!(
        "Keyring unavailable ({err}). Falling back to unencrypted session file at {}.",
        session_path.display()
    )
}

fn unencrypted_session_warning(session_path: &Path) -> String {
    format!(
        "Warning: using unencrypted session file at {}. Anyone with access to this file can reuse your session.",
        session_path.display()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tmgc_core::BackendKind;
    use tmgc_test_utils::{MockSecretStore, RecordingDiagnostics, failing_opener};
    use tracing_test::traced_test;

    fn session_path() -> std::path::PathBuf {
        std::path::PathBuf::from("/profiles/default/session.json")
    }

    #[test]
    fn chains() {
        assert_eq!(
            candidate_chain(SessionStorePreference::File),
            &[Candidate::PlaintextFile]
        );
        assert_eq!(
            candidate_chain(SessionStorePreference::Unset),
            &[Candidate::SecretStore, Candidate::PlaintextFile]
        );
        assert_eq!(
            candidate_chain(SessionStorePreference::Keyring),
            candidate_chain(SessionStorePreference::Unset)
        );
    }

    #[test]
    fn file_preference_never_opens_store() {
        let diagnostics = RecordingDiagnostics::new();
        let store = MockSecretStore::new();

        let backend = select_backend_with(
            SessionStorePreference::File,
            "default",
            &session_path(),
            store.opener(),
            &diagnostics,
        );

        assert_eq!(backend.kind(), BackendKind::File);
        assert!(store.calls().is_empty());
        assert_eq!(diagnostics.count(), 1);
        assert!(diagnostics.warnings()[0].contains("unencrypted session file"));
    }

    #[test]
    fn healthy_store_wins_without_warning() {
        let diagnostics = RecordingDiagnostics::new();
        let store = MockSecretStore::new();

        let backend = select_backend_with(
            SessionStorePreference::Unset,
            "work",
            &session_path(),
            store.opener(),
            &diagnostics,
        );

        assert_eq!(backend.kind(), BackendKind::Keyring);
        assert_eq!(diagnostics.count(), 0);
        backend.store_session(b"blob").unwrap();
        assert_eq!(store.keys(), vec!["session/work".to_string()]);
        assert_eq!(store.get_entry("session/work"), Some(b"blob".to_vec()));
    }

    #[traced_test]
    #[test]
    fn selected_backend_is_logged() {
        let diagnostics = RecordingDiagnostics::new();
        select_backend_with(
            SessionStorePreference::Keyring,
            "default",
            &session_path(),
            failing_opener("locked"),
            &diagnostics,
        );
        assert!(logs_contain("session backend: file"));
        assert!(logs_contain("session.json"));
    }

    #[traced_test]
    #[test]
    fn keyring_entry_key_is_logged() {
        let diagnostics = RecordingDiagnostics::new();
        let store = MockSecretStore::new();
        select_backend_with(
            SessionStorePreference::Keyring,
            "work",
            &session_path(),
            store.opener(),
            &diagnostics,
        );
        assert!(logs_contain("session backend: keyring"));
        assert!(logs_contain("session/work"));
    }

    #[test]
    fn open_failure_falls_back_with_one_warning() {
        let diagnostics = RecordingDiagnostics::new();

        let backend = select_backend_with(
            SessionStorePreference::Keyring,
            "default",
            &session_path(),
            failing_opener("no dbus"),
            &diagnostics,
        );

        assert_eq!(backend.kind(), BackendKind::File);
        assert_eq!(diagnostics.count(), 1);
        let warning = &diagnostics.warnings()[0];
        assert!(warning.contains("no dbus"), "{warning}");
        assert!(warning.contains("session.json"), "{warning}");
    }

    #[test]
    fn probe_mismatch_falls_back_and_leaves_no_probe_key() {
        let diagnostics = RecordingDiagnostics::new();
        let store = MockSecretStore::new().corrupting_echo();

        let backend = select_backend_with(
            SessionStorePreference::Unset,
            "default",
            &session_path(),
            store.opener(),
            &diagnostics,
        );

        assert_eq!(backend.kind(), BackendKind::File);
        assert_eq!(diagnostics.count(), 1);
        assert!(diagnostics.warnings()[0].contains("mismatch"));
        assert!(!store.contains("tmgc/health/default"));
        assert!(store.is_empty());
    }
}
