// SPDX-FileCopyrightText: 2026 tmgc Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OS-native secret store (macOS Keychain, Windows Credential Manager,
//! Linux Secret Service behind a kernel keyring cache) through the `keyring`
//! crate.
//!
//! Only stores that keep credentials until they are deleted are accepted. A
//! store that forgets on reboot or process exit counts as unavailable.
//!
//! Without the `os-keyring` feature opening always fails and the selection
//! chain falls back to the session file.

use tmgc_core::{SecretStore, TmgcError};

/// Service name every tmgc entry is filed under.
pub const SERVICE: &str = "tmgc";

/// Opens the OS secret store for the tmgc service.
pub fn open_os_store() -> Result<Box<dyn SecretStore>, TmgcError> {
    #[cfg(feature = "os-keyring")]
    {
        Ok(Box::new(KeyringStore::open(SERVICE)?))
    }
    #[cfg(not(feature = "os-keyring"))]
    {
        Err(TmgcError::BackendUnavailable(
            "built without OS keyring support".to_string(),
        ))
    }
}

#[cfg(feature = "os-keyring")]
pub use os::KeyringStore;

#[cfg(feature = "os-keyring")]
mod os {
    use keyring::Entry;
    use keyring::credential::{CredentialBuilderApi, CredentialPersistence};
    use tmgc_core::{SecretStore, TmgcError};
    use tracing::debug;

    /// Secret store backed by the platform credential service.
    ///
    /// Each key becomes one credential entry under the store's service name.
    #[derive(Debug, Clone)]
    pub struct KeyringStore {
        service: String,
    }

    impl KeyringStore {
        /// Checks that a platform credential service is available.
        ///
        /// Availability does not imply the store works; run the health probe
        /// before trusting it with a session.
        pub fn open(service: &str) -> Result<Self, TmgcError> {
            let builder = keyring::default::default_credential_builder();
            require_durable(CredentialBuilderApi::persistence(builder.as_ref()))?;
            Entry::new(service, service).map_err(unavailable)?;
            debug!(service = %service, "keyring opened");
            Ok(Self {
                service: service.to_string(),
            })
        }

        fn entry(&self, key: &str) -> Result<Entry, TmgcError> {
            Entry::new(&self.service, key).map_err(unavailable)
        }
    }

    impl SecretStore for KeyringStore {
        fn set(&self, key: &str, data: &[u8]) -> Result<(), TmgcError> {
            self.entry(key)?.set_secret(data).map_err(unavailable)
        }

        fn get(&self, key: &str) -> Result<Option<Vec<u8>>, TmgcError> {
            match self.entry(key)?.get_secret() {
                Ok(data) => Ok(Some(data)),
                Err(keyring::Error::NoEntry) => Ok(None),
                Err(e) => Err(unavailable(e)),
            }
        }

        fn remove(&self, key: &str) -> Result<(), TmgcError> {
            match self.entry(key)?.delete_credential() {
                Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
                Err(e) => Err(unavailable(e)),
            }
        }
    }

    /// Rejects credential stores that lose entries before they are deleted.
    pub(crate) fn require_durable(persistence: CredentialPersistence) -> Result<(), TmgcError> {
        let lifetime = match persistence {
            CredentialPersistence::UntilDelete => return Ok(()),
            CredentialPersistence::UntilReboot => "until reboot",
            CredentialPersistence::ProcessOnly => "for this process",
            CredentialPersistence::EntryOnly => "in memory only",
            _ => "for an unknown lifetime",
        };
        Err(TmgcError::BackendUnavailable(format!(
            "credential store only keeps entries {lifetime}"
        )))
    }

    fn unavailable(err: keyring::Error) -> TmgcError {
        TmgcError::BackendUnavailable(err.to_string())
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn store_lost_on_reboot_is_rejected() {
            let err = require_durable(CredentialPersistence::UntilReboot).unwrap_err();
            assert!(matches!(err, TmgcError::BackendUnavailable(_)));
            assert!(err.to_string().contains("until reboot"), "{err}");
        }

        #[test]
        fn in_memory_stores_are_rejected() {
            assert!(require_durable(CredentialPersistence::ProcessOnly).is_err());
            assert!(require_durable(CredentialPersistence::EntryOnly).is_err());
        }

        #[test]
        fn disk_backed_store_is_accepted() {
            assert!(require_durable(CredentialPersistence::UntilDelete).is_ok());
        }
    }
}
