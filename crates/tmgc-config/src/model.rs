// SPDX-FileCopyrightText: 2026 tmgc Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model for a tmgc profile.
//!
//! The struct uses `#[serde(deny_unknown_fields)]` so a misspelled key is
//! reported at startup instead of being silently ignored.

use serde::{Deserialize, Serialize};
use tmgc_core::{SessionStorePreference, TmgcError};
use tracing::warn;

/// Per-profile configuration.
///
/// Loaded from the profile's `config.toml` with `TMGC_*` environment
/// overrides. Every field has a default, so a missing file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TmgcConfig {
    /// Telegram application id. `0` means not configured.
    #[serde(default)]
    pub api_id: i64,

    /// Telegram application hash.
    #[serde(default)]
    pub api_hash: String,

    /// Session credential storage: `keyring`, `file`, or unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_store: Option<String>,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for TmgcConfig {
    fn default() -> Self {
        Self {
            api_id: 0,
            api_hash: String::new(),
            session_store: None,
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl TmgcConfig {
    /// The normalized session store preference.
    ///
    /// Unrecognized values fall back to the default (keyring with file
    /// fallback) and are logged.
    pub fn session_store_preference(&self) -> SessionStorePreference {
        let raw = self.session_store.as_deref().map(str::trim);
        let preference = SessionStorePreference::normalize(raw);
        if let Some(value) = raw.filter(|v| !v.is_empty()) {
            if preference == SessionStorePreference::Unset {
                warn!(value = %value, "unrecognized session_store, using default");
            }
        }
        preference
    }

    /// Sets the session store preference, clearing it for `Unset`.
    pub fn set_session_store(&mut self, preference: SessionStorePreference) {
        self.session_store = preference.as_config_value().map(str::to_string);
    }

    /// Fails unless both API credentials are present.
    pub fn require_api_credentials(&self) -> Result<(), TmgcError> {
        if self.api_id == 0 || self.api_hash.is_empty() {
            return Err(TmgcError::Config(
                "missing API credentials: set TMGC_API_ID and TMGC_API_HASH or run \
                 `tmgc auth config set --api-id --api-hash`"
                    .to_string(),
            ));
        }
        Ok(())
    }
}
