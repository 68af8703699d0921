// SPDX-FileCopyrightText: 2026 tmgc Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Merge order (later overrides earlier):
//! 1. Compiled defaults
//! 2. The profile's `config.toml` (missing file is fine)
//! 3. `TMGC_API_ID`, `TMGC_API_HASH`, `TMGC_SESSION_STORE`, `TMGC_LOG_LEVEL`

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use tmgc_core::TmgcError;
use tmgc_core::fs::atomic_write;
use tracing::debug;

use crate::model::TmgcConfig;

/// Keys that may be overridden from the environment.
const ENV_KEYS: &[&str] = &["api_id", "api_hash", "session_store", "log_level"];

/// Load configuration from `path` with environment overrides.
pub fn load_config(path: &Path) -> Result<TmgcConfig, figment::Error> {
    build_figment(path).extract()
}

/// Load configuration from a TOML string only (no file, no environment).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<TmgcConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TmgcConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Build the Figment used for config loading (exposed for diagnostic use).
pub fn build_figment(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(TmgcConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
}

/// `TMGC_*` variables, restricted to known keys so unrelated variables such
/// as `TMGC_PROFILE` never trip `deny_unknown_fields`.
fn env_provider() -> Env {
    Env::prefixed("TMGC_").only(ENV_KEYS)
}

/// Write `config` to `path` as TOML, replacing the file atomically (mode 0600).
pub fn save_config(path: &Path, config: &TmgcConfig) -> Result<(), TmgcError> {
    let content = toml::to_string_pretty(config)
        .map_err(|e| TmgcError::Config(format!("encode config: {e}")))?;
    atomic_write(path, content.as_bytes())?;
    debug!(path = %path.display(), "config saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.session_store, None);
    }

    #[test]
    fn save_then_load_from_str() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let config = TmgcConfig {
            api_id: 42,
            api_hash: "feedface".into(),
            session_store: Some("file".into()),
            log_level: "debug".into(),
        };

        save_config(&path, &config).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let loaded = load_config_from_str(&content).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn unset_session_store_is_omitted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        save_config(&path, &TmgcConfig::default()).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(!content.contains("session_store"), "{content}");
    }
}
