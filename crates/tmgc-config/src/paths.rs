// SPDX-FileCopyrightText: 2026 tmgc Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Profile-scoped file locations.
//!
//! Layout under the user config directory:
//!
//! ```text
//! <config_dir>/tmgc/profiles/<profile>/config.toml
//! <config_dir>/tmgc/profiles/<profile>/session.json
//! <config_dir>/tmgc/profiles/<profile>/peers.json
//! ```
//!
//! An explicit config file path moves the whole profile next to that file.

use std::path::{Path, PathBuf};

use tmgc_core::TmgcError;
use tmgc_core::fs::create_private_dir;

/// Profile used when none is given.
pub const DEFAULT_PROFILE: &str = "default";
/// Name of the per-profile configuration file.
pub const CONFIG_FILE: &str = "config.toml";
/// Name of the plaintext session file.
pub const SESSION_FILE: &str = "session.json";
/// Name of the peer directory file.
pub const PEERS_FILE: &str = "peers.json";

/// Resolved file locations for one profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfilePaths {
    pub root: PathBuf,
    pub profile: String,
    pub profile_dir: PathBuf,
    pub config_path: PathBuf,
    pub session_path: PathBuf,
    pub peers_path: PathBuf,
}

impl ProfilePaths {
    /// Resolves paths for `profile`, honouring an explicit config file.
    pub fn resolve(config_path: Option<&Path>, profile: &str) -> Result<Self, TmgcError> {
        if let Some(config_path) = config_path {
            return Ok(Self::beside_config(config_path, profile));
        }

        let base = dirs::config_dir().ok_or_else(|| {
            TmgcError::Config("cannot determine the user configuration directory".to_string())
        })?;
        Ok(Self::under_root(&base.join("tmgc"), profile))
    }

    /// Paths for `profile` below `root/profiles/`.
    pub fn under_root(root: &Path, profile: &str) -> Self {
        let profile = normalize_profile(profile);
        let profile_dir = root.join("profiles").join(&profile);
        Self {
            root: root.to_path_buf(),
            config_path: profile_dir.join(CONFIG_FILE),
            session_path: profile_dir.join(SESSION_FILE),
            peers_path: profile_dir.join(PEERS_FILE),
            profile,
            profile_dir,
        }
    }

    /// Paths for `profile` in the directory containing `config_path`.
    pub fn beside_config(config_path: &Path, profile: &str) -> Self {
        let profile_dir = config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Self {
            root: profile_dir.clone(),
            profile: normalize_profile(profile),
            config_path: config_path.to_path_buf(),
            session_path: profile_dir.join(SESSION_FILE),
            peers_path: profile_dir.join(PEERS_FILE),
            profile_dir,
        }
    }

    /// Creates the profile directory (mode 0700 on Unix).
    pub fn ensure_dirs(&self) -> Result<(), TmgcError> {
        if self.profile_dir.as_os_str().is_empty() {
            return Err(TmgcError::Config("invalid profile directory".to_string()));
        }
        create_private_dir(&self.profile_dir).map_err(|e| {
            TmgcError::io(
                format!("create profile dir {}", self.profile_dir.display()),
                e,
            )
        })
    }
}

fn normalize_profile(profile: &str) -> String {
    let profile = profile.trim();
    if profile.is_empty() {
        DEFAULT_PROFILE.to_string()
    } else {
        profile.to_string()
    }
}
