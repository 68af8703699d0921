// SPDX-FileCopyrightText: 2026 tmgc Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Isolated profile directories for tests.

use std::sync::Arc;

use tempfile::TempDir;
use tmgc_config::ProfilePaths;
use tmgc_core::TmgcError;
use tmgc_peers::PeerDirectory;

/// A profile rooted in a temporary directory that is removed on drop.
///
/// The profile directory itself is created up front.
pub struct TestProfile {
    // Held for its Drop.
    _root: TempDir,
    paths: ProfilePaths,
}

impl TestProfile {
    /// Create a temporary profile named `profile`.
    ///
    /// Panics if the temporary directory cannot be created.
    pub fn new(profile: &str) -> Self {
        let root = tempfile::tempdir().expect("create temp profile root");
        let paths = ProfilePaths::under_root(root.path(), profile);
        paths.ensure_dirs().expect("create temp profile dir");
        Self { _root: root, paths }
    }

    pub fn paths(&self) -> &ProfilePaths {
        &self.paths
    }

    /// Opens the profile's peer directory.
    pub fn open_directory(&self) -> Result<Arc<PeerDirectory>, TmgcError> {
        PeerDirectory::open(&self.paths.peers_path).map(Arc::new)
    }
}
