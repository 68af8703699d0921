// SPDX-FileCopyrightText: 2026 tmgc Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Crash-safe file replacement for profile-scoped state files.
//!
//! Files are written to a sibling `<name>.tmp`, synced, and renamed over the
//! real path. A reader of the real path sees either the previous contents or
//! the new contents, never a partial write.

use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::TmgcError;

/// The temporary sibling used while replacing `path`.
pub fn tmp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

/// Creates `dir` and its parents, restricting new directories to the owner.
pub fn create_private_dir(dir: &Path) -> io::Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o700);
    }
    builder.create(dir)
}

/// Atomically replaces the contents of `path` with `data` (mode 0600).
pub fn atomic_write(path: &Path, data: &[u8]) -> Result<(), TmgcError> {
    let persist_err = |source: io::Error| TmgcError::Persistence {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        create_private_dir(parent).map_err(persist_err)?;
    }

    let tmp = tmp_path(path);
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(&tmp).map_err(persist_err)?;
    file.write_all(data).map_err(persist_err)?;
    file.sync_all().map_err(persist_err)?;
    drop(file);

    fs::rename(&tmp, path).map_err(persist_err)?;
    Ok(())
}
