// SPDX-FileCopyrightText: 2026 tmgc Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Profile paths and configuration for tmgc.
//!
//! Provides per-profile file locations, TOML configuration with strict
//! validation (`deny_unknown_fields`), `TMGC_*` environment overrides, and
//! miette diagnostics with typo suggestions.
//!
//! # Usage
//!
//! ```no_run
//! use tmgc_config::{load_and_validate, ProfilePaths};
//!
//! let paths = ProfilePaths::resolve(None, "default").expect("paths");
//! let config = load_and_validate(&paths.config_path).expect("config errors");
//! println!("session store: {}", config.session_store_preference());
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod paths;
pub mod validation;

use std::path::Path;

pub use diagnostic::{ConfigError, render_errors};
pub use loader::{load_config, load_config_from_str, save_config};
pub use model::TmgcConfig;
pub use paths::ProfilePaths;

/// Load the profile configuration at `path` (plus environment) and validate it.
///
/// On a Figment error the file is re-read so unknown keys can be shown in
/// context.
pub fn load_and_validate(path: &Path) -> Result<TmgcConfig, Vec<ConfigError>> {
    match loader::load_config(path) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let content = std::fs::read_to_string(path).ok();
            let display = path.display().to_string();
            let source = content.as_deref().map(|c| (display.as_str(), c));
            Err(diagnostic::figment_to_config_errors(err, source))
        }
    }
}

/// Load configuration from a TOML string and validate it.
pub fn load_and_validate_str(toml_content: &str) -> Result<TmgcConfig, Vec<ConfigError>> {
    match loader::load_config_from_str(toml_content) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(
            err,
            Some(("<inline>", toml_content)),
        )),
    }
}
