// SPDX-FileCopyrightText: 2026 tmgc Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `tmgc auth` command implementations.

use serde::Serialize;
use tmgc_config::{TmgcConfig, save_config, validation::validate_config};
use tmgc_core::{SessionStorePreference, TmgcError};
use tmgc_vault::{clear_session, mask_secret};
use tracing::info;

use crate::Runtime;
use crate::output::OutputMode;

/// Credentials as shown to the user. The hash is always masked.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ConfigView {
    pub api_id: i64,
    pub api_hash: String,
    pub session_store: String,
}

impl From<&TmgcConfig> for ConfigView {
    fn from(config: &TmgcConfig) -> Self {
        Self {
            api_id: config.api_id,
            api_hash: mask_secret(&config.api_hash),
            session_store: config.session_store_preference().to_string(),
        }
    }
}

/// Values given to `auth config set`.
#[derive(Debug, Default)]
pub struct ConfigUpdate {
    pub api_id: Option<i64>,
    pub api_hash: Option<String>,
    pub session_store: Option<String>,
}

impl ConfigUpdate {
    /// Applies the update to `config`. At least one value must be present.
    pub fn apply(&self, config: &mut TmgcConfig) -> Result<(), TmgcError> {
        if self.api_id.is_none() && self.api_hash.is_none() && self.session_store.is_none() {
            return Err(TmgcError::Config(
                "provide --api-id, --api-hash, and/or --session-store".to_string(),
            ));
        }

        if let Some(api_id) = self.api_id {
            config.api_id = api_id;
        }
        if let Some(api_hash) = &self.api_hash {
            config.api_hash = api_hash.trim().to_string();
        }
        if let Some(store) = &self.session_store {
            let preference: SessionStorePreference = store
                .parse()
                .map_err(|e| TmgcError::Config(format!("{e}")))?;
            config.set_session_store(preference);
        }

        validate_config(config).map_err(|errors| {
            let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
            TmgcError::Config(messages.join("; "))
        })
    }
}

/// Run `tmgc auth config set`.
pub fn run_config_set(rt: &mut Runtime, update: &ConfigUpdate) -> Result<(), TmgcError> {
    let mut config = rt.config.clone();
    update.apply(&mut config)?;

    rt.paths.ensure_dirs()?;
    save_config(&rt.paths.config_path, &config)?;
    info!(path = %rt.paths.config_path.display(), "credentials saved");
    rt.config = config;

    print_config(rt)
}

/// Run `tmgc auth config show`.
pub fn run_config_show(rt: &Runtime) -> Result<(), TmgcError> {
    print_config(rt)
}

/// Run `tmgc auth logout`.
///
/// Only the local state is removed here. Revoking the session on the server
/// needs a connected protocol client.
pub fn run_logout(rt: &Runtime) -> Result<(), TmgcError> {
    clear_session(&rt.paths);
    info!(profile = %rt.paths.profile, "local session cleared");

    match rt.output.mode {
        OutputMode::Json => rt.output.json(&serde_json::json!({ "logged_out": true })),
        OutputMode::Plain => {
            rt.output.plain(&["true".to_string()]);
            Ok(())
        }
        OutputMode::Human => {
            println!("Local session for profile `{}` cleared.", rt.paths.profile);
            Ok(())
        }
    }
}

fn print_config(rt: &Runtime) -> Result<(), TmgcError> {
    let view = ConfigView::from(&rt.config);
    match rt.output.mode {
        OutputMode::Json => rt.output.json(&view),
        OutputMode::Plain => {
            rt.output.plain(&[
                view.api_id.to_string(),
                view.api_hash,
                view.session_store,
            ]);
            Ok(())
        }
        OutputMode::Human => {
            rt.output.table(
                &["API_ID", "API_HASH", "SESSION_STORE"],
                &[vec![view.api_id.to_string(), view.api_hash, view.session_store]],
            );
            Ok(())
        }
    }
}
