// SPDX-FileCopyrightText: 2026 tmgc Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `tmgc doctor` command implementation.
//!
//! Runs diagnostic checks against a profile to find configuration problems,
//! an unusable keyring, or a damaged peer directory.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use serde::Serialize;
use tmgc_config::ProfilePaths;
use tmgc_core::{BackendKind, DiagnosticSink, TmgcError};
use tmgc_peers::PeerDirectory;
use tmgc_vault::select_backend;

use crate::Runtime;
use crate::output::OutputMode;

/// Status of a diagnostic check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    /// Check passed successfully.
    Pass,
    /// Check passed with a warning.
    Warn,
    /// Check failed.
    Fail,
}

/// Result of a single diagnostic check.
#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    /// Name of the check.
    pub name: String,
    /// Check status.
    pub status: CheckStatus,
    /// Human-readable message.
    pub message: String,
    /// Duration the check took.
    #[serde(rename = "duration_ms", serialize_with = "serialize_millis")]
    pub duration: Duration,
}

fn serialize_millis<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
}

/// Warnings collected from backend selection instead of printed.
#[derive(Default)]
struct CollectedWarnings(Mutex<Vec<String>>);

impl DiagnosticSink for CollectedWarnings {
    fn warn(&self, message: &str) {
        self.0
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push(message.to_string());
    }
}

/// Run the `tmgc doctor` command.
///
/// Reports every check; fails only when a check failed.
pub fn run_doctor(rt: &Runtime) -> Result<(), TmgcError> {
    let results = vec![
        check_config(&rt.paths),
        check_session_backend(rt),
        check_peer_directory(&rt.paths),
    ];

    match rt.output.mode {
        OutputMode::Json => rt.output.json(&results)?,
        OutputMode::Plain => {
            for result in &results {
                rt.output.plain(&[
                    result.name.clone(),
                    format!("{:?}", result.status).to_lowercase(),
                    result.message.clone(),
                ]);
            }
        }
        OutputMode::Human => print_human(&results, rt.output.color),
    }

    let failed = results
        .iter()
        .filter(|r| r.status == CheckStatus::Fail)
        .count();
    if failed > 0 {
        return Err(TmgcError::Internal(format!("{failed} check(s) failed")));
    }
    Ok(())
}

fn print_human(results: &[CheckResult], use_color: bool) {
    println!();
    println!("  tmgc doctor");
    println!("  {}", "-".repeat(50));

    let mut issues = 0;
    for result in results {
        let duration_ms = result.duration.as_millis();
        let line = match (result.status, use_color) {
            (CheckStatus::Pass, true) => {
                use colored::Colorize;
                format!(
                    "    {} {:<20} {} ({duration_ms}ms)",
                    "✓".green(),
                    result.name,
                    result.message
                )
            }
            (CheckStatus::Warn, true) => {
                use colored::Colorize;
                format!(
                    "    {} {:<20} {} ({duration_ms}ms)",
                    "!".yellow(),
                    result.name,
                    result.message.yellow()
                )
            }
            (CheckStatus::Fail, true) => {
                use colored::Colorize;
                format!(
                    "    {} {:<20} {} ({duration_ms}ms)",
                    "✗".red(),
                    result.name,
                    result.message.red()
                )
            }
            (status, false) => {
                let tag = match status {
                    CheckStatus::Pass => "[OK]  ",
                    CheckStatus::Warn => "[WARN]",
                    CheckStatus::Fail => "[FAIL]",
                };
                format!(
                    "    {tag} {:<20} {} ({duration_ms}ms)",
                    result.name, result.message
                )
            }
        };
        if result.status != CheckStatus::Pass {
            issues += 1;
        }
        println!("{line}");
    }

    println!();
    if issues > 0 {
        let issue_word = if issues == 1 { "issue" } else { "issues" };
        println!("  {issues} {issue_word} found.");
    } else {
        println!("  All checks passed.");
    }
    println!();
}

/// Check the profile configuration loads and validates.
fn check_config(paths: &ProfilePaths) -> CheckResult {
    let start = Instant::now();
    let (status, message) = match tmgc_config::load_and_validate(&paths.config_path) {
        Ok(config) if config.require_api_credentials().is_err() => (
            CheckStatus::Warn,
            "valid, API credentials not set".to_string(),
        ),
        Ok(_) => (CheckStatus::Pass, "valid".to_string()),
        Err(errors) => (
            CheckStatus::Fail,
            format!(
                "{} error(s) in {}",
                errors.len(),
                paths.config_path.display()
            ),
        ),
    };
    CheckResult {
        name: "Configuration".to_string(),
        status,
        message,
        duration: start.elapsed(),
    }
}

/// Check which session backend the selection chain settles on.
fn check_session_backend(rt: &Runtime) -> CheckResult {
    let start = Instant::now();
    let warnings = CollectedWarnings::default();
    let backend = select_backend(rt.config.session_store_preference(), &rt.paths, &warnings);
    let warnings = warnings.0.into_inner().unwrap_or_else(|p| p.into_inner());

    let (status, message) = match (backend.kind(), warnings.first()) {
        (BackendKind::Keyring, _) => (CheckStatus::Pass, "keyring".to_string()),
        (BackendKind::File, None) => (CheckStatus::Pass, "file".to_string()),
        (BackendKind::File, Some(warning)) => (CheckStatus::Warn, format!("file: {warning}")),
    };
    CheckResult {
        name: "Session backend".to_string(),
        status,
        message,
        duration: start.elapsed(),
    }
}

/// Check the peer directory file can be read.
fn check_peer_directory(paths: &ProfilePaths) -> CheckResult {
    let start = Instant::now();
    let (status, message) = if !paths.peers_path.exists() {
        (
            CheckStatus::Pass,
            "empty (created on first use)".to_string(),
        )
    } else {
        match PeerDirectory::open(&paths.peers_path) {
            Ok(directory) => (
                CheckStatus::Pass,
                format!(
                    "{} peer(s), contacts hash {}",
                    directory.len(),
                    directory.contacts_hash()
                ),
            ),
            Err(e) => (CheckStatus::Fail, e.to_string()),
        }
    };
    CheckResult {
        name: "Peer directory".to_string(),
        status,
        message,
        duration: start.elapsed(),
    }
}
