// SPDX-FileCopyrightText: 2026 tmgc Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Config error reporting.
//!
//! Figment extraction errors become [`ConfigError`] diagnostics that point
//! at the offending line of `config.toml`, or name the `TMGC_*` variable
//! that carried a bad value. Unknown keys get a "did you mean" hint.

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use std::fmt;

use figment::error::Kind;
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Jaro-Winkler score above which a known key is offered as a correction.
const SUGGESTION_THRESHOLD: f64 = 0.75;

const ENV_PREFIX: &str = "TMGC_";

/// Where a rejected value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueOrigin {
    /// The profile's `config.toml` (or an inline TOML string).
    File,
    /// A `TMGC_*` environment variable, by name.
    Env(String),
    /// Compiled defaults or a provider that did not say.
    Unknown,
}

impl fmt::Display for ValueOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File => f.write_str("config file"),
            Self::Env(var) => write!(f, "environment variable {var}"),
            Self::Unknown => f.write_str("unknown source"),
        }
    }
}

/// A configuration problem, renderable through miette.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// `config.toml` contains a key tmgc does not know.
    #[error("unknown configuration key `{key}`")]
    #[diagnostic(
        code(tmgc::config::unknown_key),
        help("{}", unknown_key_help(suggestion.as_deref(), valid_keys))
    )]
    UnknownKey {
        key: String,
        suggestion: Option<String>,
        valid_keys: String,
        #[label("not a tmgc setting")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A value has the wrong type, e.g. `api_id = "twelve"` or a
    /// non-numeric `TMGC_API_ID`.
    #[error("`{key}` from {origin} has the wrong type: {detail}")]
    #[diagnostic(
        code(tmgc::config::invalid_type),
        help("{}", invalid_type_help(origin, expected))
    )]
    InvalidType {
        key: String,
        origin: ValueOrigin,
        detail: String,
        expected: String,
        #[label("expected {expected}")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A value deserialized but is out of range.
    #[error("validation error: {message}")]
    #[diagnostic(code(tmgc::config::validation))]
    Validation { message: String },

    /// The file is not valid TOML or could not be read.
    #[error("malformed configuration: {0}")]
    #[diagnostic(
        code(tmgc::config::malformed),
        help("fix the file or rerun `tmgc auth config set` to rewrite it")
    )]
    Malformed(String),
}

fn unknown_key_help(suggestion: Option<&str>, valid_keys: &str) -> String {
    match suggestion {
        Some(s) => format!("did you mean `{s}`? Valid keys: {valid_keys}"),
        None => format!("valid keys: {valid_keys}"),
    }
}

fn invalid_type_help(origin: &ValueOrigin, expected: &str) -> String {
    match origin {
        ValueOrigin::Env(var) => format!("set {var} to {expected}, or unset it"),
        _ => format!("expected {expected}"),
    }
}

/// Converts a figment error into diagnostics, one per underlying error.
///
/// `source` is the config file name and contents when they could be read;
/// file-backed errors then carry a span.
pub fn figment_to_config_errors(
    err: figment::Error,
    source: Option<(&str, &str)>,
) -> Vec<ConfigError> {
    err.into_iter()
        .map(|error| match &error.kind {
            Kind::UnknownField(field, expected) => unknown_key(field, expected, source),
            Kind::InvalidType(actual, expected) => {
                let key = error.path.join(".");
                let origin = origin_of(&error, &key);
                let (span, src) = match origin {
                    ValueOrigin::File => locate(source, &key),
                    _ => (None, None),
                };
                ConfigError::InvalidType {
                    detail: format!("found {actual}"),
                    expected: expected.to_string(),
                    key,
                    origin,
                    span,
                    src,
                }
            }
            _ => ConfigError::Malformed(error.to_string()),
        })
        .collect()
}

fn unknown_key(field: &str, expected: &[&str], source: Option<(&str, &str)>) -> ConfigError {
    let (span, src) = locate(source, field);
    ConfigError::UnknownKey {
        key: field.to_string(),
        suggestion: suggest_key(field, expected),
        valid_keys: expected.join(", "),
        span,
        src,
    }
}

/// Decides which provider produced the value behind `error`.
fn origin_of(error: &figment::Error, key: &str) -> ValueOrigin {
    let Some(metadata) = &error.metadata else {
        return ValueOrigin::Unknown;
    };
    if metadata.name.contains("environment variable") {
        ValueOrigin::Env(format!("{ENV_PREFIX}{}", key.to_ascii_uppercase()))
    } else if metadata.name.contains("TOML") {
        ValueOrigin::File
    } else {
        ValueOrigin::Unknown
    }
}

fn locate(
    source: Option<(&str, &str)>,
    key: &str,
) -> (Option<SourceSpan>, Option<NamedSource<String>>) {
    let Some((name, content)) = source else {
        return (None, None);
    };
    match find_key_offset(content, key) {
        Some(offset) => (
            Some(SourceSpan::new(offset.into(), key.len())),
            Some(NamedSource::new(name, content.to_string())),
        ),
        None => (None, None),
    }
}

/// Byte offset of a top-level `key = ...` line in TOML content.
///
/// Comment lines are skipped. tmgc has no tables, so the search stops at the
/// first `[table]` header.
pub fn find_key_offset(content: &str, field: &str) -> Option<usize> {
    let mut offset = 0;
    for line in content.split_inclusive('\n') {
        let trimmed = line.trim_start();
        if trimmed.starts_with('[') {
            return None;
        }
        if !trimmed.starts_with('#') {
            let after = trimmed.strip_prefix(field).map(str::trim_start);
            if after.is_some_and(|rest| rest.starts_with('=')) {
                return Some(offset + line.len() - trimmed.len());
            }
        }
        offset += line.len();
    }
    None
}

/// The known key closest to `unknown`, if any is close enough.
pub fn suggest_key(unknown: &str, valid_keys: &[&str]) -> Option<String> {
    valid_keys
        .iter()
        .map(|key| (strsim::jaro_winkler(unknown, key), *key))
        .filter(|(score, _)| *score > SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, key)| key.to_string())
}

/// Prints every error to stderr with miette's graphical handler.
pub fn render_errors(errors: &[ConfigError]) {
    let handler = miette::GraphicalReportHandler::new();
    for error in errors {
        let mut buf = String::new();
        match handler.render_report(&mut buf, error as &dyn Diagnostic) {
            Ok(()) => eprint!("{buf}"),
            Err(_) => eprintln!("Error: {error}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEYS: &[&str] = &["api_id", "api_hash", "session_store", "log_level"];

    #[test]
    fn suggest_api_hash_for_typo() {
        assert_eq!(suggest_key("api_hsah", KEYS), Some("api_hash".to_string()));
    }

    #[test]
    fn suggest_session_store_for_typo() {
        assert_eq!(
            suggest_key("sesion_store", KEYS),
            Some("session_store".to_string())
        );
    }

    #[test]
    fn no_suggestion_for_distant_typo() {
        assert_eq!(suggest_key("zzzzzz", KEYS), None);
    }

    #[test]
    fn find_key_offset_points_at_key() {
        let content = "api_id = 1\n  api_hsah = \"x\"\n";
        let o = find_key_offset(content, "api_hsah").unwrap();
        assert_eq!(&content[o..o + 8], "api_hsah");
    }

    #[test]
    fn find_key_offset_ignores_prefix_matches() {
        assert_eq!(find_key_offset("api_idx = 1\n", "api_id"), None);
    }

    #[test]
    fn find_key_offset_skips_comments_and_stops_at_tables() {
        let content = "# api_id = 0\napi_id=1\n";
        assert_eq!(find_key_offset(content, "api_id"), Some(13));
        assert_eq!(find_key_offset("[extra]\napi_id = 1\n", "api_id"), None);
    }

    #[test]
    fn env_origin_names_the_variable() {
        let origin = ValueOrigin::Env("TMGC_API_ID".into());
        assert_eq!(origin.to_string(), "environment variable TMGC_API_ID");
        assert_eq!(
            invalid_type_help(&origin, "i64"),
            "set TMGC_API_ID to i64, or unset it"
        );
        assert_eq!(invalid_type_help(&ValueOrigin::File, "i64"), "expected i64");
    }
}
