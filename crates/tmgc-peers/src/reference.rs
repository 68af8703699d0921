// SPDX-FileCopyrightText: 2026 tmgc Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command-line peer references.

use std::fmt;

use tmgc_core::PeerKey;

/// A peer reference as typed by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeerRef {
    /// A locally addressable key such as `u42` or `ch1001`.
    Key(PeerKey),
    /// Anything else (username, phone, bare number), passed on unmodified.
    Identifier(String),
}

impl fmt::Display for PeerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeerRef::Key(key) => key.fmt(f),
            PeerRef::Identifier(identifier) => f.write_str(identifier),
        }
    }
}

/// Classifies `input`.
///
/// The trimmed input is a key when it is a kind tag (`ch`, `u`, `c`,
/// checked in that order) followed by a decimal `i64`. A bare number has no
/// tag and is treated as an identifier.
pub fn parse_peer_ref(input: &str) -> PeerRef {
    match input.trim().parse::<PeerKey>() {
        Ok(key) => PeerRef::Key(key),
        Err(_) => PeerRef::Identifier(input.to_string()),
    }
}
