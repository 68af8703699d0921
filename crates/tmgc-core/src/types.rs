// SPDX-FileCopyrightText: 2026 tmgc Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the peer directory, resolver, and credential vault.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, DeserializeOwned, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::value::RawValue;
use strum::{Display, EnumString};

/// Discriminant of a peer entity.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString, Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PeerKind {
    User,
    Chat,
    Channel,
}

impl PeerKind {
    /// Prefix used in the string form of a [`PeerKey`].
    pub fn prefix(self) -> &'static str {
        match self {
            PeerKind::User => "u",
            PeerKind::Chat => "c",
            PeerKind::Channel => "ch",
        }
    }
}

/// Identifies one peer entity across the directory.
///
/// The string form is the kind prefix followed by the decimal id
/// (`u42`, `c7`, `ch1001`) and is what the directory file stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PeerKey {
    pub kind: PeerKind,
    pub id: i64,
}

impl PeerKey {
    pub fn new(kind: PeerKind, id: i64) -> Self {
        Self { kind, id }
    }

    pub fn user(id: i64) -> Self {
        Self::new(PeerKind::User, id)
    }

    pub fn chat(id: i64) -> Self {
        Self::new(PeerKind::Chat, id)
    }

    pub fn channel(id: i64) -> Self {
        Self::new(PeerKind::Channel, id)
    }
}

impl fmt::Display for PeerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind.prefix(), self.id)
    }
}

/// Error returned when a string is not a valid [`PeerKey`] encoding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid peer key `{0}`")]
pub struct ParsePeerKeyError(pub String);

impl FromStr for PeerKey {
    type Err = ParsePeerKeyError;

    /// Parses the storage encoding. `ch` is checked before `c` since both
    /// start with the same letter.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, digits) = if let Some(rest) = s.strip_prefix("ch") {
            (PeerKind::Channel, rest)
        } else if let Some(rest) = s.strip_prefix('u') {
            (PeerKind::User, rest)
        } else if let Some(rest) = s.strip_prefix('c') {
            (PeerKind::Chat, rest)
        } else {
            return Err(ParsePeerKeyError(s.to_string()));
        };

        let id = digits
            .parse::<i64>()
            .map_err(|_| ParsePeerKeyError(s.to_string()))?;
        Ok(Self { kind, id })
    }
}

impl Serialize for PeerKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PeerKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PeerKeyVisitor;

        impl Visitor<'_> for PeerKeyVisitor {
            type Value = PeerKey;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a peer key such as `u42`, `c7` or `ch1001`")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<PeerKey, E> {
                v.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_str(PeerKeyVisitor)
    }
}

/// Opaque resolved-peer metadata produced by the protocol client.
///
/// The raw JSON text is kept verbatim so a record is returned byte-for-byte
/// as it was saved.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PeerRecord(Box<RawValue>);

impl PeerRecord {
    /// Wraps already-encoded JSON. Fails if `json` is not valid JSON.
    pub fn from_json(json: impl Into<String>) -> Result<Self, serde_json::Error> {
        RawValue::from_string(json.into()).map(Self)
    }

    /// Encodes a collaborator value into a record.
    pub fn from_value<T: Serialize>(value: &T) -> Result<Self, serde_json::Error> {
        serde_json::value::to_raw_value(value).map(Self)
    }

    /// The raw JSON text of the record.
    pub fn as_json(&self) -> &str {
        self.0.get()
    }

    /// Decodes the record into a collaborator type.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(self.0.get())
    }
}

impl PartialEq for PeerRecord {
    fn eq(&self, other: &Self) -> bool {
        self.as_json() == other.as_json()
    }
}

impl Eq for PeerRecord {}

/// Where the user asked for session credentials to be stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionStorePreference {
    /// Nothing configured; behaves like [`SessionStorePreference::Keyring`].
    #[default]
    Unset,
    /// Try the OS secret store, falling back to the plaintext file.
    Keyring,
    /// Always use the plaintext session file.
    File,
}

impl SessionStorePreference {
    /// Lenient parse used for values read from config files and the
    /// environment. Unrecognized values are treated as unset.
    pub fn normalize(raw: Option<&str>) -> Self {
        raw.and_then(|v| v.parse().ok()).unwrap_or_default()
    }

    /// The value written back to the config file, `None` when unset.
    pub fn as_config_value(self) -> Option<&'static str> {
        match self {
            SessionStorePreference::Unset => None,
            SessionStorePreference::Keyring => Some("keyring"),
            SessionStorePreference::File => Some("file"),
        }
    }
}

impl fmt::Display for SessionStorePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_config_value().unwrap_or("default"))
    }
}

/// Error for a session store name other than `keyring` or `file`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid session store `{0}` (use keyring or file)")]
pub struct ParseSessionStoreError(pub String);

impl FromStr for SessionStorePreference {
    type Err = ParseSessionStoreError;

    /// Strict parse: trims and lowercases, then accepts `keyring` or `file`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "keyring" => Ok(SessionStorePreference::Keyring),
            "file" => Ok(SessionStorePreference::File),
            _ => Err(ParseSessionStoreError(s.to_string())),
        }
    }
}

/// The kind of session backend chosen at bootstrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// OS-native secret store (keychain, credential manager, kernel keyring).
    Keyring,
    /// Unencrypted session file in the profile directory.
    File,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn any_kind() -> impl Strategy<Value = PeerKind> {
        prop_oneof![
            Just(PeerKind::User),
            Just(PeerKind::Chat),
            Just(PeerKind::Channel),
        ]
    }

    proptest! {
        #[test]
        fn peer_key_string_form_parses_back(kind in any_kind(), id in any::<i64>()) {
            let key = PeerKey::new(kind, id);
            let parsed: PeerKey = key.to_string().parse().unwrap();
            prop_assert_eq!(parsed, key);
        }

        #[test]
        fn strings_without_a_kind_prefix_are_rejected(s in "[^uc].*") {
            prop_assert!(s.parse::<PeerKey>().is_err());
        }
    }

    #[test]
    fn peer_key_prefixes() {
        assert_eq!(PeerKey::user(42).to_string(), "u42");
        assert_eq!(PeerKey::chat(7).to_string(), "c7");
        assert_eq!(PeerKey::channel(1001).to_string(), "ch1001");
        assert_eq!(PeerKey::channel(-5).to_string(), "ch-5");
    }

    #[test]
    fn channel_prefix_wins_over_chat() {
        assert_eq!("ch12".parse::<PeerKey>().unwrap(), PeerKey::channel(12));
        assert_eq!("c12".parse::<PeerKey>().unwrap(), PeerKey::chat(12));
    }

    #[test]
    fn malformed_keys_are_rejected() {
        for raw in ["", "u", "ch", "x12", "u12a", "chat12", "u 12", "12"] {
            assert!(raw.parse::<PeerKey>().is_err(), "{raw} should not parse");
        }
    }

    #[test]
    fn peer_key_serializes_as_string() {
        let json = serde_json::to_string(&PeerKey::channel(3)).unwrap();
        assert_eq!(json, "\"ch3\"");
        let back: PeerKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, PeerKey::channel(3));
        assert!(serde_json::from_str::<PeerKey>("\"z3\"").is_err());
    }

    #[test]
    fn peer_record_keeps_raw_text() {
        let raw = r#"{"access_hash":-9007199254740993,"name":"Ann","f":1.50}"#;
        let record = PeerRecord::from_json(raw).unwrap();
        assert_eq!(record.as_json(), raw);

        let wrapped = serde_json::to_string(&record).unwrap();
        assert_eq!(wrapped, raw);
    }

    #[test]
    fn peer_record_rejects_invalid_json() {
        assert!(PeerRecord::from_json("{not json").is_err());
    }

    #[test]
    fn session_store_normalization() {
        assert_eq!(
            SessionStorePreference::normalize(Some(" KeyRing ")),
            SessionStorePreference::Keyring
        );
        assert_eq!(
            SessionStorePreference::normalize(Some("file")),
            SessionStorePreference::File
        );
        assert_eq!(
            SessionStorePreference::normalize(Some("vault")),
            SessionStorePreference::Unset
        );
        assert_eq!(
            SessionStorePreference::normalize(None),
            SessionStorePreference::Unset
        );
        assert!("vault".parse::<SessionStorePreference>().is_err());
    }

    #[test]
    fn session_store_display() {
        assert_eq!(SessionStorePreference::Unset.to_string(), "default");
        assert_eq!(SessionStorePreference::File.to_string(), "file");
        assert_eq!(BackendKind::Keyring.to_string(), "keyring");
    }
}
