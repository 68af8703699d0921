// SPDX-FileCopyrightText: 2026 tmgc Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Resolution through the directory and a scripted peer source.

use tmgc_core::{PeerKey, PeerRecord, TmgcError};
use tmgc_peers::PeerResolver;
use tmgc_test_utils::{MockPeerSource, TestProfile};

fn record(json: &str) -> PeerRecord {
    PeerRecord::from_json(json).unwrap()
}

#[tokio::test]
async fn miss_populates_directory_for_next_lookup() {
    let profile = TestProfile::new("default");
    let directory = profile.open_directory().unwrap();
    let source = MockPeerSource::new()
        .with_peer(PeerKey::channel(1001), record(r#"{"title":"News"}"#))
        .writing_to(directory.clone());
    let resolver = PeerResolver::new(directory.clone(), source.clone());

    let first = resolver.resolve("ch1001").await.unwrap();
    let second = resolver.resolve(" ch1001 ").await.unwrap();

    assert_eq!(first, second);
    assert_eq!(source.calls(), vec!["ch1001"]);
    assert!(directory.find(PeerKey::channel(1001)).is_some());
}

#[tokio::test]
async fn identifiers_always_reach_the_source() {
    let profile = TestProfile::new("default");
    let directory = profile.open_directory().unwrap();
    let source = MockPeerSource::new()
        .with_identifier("@durov", PeerKey::user(1), record(r#"{"username":"durov"}"#))
        .writing_to(directory.clone());
    let resolver = PeerResolver::new(directory.clone(), source.clone());

    let peer = resolver.resolve("@durov").await.unwrap();
    assert_eq!(peer.key, PeerKey::user(1));
    resolver.resolve("@durov").await.unwrap();

    assert_eq!(source.calls(), vec!["@durov", "@durov"]);
    assert_eq!(
        directory.find(PeerKey::user(1)),
        Some(record(r#"{"username":"durov"}"#))
    );
}

#[tokio::test]
async fn unknown_key_is_unresolvable() {
    let profile = TestProfile::new("default");
    let resolver = PeerResolver::new(profile.open_directory().unwrap(), MockPeerSource::new());

    let err = resolver.resolve("u404").await.unwrap_err();
    assert!(
        matches!(&err, TmgcError::Unresolvable { reference, .. } if reference == "u404"),
        "{err}"
    );
}

#[tokio::test]
async fn cached_peer_resolves_after_reopen_without_source() {
    let profile = TestProfile::new("default");
    profile
        .open_directory()
        .unwrap()
        .save(PeerKey::chat(7), record(r#"{"title":"Team"}"#))
        .unwrap();

    let source = MockPeerSource::new();
    let resolver = PeerResolver::new(profile.open_directory().unwrap(), source.clone());
    let peer = resolver.resolve("c7").await.unwrap();

    assert_eq!(peer.record.as_json(), r#"{"title":"Team"}"#);
    assert!(source.calls().is_empty());
}
