// SPDX-FileCopyrightText: 2026 tmgc Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the peer directory file.

use std::sync::Arc;
use std::thread;

use proptest::prelude::*;
use serde::{Deserialize, Serialize};
use tmgc_core::fs::tmp_path;
use tmgc_core::{PeerKey, PeerKind, PeerRecord};
use tmgc_peers::PeerDirectory;
use tmgc_test_utils::TestProfile;

fn record_for(key: PeerKey) -> PeerRecord {
    PeerRecord::from_json(format!(r#"{{"kind":"{}","id":{}}}"#, key.kind, key.id)).unwrap()
}

/// Contacts hash and a saved user survive a restart.
#[test]
fn contacts_hash_and_user_survive_reopen() {
    let profile = TestProfile::new("default");
    let path = &profile.paths().peers_path;

    {
        let directory = PeerDirectory::open(path).unwrap();
        directory.save_contacts_hash(77).unwrap();
        directory.save(PeerKey::user(42), record_for(PeerKey::user(42))).unwrap();
    }

    let directory = PeerDirectory::open(path).unwrap();
    assert_eq!(directory.contacts_hash(), 77);
    assert_eq!(
        directory.find(PeerKey::user(42)),
        Some(record_for(PeerKey::user(42)))
    );
}

/// A phone entry pointing at a peer that was never saved is not found.
#[test]
fn stale_phone_entry_is_not_found() {
    let profile = TestProfile::new("default");
    let directory = profile.open_directory().unwrap();

    directory.save_phone("+15550100", PeerKey::user(9)).unwrap();
    assert_eq!(directory.find_phone("+15550100"), None);

    let reopened = PeerDirectory::open(&profile.paths().peers_path).unwrap();
    assert_eq!(reopened.find_phone("+15550100"), None);
}

/// A half-written temp file left by a crash never shadows the committed file.
#[test]
fn truncated_tmp_does_not_affect_committed_state() {
    let profile = TestProfile::new("default");
    let path = &profile.paths().peers_path;
    {
        let directory = PeerDirectory::open(path).unwrap();
        directory.save(PeerKey::channel(1), record_for(PeerKey::channel(1))).unwrap();
        directory.save_contacts_hash(3).unwrap();
    }
    let committed = std::fs::read(path).unwrap();
    std::fs::write(tmp_path(path), &committed[..committed.len() / 2]).unwrap();

    let directory = PeerDirectory::open(path).unwrap();
    assert_eq!(directory.contacts_hash(), 3);
    assert_eq!(std::fs::read(path).unwrap(), committed);
}

/// Directories created by the first persist are private to the owner.
#[cfg(unix)]
#[test]
fn persist_creates_private_parent_and_file() {
    use std::os::unix::fs::PermissionsExt;

    let profile = TestProfile::new("default");
    let path = profile.paths().profile_dir.join("nested").join("peers.json");
    let directory = PeerDirectory::open(&path).unwrap();
    directory.save_contacts_hash(1).unwrap();

    let dir_mode = std::fs::metadata(path.parent().unwrap())
        .unwrap()
        .permissions()
        .mode();
    let file_mode = std::fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(dir_mode & 0o777, 0o700);
    assert_eq!(file_mode & 0o777, 0o600);
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Contact {
    id: i64,
    phone: String,
}

/// Writers on several threads sharing one directory lose no entries.
#[test]
fn concurrent_writers_keep_every_entry() {
    const THREADS: i64 = 8;
    const PER_THREAD: i64 = 25;

    let profile = TestProfile::new("default");
    let directory = profile.open_directory().unwrap();

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let directory = Arc::clone(&directory);
            thread::spawn(move || {
                for i in 0..PER_THREAD {
                    let id = t * 100 + i;
                    let contact = Contact {
                        id,
                        phone: format!("+{id}"),
                    };
                    let key = PeerKey::user(id);
                    directory
                        .save(key, PeerRecord::from_value(&contact).unwrap())
                        .unwrap();
                    directory.save_phone(&contact.phone, key).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let reopened = PeerDirectory::open(directory.path()).unwrap();
    assert_eq!(reopened.len(), (THREADS * PER_THREAD) as usize);
    for t in 0..THREADS {
        for i in 0..PER_THREAD {
            let id = t * 100 + i;
            let (key, record) = reopened.find_phone(&format!("+{id}")).unwrap();
            assert_eq!(key, PeerKey::user(id));
            let contact: Contact = record.decode().unwrap();
            assert_eq!(contact.id, id);
            assert_eq!(contact.phone, format!("+{id}"));
        }
    }
}

fn any_key() -> impl Strategy<Value = PeerKey> {
    (
        prop_oneof![
            Just(PeerKind::User),
            Just(PeerKind::Chat),
            Just(PeerKind::Channel)
        ],
        -1000i64..1000,
    )
        .prop_map(|(kind, id)| PeerKey::new(kind, id))
}

#[derive(Debug, Clone)]
enum Op {
    Save(PeerKey),
    Phone(String, PeerKey),
    Hash(i64),
}

fn any_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        any_key().prop_map(Op::Save),
        ("\\+1555[0-9]{2}", any_key()).prop_map(|(p, k)| Op::Phone(p, k)),
        any::<i64>().prop_map(Op::Hash),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// `find_phone(p)` succeeds exactly when the indexed key has a record,
    /// and the whole logical state survives a reopen.
    #[test]
    fn phone_law_and_reopen(ops in prop::collection::vec(any_op(), 1..24)) {
        let profile = TestProfile::new("default");
        let path = profile.paths().peers_path.clone();
        let directory = PeerDirectory::open(&path).unwrap();

        let mut phones = std::collections::BTreeMap::new();
        for op in &ops {
            match op {
                Op::Save(key) => directory.save(*key, record_for(*key)).unwrap(),
                Op::Phone(phone, key) => {
                    directory.save_phone(phone, *key).unwrap();
                    phones.insert(phone.clone(), *key);
                }
                Op::Hash(value) => directory.save_contacts_hash(*value).unwrap(),
            }
        }

        let reopened = PeerDirectory::open(&path).unwrap();
        for (phone, key) in &phones {
            let by_phone = reopened.find_phone(phone);
            let by_key = reopened.find(*key);
            prop_assert_eq!(by_phone.is_some(), by_key.is_some());
            if let Some((found_key, record)) = by_phone {
                prop_assert_eq!(found_key, *key);
                prop_assert_eq!(Some(record), by_key);
            }
        }
        prop_assert_eq!(reopened.len(), directory.len());
        prop_assert_eq!(reopened.contacts_hash(), directory.contacts_hash());
    }
}
