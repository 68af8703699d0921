// SPDX-FileCopyrightText: 2026 tmgc Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Peer directory and reference resolution for tmgc.
//!
//! [`PeerDirectory`] is a single-file JSON cache of resolved peers with a
//! phone index and a contacts freshness token, replaced atomically on every
//! mutation. [`PeerResolver`] turns user references into peers, consulting
//! the directory before the protocol client's [`PeerSource`].

pub mod directory;
pub mod reference;
pub mod resolver;

pub use directory::PeerDirectory;
pub use reference::{PeerRef, parse_peer_ref};
pub use resolver::{PeerResolver, PeerSource, ResolvedPeer};
