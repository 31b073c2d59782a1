//! Types for the public resolver

use hns_types::{ContentType, Node, Principal};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// SECP256k1-style public key coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PubKey {
    pub x: [u8; 32],
    pub y: [u8; 32],
}

/// Records held for a single node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverRecord {
    /// Address the node resolves to
    pub addr: Option<Principal>,
    /// Canonical name, used for reverse resolution
    pub name: Option<String>,
    /// ABI blobs keyed by encoding; empty blobs are never stored
    pub abis: BTreeMap<ContentType, Vec<u8>>,
    pub pubkey: Option<PubKey>,
    pub texts: BTreeMap<String, String>,
    pub contenthash: Option<Vec<u8>>,
}

impl ResolverRecord {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Change journal entry, appended after every successful write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ResolverEvent {
    AddrChanged { node: Node, addr: Principal },
    NameChanged { node: Node, name: String },
    AbiChanged { node: Node, content_type: ContentType },
    PubkeyChanged { node: Node, pubkey: PubKey },
    TextChanged { node: Node, key: String },
    ContenthashChanged { node: Node, hash: Vec<u8> },
}
