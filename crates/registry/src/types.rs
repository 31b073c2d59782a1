//! Types for the node registry

use hns_types::{LabelHash, Node, Principal};
use serde::{Deserialize, Serialize};

/// Per-node registry entry.
///
/// Entries are created on first write and never removed; an all-default
/// record is indistinguishable from a node nobody has touched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    /// Current owner, `Principal::ZERO` when unowned
    pub owner: Principal,
    /// Identity of the resolver instance holding this node's records
    pub resolver: Option<Principal>,
    /// Caching hint for resolved records, in seconds
    pub ttl: u64,
}

/// Change journal entry, appended after every successful mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RegistryEvent {
    /// Ownership of `node` moved to `owner` through `set_owner`.
    Transfer { node: Node, owner: Principal },
    /// A child of `parent` was assigned to `owner`.
    NewOwner {
        parent: Node,
        label: LabelHash,
        owner: Principal,
    },
    NewResolver {
        node: Node,
        resolver: Option<Principal>,
    },
    NewTtl { node: Node, ttl: u64 },
}
