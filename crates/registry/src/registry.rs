//! Node registry implementation
//!
//! Holds the node → {owner, resolver, ttl} table. Each mutating call takes
//! the table's write lock once, checks the caller against the node's current
//! owner and only then writes, so a rejected call never leaves a trace.

use crate::errors::*;
use crate::types::*;
use hns_types::{LabelHash, Node, Principal};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Returns true when `caller` may mutate the node described by `record`.
///
/// The zero principal never authorizes anything, so unowned nodes can only be
/// reached through their parent.
pub fn authorize(record: &NodeRecord, caller: &Principal) -> bool {
    !caller.is_zero() && record.owner == *caller
}

/// Hierarchical node registry
#[derive(Debug)]
pub struct Registry {
    /// Node → record mapping, lazily populated
    records: Arc<RwLock<HashMap<Node, NodeRecord>>>,
    /// Successful mutations in commit order
    events: Arc<RwLock<Vec<RegistryEvent>>>,
}

impl Registry {
    /// Create a registry whose root node is owned by `initializer`.
    pub fn new(initializer: Principal) -> Self {
        let mut records = HashMap::new();
        records.insert(
            Node::ROOT,
            NodeRecord {
                owner: initializer,
                ..Default::default()
            },
        );
        info!(owner = %initializer, "Registry initialized");

        Self {
            records: Arc::new(RwLock::new(records)),
            events: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Owner of `node`, or the zero principal if it was never assigned.
    pub fn owner(&self, node: &Node) -> Principal {
        self.record(node).owner
    }

    /// Resolver reference of `node`.
    pub fn resolver(&self, node: &Node) -> Option<Principal> {
        self.record(node).resolver
    }

    pub fn ttl(&self, node: &Node) -> u64 {
        self.record(node).ttl
    }

    /// Full record of `node`, zero-valued if absent.
    pub fn record(&self, node: &Node) -> NodeRecord {
        self.records.read().get(node).copied().unwrap_or_default()
    }

    /// Transfer ownership of `node` to `new_owner`.
    pub fn set_owner(&self, caller: &Principal, node: &Node, new_owner: Principal) -> Result<()> {
        let mut records = self.records.write();
        Self::check(&records, node, caller)?;

        records.entry(*node).or_default().owner = new_owner;
        info!(node = %node.to_hex(), owner = %new_owner, "Node ownership transferred");
        self.emit(RegistryEvent::Transfer {
            node: *node,
            owner: new_owner,
        });
        Ok(())
    }

    /// Assign the child of `parent` named `label` to `new_owner`.
    pub fn set_subnode_owner(
        &self,
        caller: &Principal,
        parent: &Node,
        label: impl AsRef<[u8]>,
        new_owner: Principal,
    ) -> Result<Node> {
        self.set_subnode_owner_hashed(caller, parent, &LabelHash::of(label), new_owner)
    }

    /// Same as [`Registry::set_subnode_owner`] for an already hashed label.
    pub fn set_subnode_owner_hashed(
        &self,
        caller: &Principal,
        parent: &Node,
        label: &LabelHash,
        new_owner: Principal,
    ) -> Result<Node> {
        let mut records = self.records.write();
        Self::check(&records, parent, caller)?;
        Ok(self.assign_subnode(&mut records, parent, label, new_owner))
    }

    /// Assign a child of `parent` only if nobody owns it yet.
    ///
    /// The vacancy check and the assignment happen under one write lock. An
    /// owned child is reported before the caller's authority over `parent`
    /// is examined.
    pub fn claim_subnode(
        &self,
        caller: &Principal,
        parent: &Node,
        label: &LabelHash,
        new_owner: Principal,
    ) -> Result<Node> {
        let mut records = self.records.write();
        let child = parent.child_hashed(label);

        let current = records.get(&child).map(|r| r.owner).unwrap_or_default();
        if !current.is_zero() {
            warn!(node = %child.to_hex(), owner = %current, "Subnode claim rejected: already owned");
            return Err(RegistryError::SubnodeTaken {
                node: child,
                owner: current,
            });
        }

        Self::check(&records, parent, caller)?;
        Ok(self.assign_subnode(&mut records, parent, label, new_owner))
    }

    /// Point `node` at a resolver instance, or clear the reference.
    pub fn set_resolver(
        &self,
        caller: &Principal,
        node: &Node,
        resolver: Option<Principal>,
    ) -> Result<()> {
        let resolver = resolver.filter(|r| !r.is_zero());
        let mut records = self.records.write();
        Self::check(&records, node, caller)?;

        records.entry(*node).or_default().resolver = resolver;
        debug!(node = %node.to_hex(), resolver = ?resolver, "Resolver updated");
        self.emit(RegistryEvent::NewResolver {
            node: *node,
            resolver,
        });
        Ok(())
    }

    pub fn set_ttl(&self, caller: &Principal, node: &Node, ttl: u64) -> Result<()> {
        let mut records = self.records.write();
        Self::check(&records, node, caller)?;

        records.entry(*node).or_default().ttl = ttl;
        debug!(node = %node.to_hex(), ttl, "TTL updated");
        self.emit(RegistryEvent::NewTtl { node: *node, ttl });
        Ok(())
    }

    /// Run `f` while holding the registry's read lock, provided `caller`
    /// currently owns `node`.
    ///
    /// Collaborators that keep their own per-node state use this to make the
    /// ownership check and their write a single step: no ownership change can
    /// commit between the two.
    pub fn authorized<T>(
        &self,
        caller: &Principal,
        node: &Node,
        f: impl FnOnce() -> T,
    ) -> Result<T> {
        let records = self.records.read();
        Self::check(&records, node, caller)?;
        Ok(f())
    }

    /// Snapshot of the change journal.
    pub fn events(&self) -> Vec<RegistryEvent> {
        self.events.read().clone()
    }

    /// Number of nodes that have ever been written.
    pub fn node_count(&self) -> usize {
        self.records.read().len()
    }

    fn check(records: &HashMap<Node, NodeRecord>, node: &Node, caller: &Principal) -> Result<()> {
        let record = records.get(node).copied().unwrap_or_default();
        if authorize(&record, caller) {
            return Ok(());
        }

        warn!(node = %node.to_hex(), caller = %caller, "Rejected registry call from non-owner");
        Err(RegistryError::Unauthorized {
            node: *node,
            caller: *caller,
        })
    }

    fn assign_subnode(
        &self,
        records: &mut HashMap<Node, NodeRecord>,
        parent: &Node,
        label: &LabelHash,
        new_owner: Principal,
    ) -> Node {
        let child = parent.child_hashed(label);
        records.entry(child).or_default().owner = new_owner;
        info!(
            parent = %parent.to_hex(),
            node = %child.to_hex(),
            owner = %new_owner,
            "Subnode assigned"
        );
        self.emit(RegistryEvent::NewOwner {
            parent: *parent,
            label: *label,
            owner: new_owner,
        });
        child
    }

    fn emit(&self, event: RegistryEvent) {
        self.events.write().push(event);
    }
}
