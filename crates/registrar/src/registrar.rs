//! FIFS registrar implementation

use crate::errors::*;
use hns_registry::{Registry, RegistryError};
use hns_types::{LabelHash, Node, Principal};
use std::sync::Arc;
use tracing::{info, warn};

/// Registrar granting children of `root_node` on a first-come basis.
///
/// Ownership goes straight from the registry to the requested owner; the
/// registrar never holds a child itself and there is no way to re-register
/// or reclaim a name once granted.
#[derive(Debug, Clone)]
pub struct FifsRegistrar {
    /// Identity the registrar uses when calling into the registry
    address: Principal,
    registry: Arc<Registry>,
    root_node: Node,
}

impl FifsRegistrar {
    pub fn new(address: Principal, registry: Arc<Registry>, root_node: Node) -> Self {
        Self {
            address,
            registry,
            root_node,
        }
    }

    pub fn address(&self) -> Principal {
        self.address
    }

    pub fn root_node(&self) -> Node {
        self.root_node
    }

    /// Node a registration of `label` would create.
    pub fn node_for(&self, label: impl AsRef<[u8]>) -> Node {
        self.root_node.child(label)
    }

    /// Whether `label` can still be registered.
    pub fn available(&self, label: impl AsRef<[u8]>) -> bool {
        self.registry.owner(&self.node_for(label)).is_zero()
    }

    /// Register `label` under the root node for `requested_owner`.
    pub fn register(
        &self,
        caller: &Principal,
        label: impl AsRef<[u8]>,
        requested_owner: Principal,
    ) -> Result<Node> {
        self.register_hashed(caller, &LabelHash::of(label), requested_owner)
    }

    /// Register an already hashed label.
    ///
    /// Fails with `AlreadyRegistered` whenever the child has any owner, the
    /// caller included. A registrar that does not own its root node surfaces
    /// the registry's `Unauthorized` error untouched.
    pub fn register_hashed(
        &self,
        caller: &Principal,
        label: &LabelHash,
        requested_owner: Principal,
    ) -> Result<Node> {
        let node = self
            .registry
            .claim_subnode(&self.address, &self.root_node, label, requested_owner)
            .map_err(|err| match err {
                RegistryError::SubnodeTaken { node, owner } => {
                    RegistrarError::AlreadyRegistered { node, owner }
                }
                other => {
                    warn!(
                        registrar = %self.address,
                        root = %self.root_node.to_hex(),
                        "Registrar does not control its root node"
                    );
                    RegistrarError::Registry(other)
                }
            })?;

        info!(
            node = %node.to_hex(),
            owner = %requested_owner,
            requested_by = %caller,
            "Name registered"
        );
        Ok(node)
    }
}
