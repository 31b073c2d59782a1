//! Public resolver implementation
//!
//! Reads are unauthenticated. Writes run inside [`Registry::authorized`], so
//! the ownership check and the record update form one step with respect to
//! every other registry and resolver operation.

use crate::errors::*;
use crate::types::*;
use hns_registry::Registry;
use hns_types::{
    ContentType, InterfaceId, Node, Principal, ABI_INTERFACE_ID, ADDR_INTERFACE_ID,
    CONTENTHASH_INTERFACE_ID, INTERFACE_META_ID, NAME_INTERFACE_ID, PUBKEY_INTERFACE_ID,
    TEXT_INTERFACE_ID,
};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Capabilities advertised through [`PublicResolver::supports_interface`].
pub const SUPPORTED_INTERFACES: [InterfaceId; 7] = [
    INTERFACE_META_ID,
    ADDR_INTERFACE_ID,
    NAME_INTERFACE_ID,
    ABI_INTERFACE_ID,
    PUBKEY_INTERFACE_ID,
    TEXT_INTERFACE_ID,
    CONTENTHASH_INTERFACE_ID,
];

/// Read side of a resolver, as needed by lookups that follow a registry
/// node's resolver reference.
pub trait NameResolver: Send + Sync {
    /// Identity the registry refers to this resolver by.
    fn address(&self) -> Principal;

    fn addr(&self, node: &Node) -> Option<Principal>;

    fn abi(&self, node: &Node, content_types: u32) -> (u32, Option<Vec<u8>>);

    fn supports_interface(&self, interface_id: InterfaceId) -> bool;
}

/// Resolver storing typed records for any node of one registry.
#[derive(Debug)]
pub struct PublicResolver {
    address: Principal,
    registry: Arc<Registry>,
    /// Node → records mapping, independent of registry state
    records: Arc<RwLock<HashMap<Node, ResolverRecord>>>,
    events: Arc<RwLock<Vec<ResolverEvent>>>,
}

impl PublicResolver {
    pub fn new(address: Principal, registry: Arc<Registry>) -> Self {
        Self {
            address,
            registry,
            records: Arc::new(RwLock::new(HashMap::new())),
            events: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn address(&self) -> Principal {
        self.address
    }

    /// Address record of `node`.
    pub fn addr(&self, node: &Node) -> Option<Principal> {
        self.records.read().get(node).and_then(|r| r.addr)
    }

    /// Overwrite the address record of `node`.
    pub fn set_addr(&self, caller: &Principal, node: &Node, addr: Principal) -> Result<()> {
        self.write(caller, node, |record| {
            record.addr = Some(addr);
            debug!(node = %node.to_hex(), addr = %addr, "Address record set");
            Ok(ResolverEvent::AddrChanged { node: *node, addr })
        })
    }

    /// First stored ABI whose content type is in `content_types`.
    ///
    /// Content types are tried in ascending bit order, so the lowest
    /// acceptable encoding wins regardless of when it was stored. Returns
    /// `(0, None)` when nothing matches.
    pub fn abi(&self, node: &Node, content_types: u32) -> (u32, Option<Vec<u8>>) {
        let records = self.records.read();
        let Some(record) = records.get(node) else {
            return (0, None);
        };

        ContentType::ALL
            .iter()
            .filter(|content_type| content_type.matches(content_types))
            .find_map(|content_type| {
                record
                    .abis
                    .get(content_type)
                    .filter(|data| !data.is_empty())
                    .map(|data| (content_type.bit(), Some(data.clone())))
            })
            .unwrap_or((0, None))
    }

    /// Store an ABI blob under a single content type bit.
    ///
    /// `content_type` must be exactly one of 1, 2, 4 or 8. Empty `data`
    /// removes the entry.
    pub fn set_abi(
        &self,
        caller: &Principal,
        node: &Node,
        content_type: u32,
        data: Vec<u8>,
    ) -> Result<()> {
        let parsed = ContentType::from_bit(content_type);
        self.write(caller, node, |record| {
            let Some(content_type) = parsed else {
                warn!(node = %node.to_hex(), content_type, "Rejected ABI with invalid content type");
                return Err(ResolverError::InvalidContentType(content_type));
            };

            if data.is_empty() {
                record.abis.remove(&content_type);
            } else {
                record.abis.insert(content_type, data);
            }
            debug!(node = %node.to_hex(), content_type = ?content_type, "ABI record set");
            Ok(ResolverEvent::AbiChanged {
                node: *node,
                content_type,
            })
        })
    }

    pub fn name(&self, node: &Node) -> Option<String> {
        self.records.read().get(node).and_then(|r| r.name.clone())
    }

    pub fn set_name(&self, caller: &Principal, node: &Node, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        self.write(caller, node, |record| {
            record.name = (!name.is_empty()).then(|| name.clone());
            Ok(ResolverEvent::NameChanged { node: *node, name })
        })
    }

    pub fn pubkey(&self, node: &Node) -> Option<PubKey> {
        self.records.read().get(node).and_then(|r| r.pubkey)
    }

    pub fn set_pubkey(&self, caller: &Principal, node: &Node, pubkey: PubKey) -> Result<()> {
        self.write(caller, node, |record| {
            record.pubkey = Some(pubkey);
            Ok(ResolverEvent::PubkeyChanged {
                node: *node,
                pubkey,
            })
        })
    }

    pub fn text(&self, node: &Node, key: &str) -> Option<String> {
        self.records
            .read()
            .get(node)
            .and_then(|r| r.texts.get(key).cloned())
    }

    /// Set a text record; an empty value removes the key.
    pub fn set_text(
        &self,
        caller: &Principal,
        node: &Node,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<()> {
        let (key, value) = (key.into(), value.into());
        self.write(caller, node, |record| {
            if value.is_empty() {
                record.texts.remove(&key);
            } else {
                record.texts.insert(key.clone(), value);
            }
            Ok(ResolverEvent::TextChanged { node: *node, key })
        })
    }

    pub fn contenthash(&self, node: &Node) -> Option<Vec<u8>> {
        self.records
            .read()
            .get(node)
            .and_then(|r| r.contenthash.clone())
    }

    pub fn set_contenthash(&self, caller: &Principal, node: &Node, hash: Vec<u8>) -> Result<()> {
        self.write(caller, node, |record| {
            record.contenthash = (!hash.is_empty()).then(|| hash.clone());
            Ok(ResolverEvent::ContenthashChanged { node: *node, hash })
        })
    }

    /// Whether this resolver implements the capability `interface_id`.
    pub fn supports_interface(&self, interface_id: InterfaceId) -> bool {
        SUPPORTED_INTERFACES.contains(&interface_id)
    }

    /// All records of `node`, default if nothing was ever stored.
    pub fn record(&self, node: &Node) -> ResolverRecord {
        self.records.read().get(node).cloned().unwrap_or_default()
    }

    /// Snapshot of the change journal.
    pub fn events(&self) -> Vec<ResolverEvent> {
        self.events.read().clone()
    }

    /// Apply `update` to a scratch copy of the node's records and commit it
    /// only when the caller owns the node and the update succeeds.
    fn write<F>(&self, caller: &Principal, node: &Node, update: F) -> Result<()>
    where
        F: FnOnce(&mut ResolverRecord) -> Result<ResolverEvent>,
    {
        self.registry
            .authorized(caller, node, || -> Result<()> {
                let mut records = self.records.write();
                let mut record = records.get(node).cloned().unwrap_or_default();
                let event = update(&mut record)?;

                if record.is_empty() {
                    records.remove(node);
                } else {
                    records.insert(*node, record);
                }
                self.events.write().push(event);
                Ok(())
            })
            .map_err(|err| {
                warn!(node = %node.to_hex(), caller = %caller, "Rejected resolver write from non-owner");
                ResolverError::from(err)
            })?
    }
}

impl NameResolver for PublicResolver {
    fn address(&self) -> Principal {
        self.address
    }

    fn addr(&self, node: &Node) -> Option<Principal> {
        PublicResolver::addr(self, node)
    }

    fn abi(&self, node: &Node, content_types: u32) -> (u32, Option<Vec<u8>>) {
        PublicResolver::abi(self, node, content_types)
    }

    fn supports_interface(&self, interface_id: InterfaceId) -> bool {
        PublicResolver::supports_interface(self, interface_id)
    }
}
