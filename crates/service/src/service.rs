//! Deployment and lookup flow
//!
//! Deployment creates the registry, hands the top-level label to a FIFS
//! registrar and publishes a public resolver. Lookups go name → node →
//! registry resolver reference → resolver record.

use crate::config::NameServiceConfig;
use crate::directory::ResolverDirectory;
use crate::errors::*;
use hns_registrar::FifsRegistrar;
use hns_registry::Registry;
use hns_resolver::PublicResolver;
use hns_types::{namehash, ContentType, Node, Principal};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Nonce used to derive the registrar's identity from the deployer.
const REGISTRAR_NONCE: u64 = 1;
/// Nonce used to derive the public resolver's identity from the deployer.
const RESOLVER_NONCE: u64 = 2;

/// Result of resolving a dotted name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub name: String,
    pub node: Node,
    pub owner: Principal,
    pub resolver: Principal,
    pub ttl: u64,
    pub addr: Option<Principal>,
}

/// A deployed registry, registrar and public resolver.
#[derive(Debug)]
pub struct NameService {
    config: NameServiceConfig,
    registry: Arc<Registry>,
    registrar: FifsRegistrar,
    resolver: Arc<PublicResolver>,
    directory: ResolverDirectory,
}

impl NameService {
    /// Deploy all components for `config`.
    pub fn deploy(config: NameServiceConfig) -> Result<Self> {
        config.validate()?;
        let deployer = config.deployer;

        let registry = Arc::new(Registry::new(deployer));

        let tld_node = namehash(&config.tld);
        let registrar = FifsRegistrar::new(
            Principal::derive(&deployer, REGISTRAR_NONCE),
            registry.clone(),
            tld_node,
        );
        registry.set_subnode_owner(&deployer, &Node::ROOT, &config.tld, registrar.address())?;

        let resolver = Arc::new(PublicResolver::new(
            Principal::derive(&deployer, RESOLVER_NONCE),
            registry.clone(),
        ));
        let directory = ResolverDirectory::new();
        directory.insert(resolver.clone());

        info!(
            tld = %config.tld,
            registrar = %registrar.address(),
            resolver = %resolver.address(),
            "Name service deployed"
        );

        Ok(Self {
            config,
            registry,
            registrar,
            resolver,
            directory,
        })
    }

    pub fn config(&self) -> &NameServiceConfig {
        &self.config
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    pub fn registrar(&self) -> &FifsRegistrar {
        &self.registrar
    }

    pub fn resolver(&self) -> &Arc<PublicResolver> {
        &self.resolver
    }

    pub fn directory(&self) -> &ResolverDirectory {
        &self.directory
    }

    /// Resolve `name` through the registry's resolver reference.
    pub fn lookup(&self, name: &str) -> Result<Resolution> {
        let node = namehash(name);
        let record = self.registry.record(&node);
        let resolver_address = record.resolver.ok_or_else(|| ServiceError::NoResolver {
            name: name.to_string(),
        })?;
        let resolver = self
            .directory
            .get(&resolver_address)
            .ok_or(ServiceError::UnknownResolver {
                resolver: resolver_address,
            })?;

        Ok(Resolution {
            name: name.to_string(),
            node,
            owner: record.owner,
            resolver: resolver_address,
            ttl: record.ttl,
            addr: resolver.addr(&node),
        })
    }

    /// ABI of `name` in the first acceptable encoding.
    pub fn lookup_abi(&self, name: &str, content_types: u32) -> Result<(u32, Option<Vec<u8>>)> {
        let resolution = self.lookup(name)?;
        let resolver = self
            .directory
            .get(&resolution.resolver)
            .ok_or(ServiceError::UnknownResolver {
                resolver: resolution.resolver,
            })?;
        Ok(resolver.abi(&resolution.node, content_types))
    }

    /// Register `label` under the top-level label for `owner`, point it at
    /// the public resolver and publish `addr` and a JSON `abi`.
    ///
    /// Every step is read back and checked before moving on.
    pub fn register_and_publish(
        &self,
        owner: &Principal,
        label: &str,
        addr: Principal,
        abi: &serde_json::Value,
    ) -> Result<Node> {
        let name = format!("{label}.{}", self.config.tld);

        let node = self.registrar.register(owner, label, *owner)?;
        if self.registry.owner(&node) != *owner {
            return Err(ServiceError::Verification(format!(
                "Failed to register '{name}'"
            )));
        }
        info!("Successfully registered '{name}'");

        self.registry
            .set_resolver(owner, &node, Some(self.resolver.address()))?;
        if self.registry.resolver(&node) != Some(self.resolver.address()) {
            return Err(ServiceError::Verification(format!(
                "Failed to set resolver for '{name}'"
            )));
        }
        info!("Successfully set resolver for '{name}'");

        self.resolver.set_addr(owner, &node, addr)?;
        if self.resolver.addr(&node) != Some(addr) {
            return Err(ServiceError::Verification(format!(
                "Failed to set address in resolver for '{name}'"
            )));
        }
        info!("Successfully set address for '{name}' in resolver");

        let json = ContentType::Json.bit();
        self.resolver
            .set_abi(owner, &node, json, serde_json::to_vec(abi)?)?;
        let stored = match self.resolver.abi(&node, json) {
            (bit, Some(data)) if bit == json => serde_json::from_slice::<serde_json::Value>(&data)?,
            _ => serde_json::Value::Null,
        };
        if stored != *abi {
            return Err(ServiceError::Verification(format!(
                "Failed to store ABI in resolver for '{name}'"
            )));
        }
        info!("Successfully set ABI for '{name}' in resolver");

        Ok(node)
    }
}
