//! Directory of deployed resolver instances.
//!
//! Registry nodes only carry a resolver's identity; lookups use this
//! directory to reach the instance behind it.

use hns_resolver::NameResolver;
use hns_types::Principal;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Clone, Default)]
pub struct ResolverDirectory {
    resolvers: Arc<RwLock<HashMap<Principal, Arc<dyn NameResolver>>>>,
}

impl ResolverDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `resolver` reachable under its own address, replacing any
    /// instance previously published there.
    pub fn insert(&self, resolver: Arc<dyn NameResolver>) {
        self.resolvers.write().insert(resolver.address(), resolver);
    }

    pub fn get(&self, address: &Principal) -> Option<Arc<dyn NameResolver>> {
        self.resolvers.read().get(address).cloned()
    }

    pub fn len(&self) -> usize {
        self.resolvers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolvers.read().is_empty()
    }
}

impl std::fmt::Debug for ResolverDirectory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let addresses: Vec<Principal> = self.resolvers.read().keys().copied().collect();
        f.debug_struct("ResolverDirectory")
            .field("resolvers", &addresses)
            .finish()
    }
}
