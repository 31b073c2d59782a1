//! Error types for the public resolver

use hns_registry::RegistryError;
use hns_types::{Node, Principal};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolverError {
    #[error("Unauthorized: {caller} does not own node {node}")]
    Unauthorized { node: Node, caller: Principal },

    #[error("Invalid content type: {0:#x}")]
    InvalidContentType(u32),

    #[error(transparent)]
    Registry(RegistryError),
}

impl From<RegistryError> for ResolverError {
    fn from(value: RegistryError) -> Self {
        match value {
            RegistryError::Unauthorized { node, caller } => Self::Unauthorized { node, caller },
            other => Self::Registry(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, ResolverError>;
