//! Error types for the FIFS registrar

use hns_registry::RegistryError;
use hns_types::{Node, Principal};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistrarError {
    #[error("Name already registered: {node} is owned by {owner}")]
    AlreadyRegistered { node: Node, owner: Principal },

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

pub type Result<T> = std::result::Result<T, RegistrarError>;
