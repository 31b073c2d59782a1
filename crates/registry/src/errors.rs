//! Error types for the node registry

use hns_types::{Node, Principal};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Unauthorized: {caller} does not own node {node}")]
    Unauthorized { node: Node, caller: Principal },

    #[error("Subnode {node} is already owned by {owner}")]
    SubnodeTaken { node: Node, owner: Principal },
}

pub type Result<T> = std::result::Result<T, RegistryError>;
