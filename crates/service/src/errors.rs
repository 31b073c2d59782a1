//! Error types for the name service

use hns_registrar::RegistrarError;
use hns_registry::RegistryError;
use hns_resolver::ResolverError;
use hns_types::Principal;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Logging setup failed: {0}")]
    Logging(String),

    #[error("No resolver set for {name}")]
    NoResolver { name: String },

    #[error("Resolver {resolver} is not deployed")]
    UnknownResolver { resolver: Principal },

    #[error("Verification failed: {0}")]
    Verification(String),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Registrar(#[from] RegistrarError),

    #[error(transparent)]
    Resolver(#[from] ResolverError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ServiceError>;
