//! Name service wiring
//!
//! Deploys a registry, a first-come-first-served registrar for one top-level
//! label and a public resolver, and resolves dotted names by following the
//! registry's resolver references through a directory of resolver instances.

pub mod config;
pub mod directory;
pub mod errors;
pub mod logging;
pub mod service;

pub use config::NameServiceConfig;
pub use directory::ResolverDirectory;
pub use errors::*;
pub use logging::init_tracing;
pub use service::{NameService, Resolution};
