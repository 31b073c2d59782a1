//! Public resolver for per-node records
//!
//! Stores the address, ABI, name, public key, text and content hash records
//! of registry nodes. The resolver keeps no ownership state of its own: every
//! write is authorized against the registry it was constructed with.

pub mod errors;
pub mod resolver;
pub mod types;

pub use errors::*;
pub use resolver::{NameResolver, PublicResolver, SUPPORTED_INTERFACES};
pub use types::*;
