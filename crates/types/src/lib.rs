//! Core identifiers shared by every name service component.
//!
//! Nodes are derived from labels through a Keccak-256 hash chain starting at
//! the all-zero root. Principals are opaque 32-byte identities that own nodes
//! and sign calls into the registry, registrar and resolvers.

pub mod address;
pub mod content;
pub mod interface;
pub mod node;

pub use address::*;
pub use content::*;
pub use interface::*;
pub use node::*;
