//! Node ownership registry
//!
//! The registry is the single source of truth for who owns which node of the
//! naming hierarchy, which resolver is responsible for a node's records and
//! how long those records may be cached. Every mutation is gated on the
//! caller being the current owner of the exact node being changed.

pub mod errors;
pub mod registry;
pub mod types;

pub use errors::*;
pub use registry::{authorize, Registry};
pub use types::*;
