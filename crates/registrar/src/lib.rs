//! First-come-first-served registrar
//!
//! A registrar is bound to one registry node and hands out its direct
//! children to whoever asks first. It must own its node in the registry for
//! registrations to succeed.

pub mod errors;
pub mod registrar;

pub use errors::*;
pub use registrar::FifsRegistrar;
