//! Four-byte capability tags used for feature discovery on resolvers.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InterfaceId(pub [u8; 4]);

impl InterfaceId {
    pub const fn from_u32(value: u32) -> Self {
        Self(value.to_be_bytes())
    }

    pub fn as_u32(&self) -> u32 {
        u32::from_be_bytes(self.0)
    }
}

impl fmt::Display for InterfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.as_u32())
    }
}

impl fmt::Debug for InterfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InterfaceId({self})")
    }
}

/// Capability discovery itself.
pub const INTERFACE_META_ID: InterfaceId = InterfaceId::from_u32(0x01ff_c9a7);
/// `addr` / `set_addr`.
pub const ADDR_INTERFACE_ID: InterfaceId = InterfaceId::from_u32(0x3b3b_57de);
/// `name` / `set_name`.
pub const NAME_INTERFACE_ID: InterfaceId = InterfaceId::from_u32(0x691f_3431);
/// `abi` / `set_abi`.
pub const ABI_INTERFACE_ID: InterfaceId = InterfaceId::from_u32(0x2203_ab56);
/// `pubkey` / `set_pubkey`.
pub const PUBKEY_INTERFACE_ID: InterfaceId = InterfaceId::from_u32(0xc869_0233);
/// `text` / `set_text`.
pub const TEXT_INTERFACE_ID: InterfaceId = InterfaceId::from_u32(0x59d1_d43c);
/// `contenthash` / `set_contenthash`.
pub const CONTENTHASH_INTERFACE_ID: InterfaceId = InterfaceId::from_u32(0xbc1c_58d1);
