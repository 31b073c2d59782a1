//! Content types for ABI records.

use serde::{Deserialize, Serialize};

/// Encoding of a stored ABI blob. Each variant is a single bit so callers can
/// express the set of encodings they accept as a mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Json = 1,
    ZlibJson = 2,
    Cbor = 4,
    Uri = 8,
}

impl ContentType {
    /// Every content type in ascending bit order, which is also query priority.
    pub const ALL: [ContentType; 4] = [
        ContentType::Json,
        ContentType::ZlibJson,
        ContentType::Cbor,
        ContentType::Uri,
    ];

    /// Mask accepting every known content type.
    pub const ANY: u32 = 0b1111;

    /// Exact single-bit lookup; combined masks and unknown bits yield `None`.
    pub fn from_bit(bit: u32) -> Option<Self> {
        match bit {
            1 => Some(ContentType::Json),
            2 => Some(ContentType::ZlibJson),
            4 => Some(ContentType::Cbor),
            8 => Some(ContentType::Uri),
            _ => None,
        }
    }

    pub fn bit(self) -> u32 {
        self as u32
    }

    pub fn matches(self, mask: u32) -> bool {
        mask & self.bit() != 0
    }
}
