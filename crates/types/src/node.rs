//! Node identifiers and the label hash chain.
//!
//! `node(parent, label) = keccak256(parent ++ keccak256(label))`, with the
//! root node being 32 zero bytes.

use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Width in bytes of node and label identifiers.
pub const NODE_BYTES: usize = 32;

/// Errors produced when parsing hex encoded node or label hashes.
#[derive(Debug, Error)]
pub enum NodeParseError {
    #[error("identifier is not valid hexadecimal")]
    InvalidHex(#[from] hex::FromHexError),
    #[error("identifier must be exactly 32 bytes, got {0}")]
    InvalidLength(usize),
}

/// Keccak-256 of arbitrary bytes.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    Keccak256::digest(data).into()
}

fn parse_hash(value: &str) -> Result<[u8; NODE_BYTES], NodeParseError> {
    let payload = value.strip_prefix("0x").unwrap_or(value);
    let bytes = hex::decode(payload)?;
    let len = bytes.len();
    bytes
        .try_into()
        .map_err(|_| NodeParseError::InvalidLength(len))
}

/// Hash of a single human-readable label.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LabelHash(pub [u8; NODE_BYTES]);

impl LabelHash {
    /// Hash the raw bytes of a label.
    pub fn of(label: impl AsRef<[u8]>) -> Self {
        Self(keccak256(label.as_ref()))
    }

    pub fn as_bytes(&self) -> &[u8; NODE_BYTES] {
        &self.0
    }
}

impl fmt::Display for LabelHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for LabelHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LabelHash({self})")
    }
}

impl FromStr for LabelHash {
    type Err = NodeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hash(s).map(LabelHash)
    }
}

impl From<LabelHash> for String {
    fn from(value: LabelHash) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for LabelHash {
    type Error = NodeParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A point in the naming hierarchy.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Node(pub [u8; NODE_BYTES]);

impl Node {
    /// The root of the hierarchy.
    pub const ROOT: Node = Node([0u8; NODE_BYTES]);

    pub fn new(bytes: [u8; NODE_BYTES]) -> Self {
        Self(bytes)
    }

    /// Child of this node reached through an already hashed label.
    pub fn child_hashed(&self, label: &LabelHash) -> Node {
        let mut hasher = Keccak256::new();
        hasher.update(self.0);
        hasher.update(label.0);
        Node(hasher.finalize().into())
    }

    /// Child of this node reached through a plain label.
    pub fn child(&self, label: impl AsRef<[u8]>) -> Node {
        self.child_hashed(&LabelHash::of(label))
    }

    pub fn as_bytes(&self) -> &[u8; NODE_BYTES] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        *self == Node::ROOT
    }

    /// Short hex form used in log fields.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({self})")
    }
}

impl FromStr for Node {
    type Err = NodeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hash(s).map(Node)
    }
}

impl From<Node> for String {
    fn from(value: Node) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for Node {
    type Error = NodeParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Node of a dotted name such as `test.eth`.
///
/// Labels are folded from the rightmost one towards the root; the empty name
/// is the root itself.
pub fn namehash(name: &str) -> Node {
    if name.is_empty() {
        return Node::ROOT;
    }
    name.rsplit('.')
        .fold(Node::ROOT, |parent, label| parent.child(label))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(hex_str: &str) -> Node {
        hex_str.parse().unwrap()
    }

    #[test]
    fn label_hash_matches_keccak() {
        assert_eq!(
            LabelHash::of("eth").to_string(),
            "0x4f5b812789fc606be1b3b16908db13fc7a9adf7ca72641f84d75b47069d3d7f0"
        );
    }

    #[test]
    fn namehash_known_vectors() {
        assert_eq!(namehash(""), Node::ROOT);
        assert_eq!(
            namehash("eth"),
            node("0x93cdeb708b7545dc668eb9280176169d1c33cfd8ed6f04690a0bcc88a93fc4ae")
        );
        assert_eq!(
            namehash("foo.eth"),
            node("0xde9b09fd7c5f901e23a3f19fecc54828e9c848539801e86591bd9801b019f84f")
        );
    }

    #[test]
    fn child_chain_equals_namehash() {
        let eth = Node::ROOT.child("eth");
        assert_eq!(eth, namehash("eth"));
        assert_eq!(eth.child("test"), namehash("test.eth"));
        assert_eq!(
            eth.child_hashed(&LabelHash::of("test")),
            namehash("test.eth")
        );
    }

    #[test]
    fn parse_rejects_wrong_width() {
        let err = "0x1234".parse::<Node>().unwrap_err();
        assert!(matches!(err, NodeParseError::InvalidLength(2)));
        assert!("zz".parse::<Node>().is_err());
    }

    #[test]
    fn node_serializes_as_hex_string() {
        let eth = namehash("eth");
        let json = serde_json::to_string(&eth).unwrap();
        let back: Node = serde_json::from_str(&json).unwrap();
        assert_eq!(back, eth);
        assert!(json.contains("0x93cdeb70"));
    }
}
