use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};
use std::fmt;
use std::str::FromStr;

/// Errors that can occur when parsing a principal string.
#[derive(Debug, thiserror::Error)]
pub enum PrincipalError {
    #[error("principal must start with '0x'")]
    InvalidPrefix,
    #[error("principal must be {expected} characters, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
    #[error("principal payload is not valid hexadecimal")]
    InvalidHex(#[from] hex::FromHexError),
    #[error("principal payload must be exactly 32 bytes")]
    InvalidPayloadLength,
}

/// Number of raw bytes contained in a principal.
pub const PRINCIPAL_BYTES: usize = 32;
/// Expected string length of an encoded principal (prefix + 64 hex chars).
pub const PRINCIPAL_STRING_LENGTH: usize = 2 + PRINCIPAL_BYTES * 2;

/// Encode a principal into its `0x`-prefixed hexadecimal form.
pub fn encode_principal(bytes: &[u8; PRINCIPAL_BYTES]) -> String {
    let mut encoded = String::with_capacity(PRINCIPAL_STRING_LENGTH);
    encoded.push_str("0x");
    encoded.push_str(&hex::encode(bytes));
    encoded
}

/// Attempt to decode a `0x`-prefixed principal string into the raw bytes.
pub fn decode_principal(value: &str) -> Result<[u8; PRINCIPAL_BYTES], PrincipalError> {
    let Some(payload) = value.strip_prefix("0x") else {
        return Err(PrincipalError::InvalidPrefix);
    };

    if value.len() != PRINCIPAL_STRING_LENGTH {
        return Err(PrincipalError::InvalidLength {
            expected: PRINCIPAL_STRING_LENGTH,
            actual: value.len(),
        });
    }

    let decoded = hex::decode(payload)?;
    decoded
        .try_into()
        .map_err(|_| PrincipalError::InvalidPayloadLength)
}

/// Opaque caller/owner identity.
///
/// The all-zero principal is reserved: it owns every node nobody has claimed
/// and is never the identity of a real caller.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Principal(pub [u8; PRINCIPAL_BYTES]);

impl Principal {
    /// The reserved "nobody" identity.
    pub const ZERO: Principal = Principal([0u8; PRINCIPAL_BYTES]);

    pub fn new(bytes: [u8; PRINCIPAL_BYTES]) -> Self {
        Self(bytes)
    }

    /// Deterministic identity for tests and default configuration.
    pub fn from_seed(seed: &[u8]) -> Self {
        Self(Keccak256::digest(seed).into())
    }

    /// Identity of the `nonce`-th component instance created by `creator`.
    pub fn derive(creator: &Principal, nonce: u64) -> Self {
        let mut hasher = Keccak256::new();
        hasher.update(creator.as_bytes());
        hasher.update(nonce.to_be_bytes());
        Self(hasher.finalize().into())
    }

    pub fn as_bytes(&self) -> &[u8; PRINCIPAL_BYTES] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; PRINCIPAL_BYTES]
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode_principal(&self.0))
    }
}

impl fmt::Debug for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Principal({})", encode_principal(&self.0))
    }
}

impl FromStr for Principal {
    type Err = PrincipalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_principal(s).map(Principal)
    }
}

impl From<[u8; PRINCIPAL_BYTES]> for Principal {
    fn from(value: [u8; PRINCIPAL_BYTES]) -> Self {
        Principal(value)
    }
}

impl From<Principal> for String {
    fn from(value: Principal) -> Self {
        encode_principal(&value.0)
    }
}

impl TryFrom<String> for Principal {
    type Error = PrincipalError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_parses_back() {
        let principal = Principal::from_seed(b"alice");
        let encoded = principal.to_string();
        assert!(encoded.starts_with("0x"));
        assert_eq!(encoded.len(), PRINCIPAL_STRING_LENGTH);
        assert_eq!(encoded.parse::<Principal>().unwrap(), principal);
    }

    #[test]
    fn invalid_prefix_rejected() {
        let bad = "1x".to_string() + &"00".repeat(PRINCIPAL_BYTES);
        let err = bad.parse::<Principal>().unwrap_err();
        assert!(matches!(err, PrincipalError::InvalidPrefix));
    }

    #[test]
    fn invalid_length_rejected() {
        let bad = "0x".to_string() + &"00".repeat(PRINCIPAL_BYTES - 1);
        let err = bad.parse::<Principal>().unwrap_err();
        assert!(matches!(err, PrincipalError::InvalidLength { .. }));
    }

    #[test]
    fn invalid_hex_rejected() {
        let bad = format!("0x{}", "gg".repeat(PRINCIPAL_BYTES));
        let err = bad.parse::<Principal>().unwrap_err();
        assert!(matches!(err, PrincipalError::InvalidHex(_)));
    }

    #[test]
    fn derived_identities_are_distinct() {
        let deployer = Principal::from_seed(b"deployer");
        let first = Principal::derive(&deployer, 0);
        let second = Principal::derive(&deployer, 1);
        assert_ne!(first, second);
        assert_ne!(first, deployer);
        assert_eq!(first, Principal::derive(&deployer, 0));
        assert!(!first.is_zero());
        assert!(Principal::ZERO.is_zero());
    }

    #[test]
    fn serializes_as_string() {
        let principal = Principal::from_seed(b"bob");
        let json = serde_json::to_string(&principal).unwrap();
        assert_eq!(json, format!("\"{}\"", principal));
        let back: Principal = serde_json::from_str(&json).unwrap();
        assert_eq!(back, principal);
    }
}
