//! Node Address
//!
//! The fixed-width 20-byte identity that keys every membership record and
//! identifies callers of the registry.

use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Width of a node address in bytes
pub const ADDRESS_LEN: usize = 20;

/// A 20-byte account-style node address
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct NodeAddress([u8; ADDRESS_LEN]);

impl NodeAddress {
    /// The zero address (0x0000...0000), never a valid authority
    pub const ZERO: Self = Self([0u8; ADDRESS_LEN]);

    pub const fn new(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    /// Create an address from a slice. Returns None if wrong length.
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        let bytes: [u8; ADDRESS_LEN] = slice.try_into().ok()?;
        Some(Self(bytes))
    }

    pub const fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; ADDRESS_LEN]
    }

    /// Abbreviated form for log lines, e.g. `0x1a2b3c4d...eeff`
    pub fn short(&self) -> String {
        format!(
            "0x{}...{}",
            hex::encode(&self.0[..4]),
            hex::encode(&self.0[ADDRESS_LEN - 2..])
        )
    }
}

impl fmt::Display for NodeAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for NodeAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl FromStr for NodeAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);

        if digits.len() != ADDRESS_LEN * 2 {
            return Err(Error::InvalidAddress(format!(
                "expected {} hex digits, got {}",
                ADDRESS_LEN * 2,
                digits.len()
            )));
        }

        let mut bytes = [0u8; ADDRESS_LEN];
        hex::decode_to_slice(digits, &mut bytes)
            .map_err(|e| Error::InvalidAddress(format!("{}: {}", s, e)))?;
        Ok(Self(bytes))
    }
}

impl From<[u8; ADDRESS_LEN]> for NodeAddress {
    fn from(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }
}

impl From<NodeAddress> for [u8; ADDRESS_LEN] {
    fn from(address: NodeAddress) -> Self {
        address.0
    }
}

impl Serialize for NodeAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for NodeAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_parse_with_and_without_prefix() {
        let plain: NodeAddress = "00112233445566778899aabbccddeeff00112233".parse().unwrap();
        let prefixed: NodeAddress = "0x00112233445566778899AABBCCDDEEFF00112233".parse().unwrap();
        assert_eq!(plain, prefixed);
        assert_eq!(plain.as_bytes()[1], 0x11);
        assert_eq!(
            plain.to_string(),
            "0x00112233445566778899aabbccddeeff00112233"
        );
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_matches!("0x1234".parse::<NodeAddress>(), Err(Error::InvalidAddress(_)));
        assert_matches!(
            "zz112233445566778899aabbccddeeff00112233".parse::<NodeAddress>(),
            Err(Error::InvalidAddress(_))
        );
    }

    #[test]
    fn test_zero_and_slice() {
        assert!(NodeAddress::ZERO.is_zero());
        assert!(!NodeAddress::new([1; 20]).is_zero());
        assert!(NodeAddress::from_slice(&[0u8; 19]).is_none());
        assert_eq!(NodeAddress::from_slice(&[9u8; 20]), Some(NodeAddress::new([9; 20])));
    }

    #[test]
    fn test_short_form() {
        let address = NodeAddress::new([0xab; 20]);
        assert_eq!(address.short(), "0xabababab...abab");
    }

    #[test]
    fn test_serde_as_hex_string() {
        let address = NodeAddress::new([0x0f; 20]);
        let json = serde_json::to_string(&address).unwrap();
        assert_eq!(json, format!("\"0x{}\"", "0f".repeat(20)));
        let back: NodeAddress = serde_json::from_str(&json).unwrap();
        assert_eq!(back, address);
    }
}
