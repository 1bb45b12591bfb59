//! Primitive types shared by the collaborator ledgers and the exchange core
//!
//! All of them are `Copy`, fixed-size and hash/compare by value, so they can
//! key ledger maps directly.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ============================================================================
// AMOUNTS
// ============================================================================

/// Asset amounts in smallest units (native wei and fungible atomic units alike)
pub type Amount = u128;

/// One whole native coin expressed in its smallest unit (10^18)
pub const NATIVE_UNIT: Amount = 1_000_000_000_000_000_000;

// ============================================================================
// ACCOUNTS AND ITEMS
// ============================================================================

/// 32-byte account address
///
/// Identifies users, the shop account and collaborator contracts alike.
/// Human-readable formats (JSON, TOML) carry it as a `0x`-prefixed hex string.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct Address(pub [u8; 32]);

impl Address {
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// The zero address, never a valid recipient
    pub const fn zero() -> Self {
        Self([0u8; 32])
    }

    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", hex::encode(&self.0[..8]))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl From<[u8; 32]> for Address {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.collect_str(self)
        } else {
            self.0.serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let encoded = String::deserialize(deserializer)?;
            encoded.parse().map_err(serde::de::Error::custom)
        } else {
            <[u8; 32]>::deserialize(deserializer).map(Self)
        }
    }
}

/// Error parsing a hex-encoded address
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressParseError {
    #[error("Invalid hex in address: {0}")]
    InvalidHex(String),

    #[error("Invalid address length: expected 32 bytes, got {0}")]
    InvalidLength(usize),
}

impl FromStr for Address {
    type Err = AddressParseError;

    /// Parse a 64-character hex string, with or without a `0x` prefix
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(trimmed).map_err(|e| AddressParseError::InvalidHex(e.to_string()))?;
        let array: [u8; 32] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| AddressParseError::InvalidLength(bytes.len()))?;
        Ok(Self(array))
    }
}

// ============================================================================
// ITEM TYPES
// ============================================================================

/// Identifier of a unique (non-fungible) item in the item registry
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize, Default)]
pub struct ItemId(pub u64);

impl ItemId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ItemId({})", self.0)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for ItemId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_and_raw_bytes() {
        let addr = Address::new([3u8; 32]);
        assert!(!addr.is_zero());
        assert_eq!(addr.as_bytes(), &[3u8; 32]);
        assert!(Address::zero().is_zero());
    }

    #[test]
    fn test_address_parse_with_and_without_prefix() {
        let addr = Address::new([0xab; 32]);
        let rendered = addr.to_string();
        assert!(rendered.starts_with("0x"));

        assert_eq!(rendered.parse::<Address>().unwrap(), addr);
        assert_eq!(rendered[2..].parse::<Address>().unwrap(), addr);
    }

    #[test]
    fn test_address_parse_rejects_bad_input() {
        assert!(matches!(
            "0xzz".parse::<Address>(),
            Err(AddressParseError::InvalidHex(_))
        ));
        assert_eq!(
            "0x0102".parse::<Address>(),
            Err(AddressParseError::InvalidLength(2))
        );
    }

    #[test]
    fn test_address_json_is_hex_string() {
        let addr = Address::new([0x11; 32]);
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, format!("\"0x{}\"", "11".repeat(32)));

        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);
        assert!(serde_json::from_str::<Address>("\"0x1234\"").is_err());
    }

    #[test]
    fn test_item_id_display() {
        let id: ItemId = 7u64.into();
        assert_eq!(id.value(), 7);
        assert_eq!(format!("{}", id), "#7");
        assert_eq!(format!("{:?}", id), "ItemId(7)");
    }

    #[test]
    fn test_native_unit() {
        assert_eq!(NATIVE_UNIT, 10u128.pow(18));
        let json = serde_json::to_string(&ItemId(3)).unwrap();
        assert_eq!(json, "3");
    }
}
