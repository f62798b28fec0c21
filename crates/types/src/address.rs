//! Account addresses.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Module account that collects transaction fees.
pub const FEE_COLLECTOR_NAME: &str = "fee_collector";

/// Module account that mints new coins.
pub const MINT_MODULE_NAME: &str = "mint";

/// Module account that receives burned tax.
pub const BURN_MODULE_NAME: &str = "burn";

/// A 20-byte account address.
///
/// Addresses render as lowercase hex. Module accounts (fee collector, mint
/// reserve, burn sink) have addresses derived from their module name.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address(pub [u8; 20]);

impl Address {
    /// Size of an address in bytes.
    pub const BYTES: usize = 20;

    /// Derive the address of a module account from its name.
    ///
    /// The address is the first 20 bytes of the Blake3 hash of the name, so
    /// every node derives the same address without storing it.
    pub fn module(name: &str) -> Self {
        let hash = blake3::hash(name.as_bytes());
        let mut arr = [0u8; 20];
        arr.copy_from_slice(&hash.as_bytes()[..20]);
        Self(arr)
    }

    /// Create an address from raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AddressError> {
        if bytes.len() != Self::BYTES {
            return Err(AddressError::InvalidLength {
                expected: Self::BYTES,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; 20];
        arr.copy_from_slice(bytes);
        Ok(Self(arr))
    }

    /// Parse an address from a hex string.
    pub fn from_hex(hex: &str) -> Result<Self, AddressError> {
        if hex.len() != Self::BYTES * 2 {
            return Err(AddressError::InvalidLength {
                expected: Self::BYTES * 2,
                actual: hex.len(),
            });
        }

        let mut bytes = [0u8; 20];
        hex::decode_to_slice(hex, &mut bytes).map_err(|_| AddressError::InvalidHex)?;

        Ok(Self(bytes))
    }

    /// Convert address to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Get bytes as slice reference.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Check if this is the all-zero address.
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&b| b == 0)
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex = self.to_hex();
        write!(f, "Address({}..{})", &hex[..8], &hex[32..])
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(de::Error::custom)
    }
}

/// Errors that can occur when parsing addresses.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressError {
    /// Invalid input length.
    #[error("Invalid address length: expected {expected}, got {actual}")]
    InvalidLength {
        /// Expected length.
        expected: usize,
        /// Actual length.
        actual: usize,
    },

    /// Invalid hex characters.
    #[error("Invalid hex string")]
    InvalidHex,
}
