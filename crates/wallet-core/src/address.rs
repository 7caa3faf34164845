//! Ethereum address derivation from secp256k1 public keys.
//!
//! An Ethereum address is computed from the signer's public key:
//!
//! 1. Take the uncompressed public key (65 bytes: `0x04 || x || y`)
//! 2. Remove the `0x04` prefix to get 64 bytes (`x || y`)
//! 3. Compute the Keccak-256 hash of the 64 bytes
//! 4. Take the last 20 bytes of the hash as the address
//!
//! # Example
//!
//! ```
//! use evm_wallet_core::Address;
//!
//! let addr = Address::from_hex("0x2c7536E3605D9C16a7a3D7b1898e529396a65c23").unwrap();
//! assert_eq!(addr.to_hex(), "0x2c7536e3605d9c16a7a3d7b1898e529396a65c23");
//! ```

use std::fmt;

use alloy_primitives::{keccak256, Address as AlloyAddress};
use k256::ecdsa::VerifyingKey;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// An Ethereum address (20 bytes).
///
/// This is a wrapper around [`alloy_primitives::Address`] that adds
/// derivation from secp256k1 public keys and hex parsing with an optional
/// `0x` prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(AlloyAddress);

impl Address {
    /// The length of an Ethereum address in bytes.
    pub const BYTE_LEN: usize = 20;

    /// Creates a new address from a 20-byte array.
    #[must_use]
    pub const fn new(bytes: [u8; Self::BYTE_LEN]) -> Self {
        Self(AlloyAddress::new(bytes))
    }

    /// Returns the zero address (`0x0000...0000`).
    #[must_use]
    pub const fn zero() -> Self {
        Self(AlloyAddress::ZERO)
    }

    /// Checks if this is the zero address.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Derives the Ethereum address of a secp256k1 public key.
    ///
    /// # Example
    ///
    /// ```
    /// use evm_wallet_core::Address;
    /// use k256::ecdsa::SigningKey;
    ///
    /// let signing_key = SigningKey::from_slice(&[7u8; 32]).unwrap();
    /// let address = Address::from_public_key(signing_key.verifying_key());
    /// assert!(!address.is_zero());
    /// ```
    #[must_use]
    pub fn from_public_key(public_key: &VerifyingKey) -> Self {
        // Uncompressed SEC1 encoding: 0x04 || x || y
        let encoded = public_key.to_encoded_point(false);
        let uncompressed = encoded.as_bytes();

        let hash = keccak256(&uncompressed[1..]);

        let mut address_bytes = [0u8; Self::BYTE_LEN];
        address_bytes.copy_from_slice(&hash[12..]);
        Self::new(address_bytes)
    }

    /// Derives an Ethereum address from raw uncompressed public key bytes.
    ///
    /// # Arguments
    ///
    /// * `bytes` - Either 65 bytes (`0x04 || x || y`) or 64 bytes (`x || y`)
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFormat`] when the length is neither 64 nor
    /// 65, or when a 65-byte key does not start with the `0x04` SEC1 tag.
    pub fn from_public_key_bytes(bytes: &[u8]) -> Result<Self> {
        let coordinates = match bytes.len() {
            64 => bytes,
            65 => {
                if bytes[0] != 0x04 {
                    return Err(Error::InvalidFormat(
                        "65-byte public key must start with the 0x04 SEC1 tag".to_string(),
                    ));
                }
                &bytes[1..]
            }
            len => {
                return Err(Error::InvalidFormat(format!(
                    "public key must be 64 or 65 bytes, got {len}"
                )));
            }
        };

        let hash = keccak256(coordinates);
        let mut address_bytes = [0u8; Self::BYTE_LEN];
        address_bytes.copy_from_slice(&hash[12..]);
        Ok(Self::new(address_bytes))
    }

    /// Returns the address as a byte slice.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; Self::BYTE_LEN] {
        self.0.as_ref()
    }

    /// Returns the address as a lowercase hex string with `0x` prefix.
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.as_bytes()))
    }

    /// Returns the address as an EIP-55 mixed-case checksummed hex string.
    #[must_use]
    pub fn to_checksum_hex(&self) -> String {
        self.0.to_checksum(None)
    }

    /// Parses an address from a hex string with optional `0x` prefix.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFormat`] for non-hex content, or
    /// [`Error::InvalidLength`] when the decoded value is not 20 bytes.
    pub fn from_hex(hex_str: &str) -> Result<Self> {
        let unprefixed = hex_str.strip_prefix("0x").unwrap_or(hex_str);
        let bytes = hex::decode(unprefixed)?;

        let address_bytes: [u8; Self::BYTE_LEN] = bytes.as_slice().try_into().map_err(|_| {
            Error::InvalidLength(format!(
                "address must be {} bytes, got {}",
                Self::BYTE_LEN,
                bytes.len()
            ))
        })?;
        Ok(Self::new(address_bytes))
    }

    /// Returns the inner [`alloy_primitives::Address`].
    #[must_use]
    pub const fn inner(&self) -> AlloyAddress {
        self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_checksum_hex())
    }
}

impl From<AlloyAddress> for Address {
    fn from(addr: AlloyAddress) -> Self {
        Self(addr)
    }
}

impl From<Address> for AlloyAddress {
    fn from(addr: Address) -> Self {
        addr.0
    }
}

impl From<[u8; 20]> for Address {
    fn from(bytes: [u8; 20]) -> Self {
        Self::new(bytes)
    }
}
