//! Ethereum ECDSA signature representation.
//!
//! An Ethereum signature consists of three components:
//!
//! - `r`: the x-coordinate of the ephemeral public key (32 bytes)
//! - `s`: the signature scalar (32 bytes)
//! - `v`: the recovery parameter (1 byte)
//!
//! The recovery parameter appears in two encodings in the wild: the
//! low-level ECDSA recovery bit (`0`/`1`) and Ethereum's historical
//! recovery byte (`27`/`28`). [`Signature::recovery_id`] folds both down to
//! the bit form needed for public key recovery.
//!
//! # Wire Format
//!
//! Serialized signatures are 65 bytes: `r (32) || s (32) || v (1)`.
//!
//! # Example
//!
//! ```
//! use evm_wallet_core::Signature;
//!
//! let sig = Signature::new([1u8; 32], [2u8; 32], 27);
//! assert_eq!(sig.v(), 27);
//! assert_eq!(sig.recovery_id().unwrap(), 0);
//! ```

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// An Ethereum secp256k1 ECDSA signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    /// The R component of the signature (32 bytes).
    #[serde(with = "hex_bytes")]
    r: [u8; 32],

    /// The S component of the signature (32 bytes).
    #[serde(with = "hex_bytes")]
    s: [u8; 32],

    /// The recovery parameter (`0`/`1` or `27`/`28`).
    v: u8,
}

/// Serde helper for hex encoding/decoding 32-byte arrays.
mod hex_bytes {
    use hex::{decode, encode};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S>(bytes: &[u8; 32], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("0x{}", encode(bytes)))
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<[u8; 32], D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let s = s.strip_prefix("0x").unwrap_or(&s);
        let bytes = decode(s).map_err(de::Error::custom)?;
        bytes
            .try_into()
            .map_err(|_| de::Error::custom("expected 32 bytes"))
    }
}

impl Signature {
    /// The length of a serialized signature in bytes.
    pub const BYTE_LEN: usize = 65;

    /// Creates a new signature from raw components.
    #[must_use]
    pub const fn new(r: [u8; 32], s: [u8; 32], v: u8) -> Self {
        Self { r, s, v }
    }

    /// Creates a signature from a 65-byte slice containing `r || s || v`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLength`] when the slice is not exactly 65
    /// bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != Self::BYTE_LEN {
            return Err(Error::InvalidLength(format!(
                "signature must be {} bytes, got {}",
                Self::BYTE_LEN,
                bytes.len()
            )));
        }

        let r: [u8; 32] = bytes[0..32]
            .try_into()
            .map_err(|_| Error::InvalidFormat("invalid r component".to_string()))?;
        let s: [u8; 32] = bytes[32..64]
            .try_into()
            .map_err(|_| Error::InvalidFormat("invalid s component".to_string()))?;
        let v = bytes[64];

        Ok(Self::new(r, s, v))
    }

    /// Parses a signature from a hex string with optional `0x` prefix.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFormat`] for non-hex content or
    /// [`Error::InvalidLength`] when the decoded value is not 65 bytes.
    pub fn from_hex(hex_str: &str) -> Result<Self> {
        let unprefixed = hex_str.strip_prefix("0x").unwrap_or(hex_str);
        let bytes = hex::decode(unprefixed)?;
        Self::from_bytes(&bytes)
    }

    /// Serializes the signature to a 65-byte array (`r || s || v`).
    #[must_use]
    pub fn to_bytes(&self) -> [u8; Self::BYTE_LEN] {
        let mut bytes = [0u8; Self::BYTE_LEN];
        bytes[0..32].copy_from_slice(&self.r);
        bytes[32..64].copy_from_slice(&self.s);
        bytes[64] = self.v;
        bytes
    }

    /// Encodes the signature as a hex string with `0x` prefix.
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.to_bytes()))
    }

    /// Returns the R component of the signature.
    #[must_use]
    pub const fn r(&self) -> &[u8; 32] {
        &self.r
    }

    /// Returns the S component of the signature.
    #[must_use]
    pub const fn s(&self) -> &[u8; 32] {
        &self.s
    }

    /// Returns the recovery parameter as carried on the wire.
    #[must_use]
    pub const fn v(&self) -> u8 {
        self.v
    }

    /// Returns the low-level ECDSA recovery bit.
    ///
    /// Accepts both the bit encoding (`0`/`1`) and the historical byte
    /// encoding (`27`/`28`); this is the inverse companion of
    /// [`normalize_recovery_param`](crate::normalizers::normalize_recovery_param).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFormat`] for any other `v` value.
    pub fn recovery_id(&self) -> Result<u8> {
        match self.v {
            0 | 1 => Ok(self.v),
            27 | 28 => Ok(self.v - 27),
            other => Err(Error::InvalidFormat(format!(
                "recovery parameter must be 0, 1, 27, or 28, got {other}"
            ))),
        }
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
